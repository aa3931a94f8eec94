use std::fmt::{Display, Formatter};

/// One of the stream namespaces a run writes into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StreamKey {
    /// High-level lifecycle events for the run.
    Run { run_id: String },
    /// Stdout/stderr of the workflow engine process.
    Engine { run_id: String },
    /// Manifest written once the run reaches a terminal state.
    Manifest {
        run_id: String,
        run_uuid: Option<String>,
    },
    /// Stdout/stderr of one task container.
    Task { run_id: String, task_id: String },
}

impl StreamKey {
    pub fn run(run_id: impl Into<String>) -> Self {
        StreamKey::Run {
            run_id: run_id.into(),
        }
    }

    pub fn engine(run_id: impl Into<String>) -> Self {
        StreamKey::Engine {
            run_id: run_id.into(),
        }
    }

    pub fn manifest(run_id: impl Into<String>, run_uuid: Option<String>) -> Self {
        StreamKey::Manifest {
            run_id: run_id.into(),
            run_uuid,
        }
    }

    pub fn task(run_id: impl Into<String>, task_id: impl Into<String>) -> Self {
        StreamKey::Task {
            run_id: run_id.into(),
            task_id: task_id.into(),
        }
    }

    pub fn run_id(&self) -> &str {
        match self {
            StreamKey::Run { run_id }
            | StreamKey::Engine { run_id }
            | StreamKey::Manifest { run_id, .. }
            | StreamKey::Task { run_id, .. } => run_id,
        }
    }

    pub fn stream_name(&self) -> String {
        match self {
            StreamKey::Run { run_id } => format!("run/{run_id}"),
            StreamKey::Engine { run_id } => format!("run/{run_id}/engine"),
            StreamKey::Manifest {
                run_id,
                run_uuid: Some(uuid),
            } => format!("manifest/run/{run_id}/{uuid}"),
            StreamKey::Manifest {
                run_id,
                run_uuid: None,
            } => format!("manifest/run/{run_id}"),
            StreamKey::Task { run_id, task_id } => format!("run/{run_id}/task/{task_id}"),
        }
    }
}

impl Display for StreamKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.stream_name())
    }
}
