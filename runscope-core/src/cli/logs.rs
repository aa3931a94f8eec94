use crate::backend::BackendContext;
use crate::cli::print_json;
use crate::cli::render::render_log_page;
use crate::logging::OutputMode;
use crate::logs::{PageCursor, PageQuery, ReadDirection, StreamKey, fetch_page};
use anyhow::{Result, bail};
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StreamKind {
    Run,
    Engine,
    Manifest,
    Task,
}

#[derive(Debug, Clone, Args)]
pub struct LogsArgs {
    /// Which of the run's streams to read
    #[arg(value_enum)]
    pub stream: StreamKind,

    #[arg(long)]
    pub run_id: String,

    /// Required for task streams
    #[arg(long)]
    pub task_id: Option<String>,

    /// Locates the manifest stream; omitted means the bare run manifest stream
    #[arg(long)]
    pub run_uuid: Option<String>,

    /// ISO-8601 lower bound (inclusive)
    #[arg(long)]
    pub start_time: Option<String>,

    /// ISO-8601 upper bound (exclusive)
    #[arg(long)]
    pub end_time: Option<String>,

    #[arg(long, default_value_t = 100)]
    pub limit: u32,

    /// Continuation token from a previous page of the same stream
    #[arg(long)]
    pub cursor: Option<String>,

    /// Read the most recent events first
    #[arg(long)]
    pub from_tail: bool,
}

impl LogsArgs {
    pub fn stream_key(&self) -> Result<StreamKey> {
        let run_id = self.run_id.clone();
        Ok(match self.stream {
            StreamKind::Run => StreamKey::run(run_id),
            StreamKind::Engine => StreamKey::engine(run_id),
            StreamKind::Manifest => StreamKey::manifest(run_id, self.run_uuid.clone()),
            StreamKind::Task => {
                let Some(task_id) = self.task_id.clone() else {
                    bail!("--task-id is required for task streams");
                };
                StreamKey::task(run_id, task_id)
            }
        })
    }

    pub fn page_query(&self, key: &StreamKey) -> PageQuery {
        PageQuery {
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            limit: self.limit,
            cursor: self
                .cursor
                .as_ref()
                .map(|token| PageCursor::for_stream(key, token.clone())),
            direction: if self.from_tail {
                ReadDirection::FromTail
            } else {
                ReadDirection::FromHead
            },
        }
    }
}

pub async fn run_logs(ctx: &BackendContext, args: &LogsArgs, mode: OutputMode) -> Result<()> {
    let key = args.stream_key()?;
    let page = fetch_page(ctx, &key, &args.page_query(&key)).await?;

    match mode {
        OutputMode::Raw => {
            for event in &page.events {
                println!("{}", event.message);
            }
            Ok(())
        }
        OutputMode::Pretty => {
            render_log_page(&page);
            Ok(())
        }
        OutputMode::Json => print_json(&page, true),
    }
}
