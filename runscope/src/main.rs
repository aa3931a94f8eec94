use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use runscope_core::analysis::AnalyzeOptions;
use runscope_core::cli::{self, logs::LogsArgs};
use runscope_core::conf::{EngineConfig, load_config};
use runscope_core::logging::{OutputMode, default_output_mode, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "runscope",
    version,
    about = "Runscope: failure diagnosis and resource analysis for workflow runs"
)]
struct Cli {
    /// Path to a runscope config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Telemetry snapshot to read from; overrides `[backend] snapshot`
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Bare messages or compact JSON
    #[arg(long, global = true, conflicts_with_all = ["pretty", "json"])]
    raw: bool,

    /// Colored human-readable output
    #[arg(long, global = true, conflicts_with = "json")]
    pretty: bool,

    /// Pretty-printed JSON
    #[arg(long, global = true)]
    json: bool,
}

impl OutputArgs {
    fn mode(&self) -> OutputMode {
        if self.raw {
            OutputMode::Raw
        } else if self.pretty {
            OutputMode::Pretty
        } else if self.json {
            OutputMode::Json
        } else {
            default_output_mode()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read one page of a run's log stream
    Logs(LogsArgs),

    /// Collect logs and failed tasks for a failed run
    Diagnose { run_id: String },

    /// Build a resource efficiency report from run manifests
    Analyze {
        /// Run ids: separate arguments, comma separated, or a JSON array
        #[arg(required = true)]
        run_ids: Vec<String>,

        /// Leave the analysis instructions out of the report
        #[arg(long)]
        no_instructions: bool,

        /// Fail when none of the requested runs could be analyzed
        #[arg(long)]
        strict: bool,

        /// Render the report as an LLM analysis prompt
        #[arg(long)]
        prompt: bool,
    },

    /// List the first page of a run's failed tasks
    FailedTasks {
        run_id: String,

        /// Defaults to `[diagnose] preview_limit`
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: Option<u32>,
    },

    /// Config tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCmd {
    /// Validate a config file
    Check {
        #[arg(default_value = "runscope.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.output.mode();

    init_logging();

    if let Command::Config {
        cmd: ConfigCmd::Check { path },
    } = &cli.command
    {
        return cli::config::check(path, mode);
    }

    let cfg = load_config(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("loading config {}", path.display()),
        None => "loading default config".to_string(),
    })?;
    let ctx = cli::build_context(&cfg, cli.snapshot.as_deref())?;

    match cli.command {
        Command::Logs(args) => cli::logs::run_logs(&ctx, &args, mode).await,

        Command::Diagnose { run_id } => {
            cli::diagnose::run_diagnose(&ctx, &run_id, &cfg.diagnose_options(), mode).await
        }

        Command::Analyze {
            run_ids,
            no_instructions,
            strict,
            prompt,
        } => {
            let opts = analyze_options(&cfg, no_instructions, strict);
            cli::analyze::run_analyze(&ctx, &run_ids, &opts, prompt, mode).await
        }

        Command::FailedTasks { run_id, limit } => {
            let limit = limit.unwrap_or(cfg.diagnose.preview_limit);
            cli::tasks::run_failed_tasks(&ctx, &run_id, limit, mode).await
        }

        Command::Config { .. } => Ok(()),
    }
}

fn analyze_options(
    cfg: &EngineConfig,
    no_instructions: bool,
    strict: bool,
) -> AnalyzeOptions {
    let mut opts = cfg.analyze_options();
    if no_instructions {
        opts.include_instructions = false;
    }
    if strict {
        opts.strict = true;
    }
    opts
}
