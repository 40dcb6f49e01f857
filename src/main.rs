//! triage - Renovate PR triage
//!
//! CLI binary for classifying, batch-rebasing and batch-merging Renovate
//! PRs, then watching the cluster reconcile.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use renovate_triage::clock::SystemClock;
use renovate_triage::cluster::KubectlService;
use renovate_triage::config::TriageConfig;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Triage, batch-merge and watch Renovate dependency PRs")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalOptions {
    /// Repository as owner/repo
    #[arg(long, global = true, env = "TRIAGE_REPO")]
    repo: Option<String>,

    /// Only list PRs by this author
    #[arg(long, global = true, env = "TRIAGE_AUTHOR")]
    author: Option<String>,

    /// List PRs from every author
    #[arg(long, global = true, conflicts_with = "author")]
    all_authors: bool,

    /// IANA timezone for timestamps
    #[arg(long, global = true, env = "TRIAGE_TIMEZONE")]
    timezone: Option<String>,

    /// Watch timeout in seconds
    #[arg(long, global = true, env = "TRIAGE_WATCH_TIMEOUT")]
    timeout: Option<u64>,

    /// Seconds between watch polls
    #[arg(long, global = true, env = "TRIAGE_POLL_INTERVAL")]
    poll_interval: Option<u64>,

    /// Dry run - show what would be done without making changes
    #[arg(long, global = true, env = "TRIAGE_DRY_RUN")]
    dry_run: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the numbered PR listing and exit
    List,

    /// Watch the releases of one or more apps until healthy
    Watch {
        /// App names (e.g. radarr)
        #[arg(required = true)]
        apps: Vec<String>,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,renovate_triage=debug,triage=debug"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_config(options: &GlobalOptions) -> Result<TriageConfig> {
    let mut config = TriageConfig::default();

    if let Some(ref slug) = options.repo {
        config = config.with_repo(slug)?;
    }
    if options.all_authors {
        config.bot_author = None;
    } else if let Some(ref author) = options.author {
        config.bot_author = Some(author.clone());
    }
    if let Some(ref tz) = options.timezone {
        config = config.with_timezone(tz)?;
    }
    if let Some(secs) = options.timeout {
        config.watch_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = options.poll_interval {
        config = config.with_poll_interval(secs)?;
    }
    config.dry_run = options.dry_run;

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.options.verbose);
    let config = build_config(&cli.options)?;

    match cli.command {
        None => {
            // Default: interactive mode
            let ctx = cli::CommandContext::new(config).await?;
            cli::run_interactive(&ctx).await?;
        }
        Some(Commands::List) => {
            let ctx = cli::CommandContext::new(config).await?;
            cli::run_list(&ctx).await?;
        }
        Some(Commands::Watch { apps }) => {
            cli::run_watch(&KubectlService::new(), &SystemClock, &config, &apps).await;
        }
        Some(Commands::Auth { action }) => match action {
            AuthAction::Test => cli::run_auth_test(&config.platform).await?,
            AuthAction::Setup => cli::run_auth_setup(),
        },
    }

    Ok(())
}
