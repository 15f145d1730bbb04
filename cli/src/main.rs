//! `kb`: Kanboard JSON-RPC from the command line.
//!
//! - `kb api <method> [params-json]`
//! - `kb create-project <name> [description]`
//! - `kb create-task <project_id> <title> [description] [color]`
//!
//! Results go to stdout as pretty JSON; progress and errors go to stderr.

mod api_cmd;
mod project_cmd;
mod task_cmd;

use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use dotkit_common::exit_codes;
use dotkit_common::init_logging;
use dotkit_common::parse_args_or_exit;
use dotkit_kanboard::KanboardClient;
use dotkit_kanboard::KanboardConfig;
use dotkit_kanboard::config::DEFAULT_ENV_FILE;
use dotkit_kanboard::config::ENV_FILE_VAR;

#[derive(Debug, Parser)]
#[command(name = "kb", version, about = "Kanboard JSON-RPC helper")]
struct Cli {
    /// Dotenv file holding KANBOARD_URL, KANBOARD_USER and KANBOARD_TOKEN.
    #[arg(long, global = true, env = ENV_FILE_VAR, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    #[command(subcommand)]
    command: KbCommand,
}

#[derive(Debug, Subcommand)]
enum KbCommand {
    /// Call any JSON-RPC method and print the response envelope.
    Api(api_cmd::ApiArgs),
    /// Create a project and make the configured user its manager.
    CreateProject(project_cmd::CreateProjectArgs),
    /// Create a task owned by the configured user.
    CreateTask(task_cmd::CreateTaskArgs),
}

#[tokio::main]
async fn main() {
    let cli: Cli = parse_args_or_exit();
    init_logging();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        KbCommand::Api(args) => api_cmd::run(&cli.env_file, args).await,
        KbCommand::CreateProject(args) => project_cmd::run(&cli.env_file, args).await,
        KbCommand::CreateTask(args) => task_cmd::run(&cli.env_file, args).await,
    }
}

/// Resolve configuration and build a client.
///
/// `Ok(None)` means the token is missing; the remediation text has already
/// been printed.
pub(crate) fn connect(env_file: &Path) -> anyhow::Result<Option<(KanboardConfig, KanboardClient)>> {
    let config = KanboardConfig::load(env_file)?;
    if !config.has_token() {
        eprintln!("{}", config.token_remediation());
        return Ok(None);
    }
    tracing::debug!(?config, "resolved configuration");
    let client = KanboardClient::new(&config)?;
    Ok(Some((config, client)))
}

pub(crate) fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
