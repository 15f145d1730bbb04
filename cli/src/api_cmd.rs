use std::path::Path;

use anyhow::Context;
use clap::Args;
use dotkit_common::exit_codes;
use serde_json::Value;

use crate::connect;
use crate::print_json;

#[derive(Debug, Args)]
#[command(after_help = "Examples:\n  \
    kb api getAllProjects\n  \
    kb api createProject '{\"name\":\"My Project\"}'\n  \
    kb api getAllTasks '{\"project_id\":1,\"status_id\":1}'")]
pub struct ApiArgs {
    /// JSON-RPC method name, e.g. getAllProjects.
    pub method: String,

    /// Method parameters as a JSON document.
    pub params: Option<String>,
}

fn parse_params(raw: Option<&str>) -> anyhow::Result<Value> {
    match raw {
        Some(raw) => serde_json::from_str(raw).context("invalid JSON in params"),
        None => Ok(Value::Object(Default::default())),
    }
}

pub async fn run(env_file: &Path, args: ApiArgs) -> anyhow::Result<i32> {
    let params = parse_params(args.params.as_deref())?;
    let Some((_, client)) = connect(env_file)? else {
        return Ok(exit_codes::FAILURE);
    };

    let response = client.call(&args.method, params).await?;
    if response.is_error() {
        eprintln!("{}", serde_json::to_string_pretty(response.raw())?);
        return Ok(exit_codes::FAILURE);
    }
    print_json(response.raw())?;
    Ok(exit_codes::SUCCESS)
}
