use std::path::Path;

use clap::Args;
use dotkit_common::exit_codes;
use dotkit_kanboard::ops::Advisory;
use dotkit_kanboard::ops::NewProject;
use dotkit_kanboard::ops::create_project_with_owner;

use crate::connect;
use crate::print_json;

#[derive(Debug, Args)]
#[command(after_help = "Example:\n  kb create-project \"My Project\" \"Project description\"")]
pub struct CreateProjectArgs {
    pub name: String,

    #[arg(default_value = "")]
    pub description: String,

    /// Owner user id; defaults to KANBOARD_USER_ID, then 1.
    #[arg(long)]
    pub owner: Option<i64>,
}

pub async fn run(env_file: &Path, args: CreateProjectArgs) -> anyhow::Result<i32> {
    let Some((config, client)) = connect(env_file)? else {
        return Ok(exit_codes::FAILURE);
    };

    let project = NewProject {
        name: args.name,
        description: args.description,
        owner_id: args.owner.unwrap_or(config.owner_id),
    };

    eprintln!("Creating project \"{}\"...", project.name);
    let report = create_project_with_owner(&client, &project).await?;
    eprintln!("✓ Project created (ID: {})", report.project_id);
    match &report.membership {
        Advisory::Done => eprintln!("✓ You are now project manager"),
        Advisory::Failed(reason) => eprintln!("Warning: could not add you as manager: {reason}"),
    }

    print_json(&report.details)?;
    eprintln!();
    eprintln!("Project \"{}\" is ready", project.name);
    if let Some(board) = report.board_url() {
        eprintln!("   Board: {board}");
    }
    if let Some(list) = report.list_url() {
        eprintln!("   List:  {list}");
    }
    Ok(exit_codes::SUCCESS)
}
