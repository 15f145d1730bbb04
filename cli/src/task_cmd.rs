use std::path::Path;

use clap::Args;
use clap::builder::PossibleValuesParser;
use dotkit_common::exit_codes;
use dotkit_kanboard::ops::Assignment;
use dotkit_kanboard::ops::DEFAULT_TASK_COLOR;
use dotkit_kanboard::ops::NewTask;
use dotkit_kanboard::ops::TASK_COLORS;
use dotkit_kanboard::ops::create_task_with_owner;

use crate::connect;
use crate::print_json;

#[derive(Debug, Args)]
#[command(after_help = "Example:\n  kb create-task 1 \"Fix bug\" \"Details here\" red")]
pub struct CreateTaskArgs {
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    pub project_id: i64,

    pub title: String,

    #[arg(default_value = "")]
    pub description: String,

    #[arg(default_value = DEFAULT_TASK_COLOR, value_parser = PossibleValuesParser::new(TASK_COLORS))]
    pub color: String,

    /// Owner user id; defaults to KANBOARD_USER_ID, then 1.
    #[arg(long)]
    pub owner: Option<i64>,
}

pub async fn run(env_file: &Path, args: CreateTaskArgs) -> anyhow::Result<i32> {
    let Some((config, client)) = connect(env_file)? else {
        return Ok(exit_codes::FAILURE);
    };

    let task = NewTask {
        project_id: args.project_id,
        title: args.title,
        description: args.description,
        color_id: args.color,
        owner_id: args.owner.unwrap_or(config.owner_id),
    };

    eprintln!("Creating task in project {}...", task.project_id);
    let report = create_task_with_owner(&client, &task).await?;
    match &report.assignment {
        Assignment::AtCreation => {
            eprintln!("✓ Task created and assigned (ID: {})", report.task_id);
        }
        Assignment::Updated => {
            eprintln!("Retried without owner_id");
            eprintln!("✓ Task created (ID: {})", report.task_id);
            eprintln!("✓ Task assigned to you");
        }
        Assignment::Unassigned(reason) => {
            eprintln!("Retried without owner_id");
            eprintln!("✓ Task created (ID: {})", report.task_id);
            eprintln!("Warning: task created but not assigned: {reason}");
        }
    }

    print_json(&report.details)?;
    eprintln!();
    eprintln!("Task \"{}\" created", task.title);
    if let Some(url) = report.url() {
        eprintln!("   URL: {url}");
    }
    Ok(exit_codes::SUCCESS)
}
