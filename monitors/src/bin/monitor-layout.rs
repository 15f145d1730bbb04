use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dotkit_common::exit_codes;
use dotkit_common::init_logging;
use dotkit_common::parse_args_or_exit;
use dotkit_monitors::DEFAULT_HYPRCTL;
use dotkit_monitors::DEFAULT_LAYOUT_FILE;
use dotkit_monitors::Hyprctl;
use dotkit_monitors::LayoutMapping;
use dotkit_monitors::apply_layout;

/// Apply per-model monitor rules from a JSON layout file through hyprctl.
#[derive(Debug, Parser)]
#[command(name = "monitor-layout", version)]
struct Cli {
    /// JSON object mapping monitor model to a Hyprland monitor rule.
    #[arg(long, env = "MONITOR_LAYOUT_FILE", default_value = DEFAULT_LAYOUT_FILE)]
    layout: PathBuf,

    /// hyprctl binary to invoke.
    #[arg(long, env = "HYPRCTL", default_value = DEFAULT_HYPRCTL)]
    hyprctl: String,

    /// Print the configure commands without running them.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let cli: Cli = parse_args_or_exit();
    init_logging();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_codes::FAILURE);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let layout = LayoutMapping::load(&cli.layout)?;
    if layout.is_empty() {
        tracing::warn!(path = %cli.layout.display(), "layout file has no entries");
    }

    let hyprctl = Hyprctl::new(cli.hyprctl);
    let report = apply_layout(&hyprctl, &layout, cli.dry_run, |line| println!("{line}"))
        .await
        .context("applying monitor layout")?;

    tracing::info!(
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        dry_run = cli.dry_run,
        "monitor layout done"
    );
    Ok(())
}
