use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::LayoutError;
use crate::error::Result;

pub const DEFAULT_HYPRCTL: &str = "hyprctl";

/// The two compositor calls the layout applier needs.
#[async_trait]
pub trait Compositor: Send + Sync {
    /// Raw text listing every monitor, connected or disabled.
    async fn query_monitors(&self) -> Result<String>;

    /// Apply `config` to the monitor named `name`.
    async fn configure_monitor(&self, name: &str, config: &str) -> Result<()>;

    /// Human-readable form of the configure call, for logging.
    fn describe_configure(&self, name: &str, config: &str) -> String;
}

/// `hyprctl` invoked as a child process.
#[derive(Debug, Clone)]
pub struct Hyprctl {
    program: String,
}

impl Default for Hyprctl {
    fn default() -> Self {
        Self::new(DEFAULT_HYPRCTL)
    }
}

impl Hyprctl {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

fn monitor_rule(name: &str, config: &str) -> String {
    format!("{name},{config}")
}

#[async_trait]
impl Compositor for Hyprctl {
    async fn query_monitors(&self) -> Result<String> {
        tracing::debug!(program = %self.program, "querying monitors");
        let output = Command::new(&self.program)
            .args(["monitors", "all"])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| LayoutError::QuerySpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(LayoutError::QueryFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn configure_monitor(&self, name: &str, config: &str) -> Result<()> {
        // stdout/stderr are inherited so hyprctl's own "ok" reaches the user.
        let status = Command::new(&self.program)
            .args(["keyword", "monitor", &monitor_rule(name, config)])
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| LayoutError::ConfigureSpawn {
                program: self.program.clone(),
                monitor: name.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(LayoutError::ConfigureFailed {
                monitor: name.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn describe_configure(&self, name: &str, config: &str) -> String {
        format!("{} keyword monitor {}", self.program, monitor_rule(name, config))
    }
}
