use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file {}: {source}", path.display())]
    ReadLayout {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout file {}: {source}", path.display())]
    ParseLayout {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to run `{program} monitors all`: {source}")]
    QuerySpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program} monitors all` exited with {status}: {stderr}")]
    QueryFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("monitor query output contained no monitor records")]
    NoMonitors,

    #[error("failed to run `{program} keyword monitor` for {monitor}: {source}")]
    ConfigureSpawn {
        program: String,
        monitor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuring {monitor} exited with {status}")]
    ConfigureFailed { monitor: String, status: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
