//! Pieces shared by the `kb` and `monitor-layout` binaries.

mod args;
mod logging;

pub use args::parse_args_or_exit;
pub use logging::DEFAULT_LOG_LEVEL;
pub use logging::init_logging;

/// Process exit codes used by every dotkit binary.
///
/// Both tools collapse all failures into a single non-zero status; the
/// message on stderr carries the distinction.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}
