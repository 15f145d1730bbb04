//! Apply per-model monitor settings through Hyprland's `hyprctl`.
//!
//! `hyprctl monitors all` is parsed into [`MonitorDescriptor`]s, each monitor's
//! `model` is looked up in a [`LayoutMapping`], and every match becomes one
//! `hyprctl keyword monitor <name>,<config>` call.

mod apply;
mod compositor;
mod error;
mod layout;
mod parser;

pub use apply::AppliedMonitor;
pub use apply::ApplyReport;
pub use apply::apply_layout;
pub use apply::plan_layout;
pub use compositor::Compositor;
pub use compositor::DEFAULT_HYPRCTL;
pub use compositor::Hyprctl;
pub use error::LayoutError;
pub use error::Result;
pub use layout::DEFAULT_LAYOUT_FILE;
pub use layout::LayoutMapping;
pub use parser::MONITOR_MARKER;
pub use parser::MonitorDescriptor;
pub use parser::MonitorParser;
pub use parser::parse_monitors;
