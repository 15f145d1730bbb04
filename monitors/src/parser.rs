//! Line-oriented parser for `hyprctl monitors` output.
//!
//! ```text
//! Monitor DP-1 (ID 0):
//! 	2560x1440@143.91200 at 0x0
//! 	description: Dell Inc. DELL S2721DGF 4P3GR83
//! 	make: Dell Inc.
//! 	model: DELL S2721DGF
//! ```
//!
//! Two states: waiting for a `Monitor` marker line, or accumulating
//! `key: value` attributes into the current descriptor.

use std::collections::BTreeMap;

/// First token of a line that opens a monitor record.
pub const MONITOR_MARKER: &str = "Monitor";

const MODEL_KEY: &str = "model";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorDescriptor {
    /// Connector name (`DP-1`, `HDMI-A-1`), the second token of the marker line.
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl MonitorDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn model(&self) -> Option<&str> {
        self.get(MODEL_KEY)
    }
}

#[derive(Debug)]
enum ParseState {
    AwaitingMarker,
    Accumulating(MonitorDescriptor),
}

#[derive(Debug)]
pub struct MonitorParser {
    state: ParseState,
    monitors: Vec<MonitorDescriptor>,
}

impl Default for MonitorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::AwaitingMarker,
            monitors: Vec::new(),
        }
    }

    pub fn feed_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        if let Some(rest) = marker_rest(line) {
            self.flush();
            match rest.split_whitespace().next() {
                Some(name) => {
                    self.state = ParseState::Accumulating(MonitorDescriptor::new(name));
                }
                None => tracing::debug!("monitor marker without a name, skipping block"),
            }
            return;
        }

        let ParseState::Accumulating(current) = &mut self.state else {
            return;
        };
        if let Some((key, value)) = line.split_once(':') {
            let (key, value) = (key.trim(), value.trim());
            if !key.is_empty() && !value.is_empty() {
                current.attributes.insert(key.to_string(), value.to_string());
            }
        }
    }

    /// Flush the last descriptor and return everything parsed.
    pub fn finish(mut self) -> Vec<MonitorDescriptor> {
        self.flush();
        self.monitors
    }

    fn flush(&mut self) {
        if let ParseState::Accumulating(done) =
            std::mem::replace(&mut self.state, ParseState::AwaitingMarker)
        {
            self.monitors.push(done);
        }
    }
}

/// Text after the marker, if `line` is a marker line.
fn marker_rest(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(MONITOR_MARKER)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

pub fn parse_monitors(output: &str) -> Vec<MonitorDescriptor> {
    let mut parser = MonitorParser::new();
    for line in output.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}
