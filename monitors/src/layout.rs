use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::LayoutError;
use crate::error::Result;

pub const DEFAULT_LAYOUT_FILE: &str = "monitors.json";

/// Monitor model → Hyprland monitor rule (`"2560x1440@144,0x0,1"`).
///
/// Stored on disk as a flat JSON object keyed by the `model` attribute that
/// `hyprctl monitors` reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutMapping(BTreeMap<String, String>);

impl LayoutMapping {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| LayoutError::ReadLayout {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| LayoutError::ParseLayout {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn config_for(&self, model: &str) -> Option<&str> {
        self.0.get(model).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LayoutMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(model, config)| (model.into(), config.into()))
                .collect(),
        )
    }
}
