//! Kanboard connection settings.
//!
//! Resolution order for every key:
//! 1. the dotenv file (default `.env`)
//! 2. the process environment
//! 3. a built-in default (none for the token)
//!
//! The environment only fills gaps the file leaves; it never overrides a value
//! the file sets.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

pub const URL_KEY: &str = "KANBOARD_URL";
pub const USER_KEY: &str = "KANBOARD_USER";
pub const TOKEN_KEY: &str = "KANBOARD_TOKEN";
pub const USER_ID_KEY: &str = "KANBOARD_USER_ID";

/// Environment variable naming an alternative dotenv file.
pub const ENV_FILE_VAR: &str = "KANBOARD_ENV_FILE";
pub const DEFAULT_ENV_FILE: &str = ".env";

pub const DEFAULT_URL: &str = "http://localhost/jsonrpc.php";
pub const DEFAULT_USER: &str = "jsonrpc";
pub const DEFAULT_OWNER_ID: i64 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {key}: '{value}' (expected an integer user id)")]
    InvalidOwnerId { key: &'static str, value: String },

    #[error("KANBOARD_TOKEN not set")]
    MissingToken,
}

/// Resolved connection settings, passed explicitly to [`crate::KanboardClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct KanboardConfig {
    pub url: String,
    pub user: String,
    token: Option<String>,
    /// User that owns created projects and tasks.
    pub owner_id: i64,
}

impl fmt::Debug for KanboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KanboardConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

impl KanboardConfig {
    pub fn new(url: impl Into<String>, user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: user.into(),
            token: Some(token.into()),
            owner_id: DEFAULT_OWNER_ID,
        }
    }

    pub fn with_owner_id(mut self, owner_id: i64) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Load from `env_file`, falling back to the process environment.
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        let file_vars = read_env_file(env_file)?;
        Self::resolve(&file_vars, |key| std::env::var(key).ok())
    }

    /// Merge parsed file values with an environment lookup.
    ///
    /// Empty values count as unset in both sources.
    pub fn resolve<F>(file_vars: &HashMap<String, String>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            file_vars
                .get(key)
                .filter(|value| !value.is_empty())
                .cloned()
                .or_else(|| env(key).filter(|value| !value.is_empty()))
        };

        let owner_id = match lookup(USER_ID_KEY) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidOwnerId {
                    key: USER_ID_KEY,
                    value: raw,
                })?,
            None => DEFAULT_OWNER_ID,
        };

        Ok(Self {
            url: lookup(URL_KEY).unwrap_or_else(|| DEFAULT_URL.to_string()),
            user: lookup(USER_KEY).unwrap_or_else(|| DEFAULT_USER.to_string()),
            token: lookup(TOKEN_KEY),
            owner_id,
        })
    }

    /// The API token, required before any network activity.
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingToken)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Where the user can generate an API token, derived from the RPC URL.
    pub fn token_settings_url(&self) -> String {
        let base = self
            .url
            .strip_suffix("/jsonrpc.php")
            .unwrap_or(&self.url)
            .trim_end_matches('/');
        format!("{base}/settings/api")
    }

    /// Multi-line instructions printed when the token is missing.
    pub fn token_remediation(&self) -> String {
        format!(
            "Error: {TOKEN_KEY} not set\n\
             Get your API token from: {}\n\
             Then add it to the .env file or: export {TOKEN_KEY}=\"your-token-here\"",
            self.token_settings_url()
        )
    }
}

/// Parse a dotenv file without touching the process environment.
///
/// Each line is trimmed; blank lines and `#` lines are skipped. The key ends
/// at the first `=`; the value is trimmed, then one leading and one trailing
/// quote (`"` or `'`) are stripped. Everything else is kept literally: no `$VAR`
/// expansion, no escapes, no inline comments. A missing file yields an empty
/// map.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no env file at {}, using process environment", path.display());
            return Ok(HashMap::new());
        }
        Err(source) => {
            return Err(ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let vars = parse_env_lines(&content);
    tracing::debug!("loaded {} entries from {}", vars.len(), path.display());
    Ok(vars)
}

fn parse_env_lines(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), strip_quotes(value.trim()).to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn strip_quotes(value: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let value = value.strip_prefix(is_quote).unwrap_or(value);
    value.strip_suffix(is_quote).unwrap_or(value)
}
