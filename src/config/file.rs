//! Configuration loading from JSON.
//!
//! Loading is a caller concern — the matching core never reads files on its
//! own. These helpers parse and validate in one step so out-of-range values
//! are rejected at load time, before they can reach the scorer.

use std::path::Path;

use crate::error::{MatcherError, Result};

use super::types::MatcherConfig;
use super::validation::Validatable;

/// Parse a configuration from a JSON string and validate it.
pub fn from_json_str(json: &str) -> Result<MatcherConfig> {
    let config: MatcherConfig = serde_json::from_str(json)?;
    let errors = config.validate();
    if errors.is_empty() {
        Ok(config)
    } else {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(MatcherError::config(joined))
    }
}

/// Load and validate a configuration from a JSON file.
pub fn load_config_file(path: &Path) -> Result<MatcherConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MatcherError::io(path, e))?;
    let config = from_json_str(&content)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
