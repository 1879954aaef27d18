//! Configuration for the matching engine.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - JSON config loading
//!
//! # Quick Start
//!
//! ```rust
//! use patient_matcher::config::{MatcherConfig, Validatable};
//!
//! // Use defaults
//! let config = MatcherConfig::balanced();
//! assert!(config.is_valid());
//!
//! // Use a preset by name
//! let config = MatcherConfig::from_preset("strict").unwrap();
//!
//! // Tweak a value
//! let config = MatcherConfig::balanced().with_threshold(0.8);
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_CRITICAL_CUTOFF, DEFAULT_MATCH_THRESHOLD,
    DEFAULT_NEUTRAL_MISSING_SCORE, DEFAULT_TOKEN_MATCH_THRESHOLD,
};
pub use file::{from_json_str, load_config_file};
pub use types::{FieldKinds, FieldWeights, MatcherConfig, PenaltyConfig, SimilarityTunables};
pub use validation::{ConfigError, Validatable};
