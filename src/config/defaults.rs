//! Default values and named presets.

use super::types::MatcherConfig;

/// Default acceptance threshold for the balanced preset.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.75;
/// Default similarity for a non-critical field missing on either side.
pub const DEFAULT_NEUTRAL_MISSING_SCORE: f64 = 0.5;
/// Default near-zero cutoff below which a critical field disqualifies.
pub const DEFAULT_CRITICAL_CUTOFF: f64 = 0.05;
/// Default token pairing threshold for the hybrid address metric.
pub const DEFAULT_TOKEN_MATCH_THRESHOLD: f64 = 0.8;

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// High acceptance bar for deployments with little human review.
    Strict,
    /// Balanced settings suitable for most linkage runs.
    Balanced,
    /// Loose matching for discovery, expecting downstream review.
    Permissive,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Balanced => "balanced",
            Self::Permissive => "permissive",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "strict" | "exact" => Some(Self::Strict),
            "balanced" | "default" => Some(Self::Balanced),
            "permissive" | "loose" => Some(Self::Permissive),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Strict => "High acceptance bar; proposes only near-certain links",
            Self::Balanced => "Balanced settings suitable for most linkage runs",
            Self::Permissive => "Loose matching for discovery with human review",
        }
    }

    /// The configuration this preset denotes.
    #[must_use]
    pub fn config(self) -> MatcherConfig {
        match self {
            Self::Strict => MatcherConfig::strict(),
            Self::Balanced => MatcherConfig::balanced(),
            Self::Permissive => MatcherConfig::permissive(),
        }
    }
}
