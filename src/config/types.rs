//! Matching configuration types.

use serde::{Deserialize, Serialize};

use crate::model::{Field, FieldKind};

use super::defaults;

/// Full configuration for a matching run.
///
/// Every numeric threshold and partial-match constant in the engine lives
/// here; nothing is hard-coded at use sites. The same process can run
/// several configurations concurrently — a config is plain data threaded
/// through each component, never process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum overall score for a best candidate to be accepted.
    pub match_threshold: f64,
    /// Per-field weights for the weighted scorer.
    pub weights: FieldWeights,
    /// Per-field declared comparison kinds (dispatcher fallback).
    pub kinds: FieldKinds,
    /// Fields whose dissimilarity alone disqualifies a pair.
    pub critical_fields: Vec<Field>,
    /// Fields forming the blocking key. Kept narrow by default: an
    /// aggressive key risks excluding true matches over one mis-recorded
    /// value.
    pub blocking_fields: Vec<Field>,
    /// Similarity for a non-critical field missing on either side.
    pub neutral_missing_score: f64,
    /// A critical field scoring below this disqualifies the pair.
    pub critical_cutoff: f64,
    /// Field-specific thresholds and partial-match constants.
    pub tunables: SimilarityTunables,
    /// Cross-field penalties applied after aggregation.
    pub penalties: PenaltyConfig,
}

impl MatcherConfig {
    /// Strict matching: high acceptance bar for low-review deployments.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            match_threshold: 0.85,
            ..Self::default()
        }
    }

    /// Balanced matching for general record linkage.
    #[must_use]
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Permissive matching for discovery, expecting human review.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            match_threshold: 0.65,
            ..Self::default()
        }
    }

    /// Create a config from a preset name.
    #[must_use]
    pub fn from_preset(name: &str) -> Option<Self> {
        super::defaults::ConfigPreset::from_name(name).map(super::defaults::ConfigPreset::config)
    }

    /// Set a custom acceptance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Whether a field is in the critical set.
    #[must_use]
    pub fn is_critical(&self, field: Field) -> bool {
        self.critical_fields.contains(&field)
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            match_threshold: defaults::DEFAULT_MATCH_THRESHOLD,
            weights: FieldWeights::default(),
            kinds: FieldKinds::default(),
            critical_fields: vec![Field::Dob],
            blocking_fields: vec![Field::Dob, Field::Sex],
            neutral_missing_score: defaults::DEFAULT_NEUTRAL_MISSING_SCORE,
            critical_cutoff: defaults::DEFAULT_CRITICAL_CUTOFF,
            tunables: SimilarityTunables::default(),
            penalties: PenaltyConfig::default(),
        }
    }
}

/// Per-field weights for the weighted scorer.
///
/// Sex defaults to zero weight: it contributes through blocking and the
/// mismatch penalty, so giving it weight as well would count the same
/// disagreement twice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub first_name: f64,
    pub last_name: f64,
    pub dob: f64,
    pub sex: f64,
    pub phone_number: f64,
    pub address: f64,
    pub city: f64,
    pub zipcode: f64,
}

impl FieldWeights {
    /// Weight configured for a field.
    #[must_use]
    pub const fn get(&self, field: Field) -> f64 {
        match field {
            Field::FirstName => self.first_name,
            Field::LastName => self.last_name,
            Field::Dob => self.dob,
            Field::Sex => self.sex,
            Field::PhoneNumber => self.phone_number,
            Field::Address => self.address,
            Field::City => self.city,
            Field::Zipcode => self.zipcode,
        }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        Field::ALL.iter().map(|&f| self.get(f)).sum()
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            first_name: 2.0,
            last_name: 2.5,
            dob: 3.0,
            sex: 0.0,
            phone_number: 1.5,
            address: 1.5,
            city: 0.5,
            zipcode: 0.5,
        }
    }
}

/// Declared comparison kind per field, consumed by the dispatcher fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldKinds {
    pub first_name: FieldKind,
    pub last_name: FieldKind,
    pub dob: FieldKind,
    pub sex: FieldKind,
    pub phone_number: FieldKind,
    pub address: FieldKind,
    pub city: FieldKind,
    pub zipcode: FieldKind,
}

impl FieldKinds {
    /// Declared kind of a field.
    #[must_use]
    pub const fn get(&self, field: Field) -> FieldKind {
        match field {
            Field::FirstName => self.first_name,
            Field::LastName => self.last_name,
            Field::Dob => self.dob,
            Field::Sex => self.sex,
            Field::PhoneNumber => self.phone_number,
            Field::Address => self.address,
            Field::City => self.city,
            Field::Zipcode => self.zipcode,
        }
    }
}

impl Default for FieldKinds {
    fn default() -> Self {
        Self {
            first_name: FieldKind::Name,
            last_name: FieldKind::Name,
            dob: FieldKind::Exact,
            sex: FieldKind::Exact,
            phone_number: FieldKind::Phone,
            address: FieldKind::Address,
            city: FieldKind::General,
            zipcode: FieldKind::Exact,
        }
    }
}

/// Similarity thresholds and partial-match constants.
///
/// The legacy iterations of this system disagreed on several of these
/// values; they are deployment tunables, not derived quantities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityTunables {
    /// Score when two first names share their first token.
    pub first_name_match: f64,
    /// Score when a single-token first name matches a first+middle name.
    pub first_name_middle_name: f64,
    /// Jaro-Winkler floor for last names; below it the score is zero.
    pub last_name_match: f64,
    /// Score when one phone number is a trailing suffix of the other.
    pub phone_partial_match: f64,
    /// Score when two full numbers share only their area code.
    pub phone_area_code_match: f64,
    /// Edit-ratio floor for the phone fallback; below it the score is zero.
    pub phone_ratio_floor: f64,
    /// Score when base addresses share the street but not the number.
    pub address_base_match: f64,
    /// Score when base addresses share the number but not the street.
    pub address_number_match: f64,
    /// Token edit-ratio needed to pair tokens in the hybrid metric.
    pub token_match_threshold: f64,
    /// Damping for loose edit-ratio matches on general multi-word text.
    pub general_multiplier: f64,
    /// Damping for the edit-ratio half of the address fallback blend.
    pub address_multiplier: f64,
}

impl Default for SimilarityTunables {
    fn default() -> Self {
        Self {
            first_name_match: 0.85,
            first_name_middle_name: 0.9,
            last_name_match: 0.9,
            phone_partial_match: 0.7,
            phone_area_code_match: 0.3,
            phone_ratio_floor: 0.5,
            address_base_match: 0.7,
            address_number_match: 0.5,
            token_match_threshold: defaults::DEFAULT_TOKEN_MATCH_THRESHOLD,
            general_multiplier: 0.85,
            address_multiplier: 0.8,
        }
    }
}

/// Cross-field penalties applied after weighted aggregation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Multiplier applied when both sexes are present and different.
    pub sex_mismatch_factor: f64,
    /// Phone similarity below this counts as low.
    pub low_phone_threshold: f64,
    /// Amount subtracted when a low phone score lacks corroboration.
    pub weak_phone_penalty: f64,
    /// A field similarity above this counts as strong corroboration.
    pub strong_field_threshold: f64,
    /// Strong fields needed to waive the weak-phone penalty.
    pub min_strong_fields: usize,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            sex_mismatch_factor: 0.6,
            low_phone_threshold: 0.5,
            weak_phone_penalty: 0.1,
            strong_field_threshold: 0.9,
            min_strong_fields: 2,
        }
    }
}
