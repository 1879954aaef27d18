//! Configuration validation.
//!
//! The matching core assumes its configuration is valid; loaders run these
//! checks at configuration-load time so out-of-range values never reach the
//! scorer.

use crate::model::Field;

use super::types::{MatcherConfig, PenaltyConfig, SimilarityTunables};

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_unit_range(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigError::new(
            field,
            format!("must be between 0.0 and 1.0, got {value}"),
        ));
    }
}

impl Validatable for MatcherConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        check_unit_range(&mut errors, "match_threshold", self.match_threshold);
        check_unit_range(
            &mut errors,
            "neutral_missing_score",
            self.neutral_missing_score,
        );
        check_unit_range(&mut errors, "critical_cutoff", self.critical_cutoff);

        for field in Field::ALL {
            let weight = self.weights.get(field);
            if weight < 0.0 || !weight.is_finite() {
                errors.push(ConfigError::new(
                    format!("weights.{field}"),
                    format!("must be a non-negative number, got {weight}"),
                ));
            }
        }
        if self.weights.total() <= 0.0 {
            errors.push(ConfigError::new(
                "weights",
                "at least one field must carry positive weight",
            ));
        }

        if self.blocking_fields.is_empty() {
            errors.push(ConfigError::new(
                "blocking_fields",
                "at least one blocking field is required",
            ));
        }
        for (name, fields) in [
            ("blocking_fields", &self.blocking_fields),
            ("critical_fields", &self.critical_fields),
        ] {
            let mut seen = Vec::new();
            for &field in fields {
                if seen.contains(&field) {
                    errors.push(ConfigError::new(name, format!("duplicate field '{field}'")));
                }
                seen.push(field);
            }
        }

        errors.extend(self.tunables.validate());
        errors.extend(self.penalties.validate());
        errors
    }
}

impl Validatable for SimilarityTunables {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let entries = [
            ("tunables.first_name_match", self.first_name_match),
            (
                "tunables.first_name_middle_name",
                self.first_name_middle_name,
            ),
            ("tunables.last_name_match", self.last_name_match),
            ("tunables.phone_partial_match", self.phone_partial_match),
            ("tunables.phone_area_code_match", self.phone_area_code_match),
            ("tunables.phone_ratio_floor", self.phone_ratio_floor),
            ("tunables.address_base_match", self.address_base_match),
            ("tunables.address_number_match", self.address_number_match),
            ("tunables.token_match_threshold", self.token_match_threshold),
        ];
        for (field, value) in entries {
            check_unit_range(&mut errors, field, value);
        }

        for (field, value) in [
            ("tunables.general_multiplier", self.general_multiplier),
            ("tunables.address_multiplier", self.address_multiplier),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(ConfigError::new(
                    field,
                    format!("must be in (0.0, 1.0], got {value}"),
                ));
            }
        }

        errors
    }
}

impl Validatable for PenaltyConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_unit_range(
            &mut errors,
            "penalties.sex_mismatch_factor",
            self.sex_mismatch_factor,
        );
        check_unit_range(
            &mut errors,
            "penalties.low_phone_threshold",
            self.low_phone_threshold,
        );
        check_unit_range(
            &mut errors,
            "penalties.weak_phone_penalty",
            self.weak_phone_penalty,
        );
        check_unit_range(
            &mut errors,
            "penalties.strong_field_threshold",
            self.strong_field_threshold,
        );
        errors
    }
}
