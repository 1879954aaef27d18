//! **A probabilistic record linkage engine for patient data.**
//!
//! `patient-matcher` identifies which records in two collections — an
//! "internal" and an "external" source system — most likely refer to the
//! same real-world patient, using fuzzy comparison of identity fields
//! (name, date of birth, sex, phone, address) rather than exact-key joins.
//!
//! ## Key Features
//!
//! - **Field normalization**: dates, phone numbers, and street addresses are
//!   canonicalized before comparison; malformed values degrade leniently
//!   instead of failing.
//! - **Similarity metric library**: edit-distance ratio, token-set overlap,
//!   Jaro/Jaro-Winkler, and a hybrid token-level metric for multi-word
//!   fields, all pure and reproducible.
//! - **Field-aware scoring**: per-field policies (middle-name handling,
//!   phone suffix credit, base-address matching) feed a weighted scorer
//!   with critical-field short-circuiting and cross-field penalties.
//! - **Blocking**: internal records are bucketed by cheap normalized keys
//!   (date of birth, sex) so each external record is compared against a
//!   small candidate set, never the full collection. Empty blocking values
//!   act as wildcards, not as a distinct value.
//! - **Explainable output**: every proposed match carries a field-by-field
//!   breakdown of similarities, weights, and applied penalties.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Patient`] record with its lazily-computed
//!   normalized view, and the result types ([`MatchScore`], [`Match`]).
//! - **[`matching`]**: the engine — normalization, metrics, dispatch,
//!   scoring, blocking, and the [`PatientMatcher`] orchestrator.
//! - **[`config`]**: every threshold, weight, and partial-match constant,
//!   with validation and named presets.
//!
//! ## Getting Started
//!
//! ```rust
//! use patient_matcher::{MatcherConfig, Patient, PatientMatcher};
//!
//! let mut internal_patient = Patient::new("int-0");
//! internal_patient.first_name = "John".to_string();
//! internal_patient.last_name = "Doe".to_string();
//! internal_patient.dob = "1978-12-02".to_string();
//! internal_patient.sex = "M".to_string();
//!
//! let mut external_patient = Patient::new("ext-0");
//! external_patient.first_name = "Jon".to_string();
//! external_patient.last_name = "Doe".to_string();
//! external_patient.dob = "02-Dec-1978".to_string();
//! external_patient.sex = "M".to_string();
//!
//! let matcher = PatientMatcher::new(MatcherConfig::balanced());
//! let matches = matcher.match_records(&[internal_patient], &[external_patient]);
//!
//! assert_eq!(matches.len(), 1);
//! println!(
//!     "{} -> {}: {}",
//!     matches[0].external.patient_id,
//!     matches[0].internal.patient_id,
//!     matches[0].score.summary()
//! );
//! ```
//!
//! ## Scope
//!
//! This is a library: it exposes no CLI, network protocol, or file format of
//! its own. Loading record collections and persisting accepted matches
//! belong to the caller; the engine consumes already-deserialized records
//! and produces [`Match`] values rich enough for presentation and
//! persistence layers to work with.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize↔f64 casts are pervasive in similarity math — string
    // lengths and token counts are bounded in practice
    clippy::cast_precision_loss,
    // Doc completeness: # Errors sections are aspirational for the config loaders
    clippy::missing_errors_doc,
    // Variable names like `norm1`/`norm2` or `s1`/`s2` are clear in context
    clippy::similar_names
)]

pub mod config;
pub mod error;
pub mod matching;
pub mod model;

// Re-export main types for convenience
pub use config::{
    ConfigPreset, FieldKinds, FieldWeights, MatcherConfig, PenaltyConfig, SimilarityTunables,
};
pub use config::{ConfigError, Validatable};
pub use error::{MatcherError, Result};
pub use matching::{CandidateIndex, PatientMatcher};
pub use model::{
    EarlyExit, Field, FieldKind, FieldScore, FieldSimilarity, Match, MatchScore, NormalizedValues,
    Patient, PenaltyApplied, SimilarityMetric,
};
