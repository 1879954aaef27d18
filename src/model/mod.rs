//! Data model for patient record linkage.
//!
//! Defines the [`Patient`] record with its lazily-computed normalized view,
//! the closed [`Field`]/[`FieldKind`] enumerations, and the result types a
//! matching run produces ([`MatchScore`], [`Match`]).

mod match_result;
mod patient;

pub use match_result::{
    EarlyExit, FieldScore, FieldSimilarity, Match, MatchScore, PenaltyApplied, SimilarityMetric,
};
pub use patient::{Field, FieldKind, NormalizedValues, Patient};
