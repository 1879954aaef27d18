//! Match result types: per-field similarity, whole-record scores, matches.

use indexmap::IndexMap;
use serde::Serialize;

use super::patient::{Field, Patient};

/// Which metric or policy produced a field similarity score.
///
/// Carried alongside every score so a presentation layer can explain a
/// proposed match and penalty rules can inspect how a score was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// One or both normalized values were empty.
    Empty,
    /// Normalized values were identical.
    Exact,
    /// One phone number is a trailing suffix of the other.
    PhoneSuffix,
    /// Same area code, different local number.
    PhoneAreaCode,
    /// Normalized Levenshtein edit-distance ratio.
    EditDistanceRatio,
    /// Street-number/street-name component comparison.
    AddressComponents,
    /// Greedy token-level Jaccard-Levenshtein hybrid.
    HybridToken,
    /// Single-token first name contained in a first+middle name.
    FirstMiddleName,
    /// First tokens of both names matched exactly.
    FirstTokenMatch,
    /// Jaro-Winkler similarity.
    JaroWinkler,
    /// Token-set (Jaccard) overlap.
    TokenOverlap,
    /// Declared-exact field compared unequal.
    ExactKind,
}

impl SimilarityMetric {
    /// Get the metric identifier as a string.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Exact => "exact",
            Self::PhoneSuffix => "phone_suffix",
            Self::PhoneAreaCode => "phone_area_code",
            Self::EditDistanceRatio => "edit_distance_ratio",
            Self::AddressComponents => "address_components",
            Self::HybridToken => "hybrid_token",
            Self::FirstMiddleName => "first_middle_name",
            Self::FirstTokenMatch => "first_token_match",
            Self::JaroWinkler => "jaro_winkler",
            Self::TokenOverlap => "token_overlap",
            Self::ExactKind => "exact_kind",
        }
    }
}

/// Result of comparing one field across two records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSimilarity {
    /// Score in `[0.0, 1.0]`.
    pub score: f64,
    /// Which metric/policy produced the score.
    pub metric: SimilarityMetric,
}

impl FieldSimilarity {
    /// Create a new field similarity result.
    #[must_use]
    pub const fn new(score: f64, metric: SimilarityMetric) -> Self {
        Self { score, metric }
    }
}

/// One field's contribution to a weighted match score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldScore {
    /// Raw similarity in `[0.0, 1.0]`.
    pub similarity: f64,
    /// Configured weight for the field.
    pub weight: f64,
    /// `similarity * weight`.
    pub weighted: f64,
    /// Which metric/policy produced the similarity.
    pub metric: SimilarityMetric,
}

/// Critical-field disqualification: the field whose similarity fell below
/// the critical cutoff, ending scoring early.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EarlyExit {
    pub field: Field,
    pub similarity: f64,
}

/// A cross-field penalty that was actually applied to a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PenaltyApplied {
    /// Both sexes present and different; the score was multiplied by `factor`.
    SexMismatch { factor: f64 },
    /// Phone similarity was low without enough strong fields to corroborate;
    /// `amount` was subtracted from the score.
    WeakPhoneCorroboration { amount: f64 },
}

/// The result of comparing two whole records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    /// Overall score in `[0.0, 1.0]`.
    pub value: f64,
    /// Per-field breakdown in canonical field order.
    pub breakdown: IndexMap<Field, FieldScore>,
    /// Set when a critical field disqualified the pair before all fields
    /// were scored; the breakdown then covers only the fields visited.
    pub early_exit: Option<EarlyExit>,
    /// Penalties applied after aggregation, in application order.
    pub penalties: Vec<PenaltyApplied>,
}

impl MatchScore {
    /// Similarity of a single field, if it was scored.
    #[must_use]
    pub fn field_similarity(&self, field: Field) -> Option<f64> {
        self.breakdown.get(&field).map(|s| s.similarity)
    }

    /// Get a human-readable summary of the score breakdown.
    #[must_use]
    pub fn summary(&self) -> String {
        let fields = self
            .breakdown
            .iter()
            .map(|(field, score)| format!("{}: {:.2}", field, score.similarity))
            .collect::<Vec<_>>()
            .join(", ");
        match &self.early_exit {
            Some(exit) => format!(
                "Total: {:.2} (disqualified on {}; {})",
                self.value, exit.field, fields
            ),
            None => format!("Total: {:.2} ({})", self.value, fields),
        }
    }
}

/// A proposed link between one external and one internal record.
///
/// Transient output of a matching run; persistence of accepted matches is a
/// caller concern, keyed by the two source-local identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub external: Patient,
    pub internal: Patient,
    pub score: MatchScore,
}

impl Match {
    /// The `(external_id, internal_id)` pair identifying this match.
    #[must_use]
    pub fn id_pair(&self) -> (&str, &str) {
        (&self.external.patient_id, &self.internal.patient_id)
    }
}
