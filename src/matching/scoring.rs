//! Weighted multi-field scoring.
//!
//! Combines per-field similarities into one overall score using configured
//! weights, with missing-value policy, critical-field short-circuiting, and
//! cross-field penalties. Scoring is a total function: every record pair
//! produces a defined [`MatchScore`], never an error.

use indexmap::IndexMap;

use crate::config::MatcherConfig;
use crate::model::{
    EarlyExit, Field, FieldScore, FieldSimilarity, Match, MatchScore, Patient, PenaltyApplied,
    SimilarityMetric,
};

use super::field_similarity::field_similarity;

/// Score a pair of records under the given configuration.
///
/// Fields are visited in canonical order. A critical field whose similarity
/// falls below the critical cutoff disqualifies the pair immediately: the
/// score is 0.0, the reason is recorded, and remaining fields are skipped.
#[must_use]
pub fn score_records(config: &MatcherConfig, external: &Patient, internal: &Patient) -> MatchScore {
    let norm_ext = external.normalized();
    let norm_int = internal.normalized();

    let mut breakdown: IndexMap<Field, FieldScore> = IndexMap::with_capacity(Field::ALL.len());
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for field in Field::ALL {
        let weight = config.weights.get(field);
        let value_ext = norm_ext.get(field);
        let value_int = norm_int.get(field);
        let critical = config.is_critical(field);

        let similarity = if value_ext.is_empty() || value_int.is_empty() {
            if critical {
                FieldSimilarity::new(0.0, SimilarityMetric::Empty)
            } else {
                // Unknown is not necessarily different.
                FieldSimilarity::new(config.neutral_missing_score, SimilarityMetric::Empty)
            }
        } else {
            field_similarity(
                value_ext,
                value_int,
                config.kinds.get(field),
                field,
                &config.tunables,
            )
        };

        breakdown.insert(
            field,
            FieldScore {
                similarity: similarity.score,
                weight,
                weighted: similarity.score * weight,
                metric: similarity.metric,
            },
        );
        weighted_sum += similarity.score * weight;
        weight_total += weight;

        if critical && similarity.score < config.critical_cutoff {
            return MatchScore {
                value: 0.0,
                breakdown,
                early_exit: Some(EarlyExit {
                    field,
                    similarity: similarity.score,
                }),
                penalties: Vec::new(),
            };
        }
    }

    let mut value = if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    };
    let mut penalties = Vec::new();

    // Sex mismatch: both present and different.
    let sex_ext = norm_ext.get(Field::Sex);
    let sex_int = norm_int.get(Field::Sex);
    if !sex_ext.is_empty() && !sex_int.is_empty() && sex_ext != sex_int {
        value *= config.penalties.sex_mismatch_factor;
        penalties.push(PenaltyApplied::SexMismatch {
            factor: config.penalties.sex_mismatch_factor,
        });
    }

    // Low phone similarity without enough strong fields to corroborate.
    if let Some(phone) = breakdown.get(&Field::PhoneNumber) {
        if phone.similarity < config.penalties.low_phone_threshold {
            let strong_fields = breakdown
                .iter()
                .filter(|(field, score)| {
                    **field != Field::PhoneNumber
                        && score.similarity > config.penalties.strong_field_threshold
                })
                .count();
            if strong_fields < config.penalties.min_strong_fields {
                value -= config.penalties.weak_phone_penalty;
                penalties.push(PenaltyApplied::WeakPhoneCorroboration {
                    amount: config.penalties.weak_phone_penalty,
                });
            }
        }
    }

    MatchScore {
        value: value.clamp(0.0, 1.0),
        breakdown,
        early_exit: None,
        penalties,
    }
}

/// Build a [`Match`] from an accepted pair.
pub(crate) fn to_match(external: &Patient, internal: &Patient, score: MatchScore) -> Match {
    Match {
        external: external.clone(),
        internal: internal.clone(),
        score,
    }
}
