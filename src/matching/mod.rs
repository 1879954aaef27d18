//! Probabilistic matching engine for patient record linkage.
//!
//! The engine compares two collections of patient records ("internal" and
//! "external") and proposes, for each external record, the internal record
//! most likely to refer to the same real-world patient.
//!
//! # Architecture
//!
//! The pipeline runs one direction, leaves first:
//!
//! - [`normalize`]: canonicalize raw field values per semantic kind
//! - [`string_similarity`]: pure metrics over normalized strings
//! - [`field_similarity`]: field-aware metric dispatch and policy
//! - [`scoring`]: weighted multi-field aggregation with penalties
//! - [`index`]: blocking index for candidate generation
//! - [`PatientMatcher`]: drives the run and applies the match threshold
//!
//! # Example
//!
//! ```ignore
//! use patient_matcher::{MatcherConfig, PatientMatcher};
//!
//! let matcher = PatientMatcher::new(MatcherConfig::balanced());
//! let matches = matcher.match_records(&internal, &external);
//! for m in &matches {
//!     println!("{} -> {} ({:.2})", m.external.patient_id, m.internal.patient_id, m.score.value);
//! }
//! ```

pub mod field_similarity;
pub mod index;
pub mod normalize;
pub mod scoring;
pub mod string_similarity;

pub use field_similarity::field_similarity;
pub use index::CandidateIndex;
pub use scoring::score_records;

use rayon::prelude::*;
use std::time::Instant;

use crate::config::MatcherConfig;
use crate::model::{Match, MatchScore, Patient};

/// Matcher for linking records across two collections.
#[must_use]
pub struct PatientMatcher {
    config: MatcherConfig,
}

impl PatientMatcher {
    /// Create a new matcher with the given configuration.
    ///
    /// The configuration is assumed valid; run
    /// [`Validatable::validate`](crate::config::Validatable) at load time.
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Score one external/internal pair.
    #[must_use]
    pub fn score_pair(&self, external: &Patient, internal: &Patient) -> MatchScore {
        scoring::score_records(&self.config, external, internal)
    }

    /// Match two collections.
    ///
    /// For each external record the best-scoring blocking candidate is
    /// selected (strictly highest score; ties keep the first-encountered
    /// candidate) and accepted when it clears the match threshold. Each
    /// external record yields at most one match; internal records may be
    /// claimed by any number of external records — resolving many-to-one
    /// claims is a downstream review concern.
    ///
    /// External records are scored in parallel; output order follows the
    /// external input order.
    #[must_use]
    pub fn match_records(&self, internal: &[Patient], external: &[Patient]) -> Vec<Match> {
        if internal.is_empty() || external.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let index = CandidateIndex::build(internal, &self.config.blocking_fields);

        let matches: Vec<Match> = external
            .par_iter()
            .filter_map(|ext| self.best_match(ext, internal, &index))
            .collect();

        tracing::info!(
            internal = internal.len(),
            external = external.len(),
            buckets = index.bucket_count(),
            matched = matches.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "matching run complete"
        );

        matches
    }

    /// Best accepted match for one external record, if any.
    fn best_match(
        &self,
        external: &Patient,
        internal: &[Patient],
        index: &CandidateIndex,
    ) -> Option<Match> {
        let candidates = index.candidates(external);
        if candidates.is_empty() {
            tracing::debug!(external = %external.patient_id, "no blocking candidates");
            return None;
        }

        let mut best: Option<(usize, MatchScore)> = None;
        for position in candidates {
            let score = self.score_pair(external, &internal[position]);
            let improves = best
                .as_ref()
                .map_or(true, |(_, current)| score.value > current.value);
            if improves {
                best = Some((position, score));
            }
        }

        let (position, score) = best?;
        if score.value < self.config.match_threshold {
            tracing::debug!(
                external = %external.patient_id,
                best = score.value,
                threshold = self.config.match_threshold,
                "best candidate below threshold"
            );
            return None;
        }

        tracing::debug!(
            external = %external.patient_id,
            internal = %internal[position].patient_id,
            score = score.value,
            "match accepted"
        );
        Some(scoring::to_match(external, &internal[position], score))
    }
}

impl Default for PatientMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::balanced())
    }
}
