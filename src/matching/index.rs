//! Blocking index for candidate generation.
//!
//! Avoids the O(internal × external) full comparison by grouping internal
//! records under cheap, highly-discriminating normalized keys (by default
//! date of birth and sex). Built once per run, read-only afterwards.
//!
//! Empty blocking values act as wildcards, never as a distinct value: a
//! blocking field filters candidates only when it is present and non-empty
//! on *both* sides, so a missing DOB or sex cannot exclude an otherwise
//! compatible candidate.

use std::collections::HashMap;

use crate::model::{Field, Patient};

/// Per-field postings: normalized value → record positions, plus the records
/// whose value is empty (wildcards).
#[derive(Debug, Default)]
struct FieldPostings {
    by_value: HashMap<String, Vec<usize>>,
    wildcard: Vec<usize>,
}

/// Candidate index over the internal collection.
///
/// Every internal record appears in exactly one bucket per blocking field,
/// determined solely by its own normalized value (or the wildcard list when
/// that value is empty).
#[derive(Debug)]
pub struct CandidateIndex {
    fields: Vec<Field>,
    postings: Vec<FieldPostings>,
    /// Normalized blocking values per record, parallel to `fields`.
    values: Vec<Vec<String>>,
    record_count: usize,
}

impl CandidateIndex {
    /// Build an index over the internal records using the given blocking
    /// fields.
    #[must_use]
    pub fn build(records: &[Patient], blocking_fields: &[Field]) -> Self {
        let fields = blocking_fields.to_vec();
        let mut postings: Vec<FieldPostings> =
            fields.iter().map(|_| FieldPostings::default()).collect();
        let mut values: Vec<Vec<String>> = fields.iter().map(|_| Vec::new()).collect();

        for (position, record) in records.iter().enumerate() {
            let normalized = record.normalized();
            for (k, &field) in fields.iter().enumerate() {
                let value = normalized.get(field);
                if value.is_empty() {
                    postings[k].wildcard.push(position);
                } else {
                    postings[k]
                        .by_value
                        .entry(value.to_string())
                        .or_default()
                        .push(position);
                }
                values[k].push(value.to_string());
            }
        }

        tracing::debug!(
            records = records.len(),
            fields = ?fields,
            "candidate index built"
        );

        Self {
            fields,
            postings,
            values,
            record_count: records.len(),
        }
    }

    /// Candidate positions for an external record, in internal input order.
    ///
    /// Intersects, over every blocking field that is non-empty on the
    /// external side, the records carrying the same value with the records
    /// carrying none. With no constrained field the whole collection is
    /// returned.
    #[must_use]
    pub fn candidates(&self, external: &Patient) -> Vec<usize> {
        let normalized = external.normalized();

        let mut result: Option<Vec<usize>> = None;
        for (k, &field) in self.fields.iter().enumerate() {
            let value = normalized.get(field);
            if value.is_empty() {
                continue;
            }

            match result {
                None => {
                    // Union of the value bucket and the wildcard list; both
                    // are ascending and disjoint, so a merge keeps order.
                    let bucket = self.postings[k]
                        .by_value
                        .get(value)
                        .map_or(&[][..], Vec::as_slice);
                    result = Some(merge_sorted(bucket, &self.postings[k].wildcard));
                }
                Some(ref mut candidates) => {
                    // A record stays compatible when its own value is empty
                    // (wildcard) or equal to the external value.
                    let values = &self.values[k];
                    candidates.retain(|&position| {
                        let own = &values[position];
                        own.is_empty() || own == value
                    });
                }
            }
        }

        result.unwrap_or_else(|| (0..self.record_count).collect())
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.record_count
    }

    /// True when no records are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Number of distinct non-empty buckets across all blocking fields.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.postings.iter().map(|p| p.by_value.len()).sum()
    }
}

/// Merge two ascending, disjoint position lists into one ascending list.
fn merge_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            merged.push(a[i]);
            i += 1;
        } else {
            merged.push(b[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKING: [Field; 2] = [Field::Dob, Field::Sex];

    fn patient(id: &str, dob: &str, sex: &str) -> Patient {
        let mut p = Patient::new(id);
        p.dob = dob.to_string();
        p.sex = sex.to_string();
        p
    }

    #[test]
    fn test_exact_key_lookup() {
        let internal = vec![
            patient("int-0", "1980-01-01", "M"),
            patient("int-1", "1980-01-01", "F"),
            patient("int-2", "1990-05-05", "M"),
        ];
        let index = CandidateIndex::build(&internal, &BLOCKING);

        let external = patient("ext-0", "1980-01-01", "M");
        assert_eq!(index.candidates(&external), vec![0]);
    }

    #[test]
    fn test_no_bucket_means_no_candidates() {
        let internal = vec![patient("int-0", "1980-01-01", "M")];
        let index = CandidateIndex::build(&internal, &BLOCKING);

        let external = patient("ext-0", "1999-09-09", "M");
        assert!(index.candidates(&external).is_empty());
    }

    #[test]
    fn test_empty_internal_value_is_wildcard() {
        let internal = vec![
            patient("int-0", "", "M"),
            patient("int-1", "1980-01-01", "M"),
            patient("int-2", "1975-02-02", "M"),
        ];
        let index = CandidateIndex::build(&internal, &BLOCKING);

        // The record with no DOB stays a candidate for any external DOB.
        let external = patient("ext-0", "1980-01-01", "M");
        assert_eq!(index.candidates(&external), vec![0, 1]);
    }

    #[test]
    fn test_empty_external_value_does_not_constrain() {
        let internal = vec![
            patient("int-0", "1980-01-01", "M"),
            patient("int-1", "1990-05-05", "M"),
            patient("int-2", "1990-05-05", "F"),
        ];
        let index = CandidateIndex::build(&internal, &BLOCKING);

        // No DOB on the external side: only sex filters.
        let external = patient("ext-0", "", "M");
        assert_eq!(index.candidates(&external), vec![0, 1]);
    }

    #[test]
    fn test_all_wildcards_returns_everything() {
        let internal = vec![
            patient("int-0", "1980-01-01", "M"),
            patient("int-1", "1990-05-05", "F"),
        ];
        let index = CandidateIndex::build(&internal, &BLOCKING);

        let external = patient("ext-0", "", "");
        assert_eq!(index.candidates(&external), vec![0, 1]);
    }

    #[test]
    fn test_blocking_uses_normalized_values() {
        let internal = vec![patient("int-0", "1978-12-02", "M")];
        let index = CandidateIndex::build(&internal, &BLOCKING);

        // DD-MMM-YYYY on the external side normalizes into the same bucket.
        let external = patient("ext-0", "02-Dec-1978", "M");
        assert_eq!(index.candidates(&external), vec![0]);
    }

    #[test]
    fn test_candidates_preserve_input_order() {
        let internal: Vec<Patient> = (0..6)
            .map(|i| patient(&format!("int-{i}"), "1980-01-01", if i % 2 == 0 { "M" } else { "" }))
            .collect();
        let index = CandidateIndex::build(&internal, &BLOCKING);

        let external = patient("ext-0", "1980-01-01", "M");
        assert_eq!(index.candidates(&external), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_index() {
        let index = CandidateIndex::build(&[], &BLOCKING);
        assert!(index.is_empty());
        assert_eq!(index.bucket_count(), 0);
        assert!(index.candidates(&patient("ext-0", "1980-01-01", "M")).is_empty());
    }
}
