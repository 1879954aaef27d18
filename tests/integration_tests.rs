//! Integration tests for patient-matcher
//!
//! These tests verify end-to-end behavior of normalization, blocking,
//! scoring, and match selection across the public API.

use patient_matcher::{
    CandidateIndex, Field, MatcherConfig, Patient, PatientMatcher, PenaltyApplied,
};

// ============================================================================
// Test Fixtures
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

#[allow(clippy::too_many_arguments)]
fn patient(
    id: &str,
    first: &str,
    last: &str,
    dob: &str,
    sex: &str,
    phone: &str,
    address: &str,
    city: &str,
    zip: &str,
) -> Patient {
    let mut p = Patient::new(id);
    p.first_name = first.to_string();
    p.last_name = last.to_string();
    p.dob = dob.to_string();
    p.sex = sex.to_string();
    p.phone_number = phone.to_string();
    p.address = address.to_string();
    p.city = city.to_string();
    p.zipcode = zip.to_string();
    p
}

fn john_internal() -> Patient {
    patient(
        "int-john",
        "John",
        "Doe",
        "02-Dec-1978",
        "M",
        "(555) 123-4567",
        "00123 Main Street Apt 4",
        "Springfield",
        "12345",
    )
}

// ============================================================================
// Matching Scenarios
// ============================================================================

mod matching_scenarios {
    use super::*;

    #[test]
    fn test_typo_in_first_name_still_matches() {
        init_tracing();
        let matcher = PatientMatcher::default();
        // "Jon" for "John", otherwise the same person with the DOB recorded
        // in a different legacy format.
        let external = patient(
            "ext-jon",
            "Jon",
            "Doe",
            "1978-12-02",
            "M",
            "",
            "",
            "",
            "",
        );

        let matches = matcher.match_records(&[john_internal()], &[external]);
        assert_eq!(matches.len(), 1, "John/Jon with matching DOB must link");
        let m = &matches[0];
        assert_eq!(m.id_pair(), ("ext-jon", "int-john"));
        assert!(
            m.score.value >= matcher.config().match_threshold,
            "score {} below threshold",
            m.score.value
        );
    }

    #[test]
    fn test_dob_mismatch_is_blocked_before_scoring() {
        let matcher = PatientMatcher::default();
        let external = patient(
            "ext-0", "Greta", "Jones", "1990-01-01", "F", "", "", "", "",
        );
        let internal = patient(
            "int-0", "Amelia", "Brown", "1980-01-01", "F", "", "", "", "",
        );

        // Blocking yields no candidates, so the pair is never scored.
        let index = CandidateIndex::build(
            std::slice::from_ref(&internal),
            &matcher.config().blocking_fields,
        );
        assert!(index.candidates(&external).is_empty());
        assert!(matcher
            .match_records(&[internal], &[external])
            .is_empty());
    }

    #[test]
    fn test_empty_collections() {
        let matcher = PatientMatcher::default();
        assert!(matcher.match_records(&[], &[john_internal()]).is_empty());
        assert!(matcher.match_records(&[john_internal()], &[]).is_empty());
        let empty: [Patient; 0] = [];
        assert!(matcher.match_records(&empty, &empty).is_empty());
    }

    #[test]
    fn test_two_externals_may_claim_one_internal() {
        let matcher = PatientMatcher::default();
        let ext_a = patient(
            "ext-a", "John", "Doe", "1978-12-02", "M", "", "", "", "",
        );
        let ext_b = patient(
            "ext-b", "John M", "Doe", "1978-12-02", "M", "", "", "", "",
        );

        let matches = matcher.match_records(&[john_internal()], &[ext_a, ext_b]);
        assert_eq!(
            matches.len(),
            2,
            "no internal-side exclusivity: both externals may match"
        );
        assert_eq!(matches[0].id_pair(), ("ext-a", "int-john"));
        assert_eq!(matches[1].id_pair(), ("ext-b", "int-john"));
    }

    #[test]
    fn test_weak_pair_in_same_bucket_is_rejected_by_threshold() {
        let matcher = PatientMatcher::default();
        // Same DOB and sex, but a completely different identity.
        let external = patient(
            "ext-0",
            "Wilhelmina",
            "Vanderbilt",
            "02-Dec-1978",
            "M",
            "9998887777",
            "77 Cedar Grove",
            "Shelbyville",
            "99999",
        );

        let matches = matcher.match_records(&[john_internal()], &[external]);
        assert!(matches.is_empty(), "dissimilar identity must not link");
    }

    #[test]
    fn test_normalization_bridges_formatting_differences() {
        let matcher = PatientMatcher::default();
        // Same person, every field recorded with different formatting.
        let external = patient(
            "ext-0",
            "JOHN",
            "doe",
            "1978-12-02",
            "m",
            "555.123.4567",
            "123 Main St",
            "springfield",
            "12345",
        );

        let matches = matcher.match_records(&[john_internal()], &[external]);
        assert_eq!(matches.len(), 1);
        assert!(
            (matches[0].score.value - 1.0).abs() < 1e-9,
            "formatting-only differences should score 1.0, got {}",
            matches[0].score.value
        );
    }
}

// ============================================================================
// Score Semantics
// ============================================================================

mod score_semantics {
    use super::*;

    #[test]
    fn test_sex_mismatch_costs_exactly_the_penalty_factor() {
        let matcher = PatientMatcher::default();
        let external = john_internal();
        let mut flipped = john_internal();
        flipped.sex = "F".to_string();

        let baseline = matcher.score_pair(&external, &john_internal());
        let penalized = matcher.score_pair(&external, &flipped);

        let factor = matcher.config().penalties.sex_mismatch_factor;
        assert!(
            (penalized.value - baseline.value * factor).abs() < 1e-9,
            "expected {} * {factor}, got {}",
            baseline.value,
            penalized.value
        );
        assert!(penalized.value < baseline.value);
        assert_eq!(
            penalized.penalties,
            vec![PenaltyApplied::SexMismatch { factor }]
        );
    }

    #[test]
    fn test_breakdown_explains_the_match() {
        let matcher = PatientMatcher::default();
        let external = patient(
            "ext-0", "Jon", "Doe", "1978-12-02", "M", "", "", "", "",
        );

        let matches = matcher.match_records(&[john_internal()], &[external]);
        let score = &matches[0].score;

        // Every configured field appears with similarity, weight, and the
        // metric that produced it.
        assert_eq!(score.breakdown.len(), Field::ALL.len());
        let first_name = &score.breakdown[&Field::FirstName];
        assert!(first_name.similarity > 0.9 && first_name.similarity < 1.0);
        assert!((first_name.weighted - first_name.similarity * first_name.weight).abs() < 1e-9);
        assert_eq!(score.breakdown[&Field::Dob].similarity, 1.0);

        // The summary is printable for review UIs.
        assert!(score.summary().contains("first_name"));
    }

    #[test]
    fn test_missing_critical_dob_disqualifies_candidate() {
        let matcher = PatientMatcher::default();
        let mut internal = john_internal();
        internal.dob = String::new();
        let external = patient(
            "ext-0", "John", "Doe", "1978-12-02", "M", "", "", "", "",
        );

        // The internal record survives blocking (missing DOB is a wildcard)
        // but DOB is critical, so scoring disqualifies the pair.
        let index = CandidateIndex::build(
            std::slice::from_ref(&internal),
            &matcher.config().blocking_fields,
        );
        assert_eq!(index.candidates(&external).len(), 1);

        let score = matcher.score_pair(&external, &internal);
        assert_eq!(score.value, 0.0);
        assert_eq!(
            score.early_exit.expect("disqualified").field,
            Field::Dob
        );
        assert!(matcher.match_records(&[internal], &[external]).is_empty());
    }

    #[test]
    fn test_serialized_match_carries_ids_and_breakdown() {
        let matcher = PatientMatcher::default();
        let external = patient(
            "ext-0", "John", "Doe", "1978-12-02", "M", "", "", "", "",
        );
        let matches = matcher.match_records(&[john_internal()], &[external]);

        let json = serde_json::to_value(&matches[0]).expect("match serializes");
        assert_eq!(json["external"]["patient_id"], "ext-0");
        assert_eq!(json["internal"]["patient_id"], "int-john");
        assert!(json["score"]["breakdown"]["last_name"]["similarity"].is_number());
    }
}

// ============================================================================
// Configuration Behavior
// ============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_threshold_gates_acceptance() {
        let external = patient(
            "ext-0", "Jane", "Doe", "1978-12-02", "F", "", "", "", "",
        );
        let mut internal = john_internal();
        internal.first_name = "Jane".to_string();
        internal.sex = "F".to_string();

        let permissive = PatientMatcher::new(MatcherConfig::permissive());
        let strict = PatientMatcher::new(MatcherConfig::strict());

        let score = permissive.score_pair(&external, &internal);
        assert!(
            score.value >= permissive.config().match_threshold
                && score.value < strict.config().match_threshold,
            "fixture should sit between the thresholds, got {}",
            score.value
        );

        assert_eq!(
            permissive
                .match_records(std::slice::from_ref(&internal), std::slice::from_ref(&external))
                .len(),
            1
        );
        assert!(strict
            .match_records(std::slice::from_ref(&internal), std::slice::from_ref(&external))
            .is_empty());
    }

    #[test]
    fn test_custom_blocking_fields() {
        let mut config = MatcherConfig::balanced();
        config.blocking_fields = vec![Field::Zipcode];
        config.critical_fields.clear();
        let matcher = PatientMatcher::new(config);

        // DOB differs, so default blocking would exclude the pair; zipcode
        // blocking keeps it.
        let external = patient(
            "ext-0", "John", "Doe", "", "M", "", "123 Main St", "Springfield", "12345",
        );
        let matches = matcher.match_records(&[john_internal()], &[external]);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_config_loaded_from_json_drives_matching() {
        let config = patient_matcher::config::from_json_str(
            r#"{"match_threshold": 0.99, "critical_fields": ["dob", "last_name"]}"#,
        )
        .expect("config loads");
        assert_eq!(config.match_threshold, 0.99);
        let matcher = PatientMatcher::new(config);

        let external = patient(
            "ext-0", "Jon", "Doe", "1978-12-02", "M", "", "", "", "",
        );
        // 0.99 bar: the Jon/John pair no longer clears it.
        assert!(matcher
            .match_records(&[john_internal()], &[external])
            .is_empty());
    }
}
