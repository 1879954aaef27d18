//! Property-based tests for the similarity metrics and the scorer.
//!
//! Ensures the metric library and normalization handle arbitrary input
//! without panicking, and that the core numeric invariants hold across
//! random inputs.

use proptest::prelude::*;

use patient_matcher::matching::normalize::{normalize, normalize_phone};
use patient_matcher::matching::string_similarity::{
    hybrid_token_similarity, jaro, jaro_winkler, levenshtein_ratio, token_jaccard,
};
use patient_matcher::matching::score_records;
use patient_matcher::{Field, FieldKind, MatcherConfig, Patient};

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

proptest! {
    // 1000 cases: metric invariant checks are fast and benefit from broad
    // input coverage.
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn metrics_are_bounded(a in "\\PC{0,24}", b in "\\PC{0,24}") {
        prop_assert!(in_unit_range(levenshtein_ratio(&a, &b)));
        prop_assert!(in_unit_range(token_jaccard(&a, &b)));
        prop_assert!(in_unit_range(jaro(&a, &b)));
        prop_assert!(in_unit_range(jaro_winkler(&a, &b)));
        prop_assert!(in_unit_range(hybrid_token_similarity(&a, &b, 0.8)));
    }

    #[test]
    fn metrics_are_reflexive(s in "\\PC{0,24}") {
        prop_assert_eq!(levenshtein_ratio(&s, &s), 1.0);
        prop_assert_eq!(jaro(&s, &s), 1.0);
        prop_assert_eq!(jaro_winkler(&s, &s), 1.0);
        prop_assert_eq!(hybrid_token_similarity(&s, &s, 0.8), 1.0);
        // Jaccard lowercases tokens, so reflexivity holds for any casing.
        prop_assert_eq!(token_jaccard(&s, &s), 1.0);
    }

    #[test]
    fn base_metrics_are_symmetric(a in "[a-e ]{0,12}", b in "[a-e ]{0,12}") {
        prop_assert_eq!(levenshtein_ratio(&a, &b), levenshtein_ratio(&b, &a));
        prop_assert_eq!(token_jaccard(&a, &b), token_jaccard(&b, &a));
        prop_assert_eq!(jaro(&a, &b), jaro(&b, &a));
        prop_assert_eq!(jaro_winkler(&a, &b), jaro_winkler(&b, &a));
    }

    #[test]
    fn empty_vs_nonempty_scores_zero(s in "\\PC{1,24}") {
        // Strings of only whitespace normalize to no tokens; skip those for
        // the token metrics, which define emptiness over tokens.
        prop_assert_eq!(levenshtein_ratio("", &s), 0.0);
        prop_assert_eq!(jaro("", &s), 0.0);
        prop_assert_eq!(jaro_winkler("", &s), 0.0);
        if s.split_whitespace().next().is_some() {
            prop_assert_eq!(token_jaccard("", &s), 0.0);
            prop_assert_eq!(hybrid_token_similarity("", &s, 0.8), 0.0);
        }
    }

    #[test]
    fn normalization_is_total(s in "\\PC{0,40}") {
        // No input may panic or produce out-of-alphabet phone output.
        for kind in [
            FieldKind::Date,
            FieldKind::Phone,
            FieldKind::Address,
            FieldKind::Name,
            FieldKind::Exact,
            FieldKind::General,
        ] {
            let _ = normalize(&s, kind);
        }
        prop_assert!(normalize_phone(&s).chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn general_normalization_is_idempotent(s in "\\PC{0,40}") {
        let once = normalize(&s, FieldKind::General);
        prop_assert_eq!(normalize(&once, FieldKind::General), once.clone());
    }

    #[test]
    fn date_normalization_passes_unknown_formats_through(s in "[0-9/]{0,12}") {
        // Nothing slash-separated matches DD-MMM-YYYY, so it passes through
        // trimmed and unchanged.
        prop_assert_eq!(normalize(&s, FieldKind::Date), s.trim().to_string());
    }
}

proptest! {
    // Record scoring exercises the full dispatcher; keep case counts modest.
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn scores_are_bounded_and_total(
        first in "[a-z ]{0,12}",
        last in "[a-z]{0,12}",
        dob in "[0-9-]{0,10}",
        sex in "[mf]{0,1}",
        phone in "[0-9() -]{0,14}",
        address in "[a-z0-9 ]{0,20}",
    ) {
        let config = MatcherConfig::balanced();
        let mut a = Patient::new("ext-prop");
        a.first_name = first.clone();
        a.last_name = last.clone();
        a.dob = dob.clone();
        a.sex = sex.clone();
        a.phone_number = phone.clone();
        a.address = address.clone();

        let mut b = Patient::new("int-prop");
        b.first_name = first;
        b.last_name = last;
        b.dob = dob;
        b.sex = sex;
        b.phone_number = phone;
        b.address = address;

        let score = score_records(&config, &a, &b);
        prop_assert!(in_unit_range(score.value), "value {}", score.value);
        for (field, entry) in &score.breakdown {
            prop_assert!(
                in_unit_range(entry.similarity),
                "field {field} similarity {}",
                entry.similarity
            );
        }
    }

    #[test]
    fn identical_records_with_full_critical_fields_score_high(
        first in "[a-z]{1,12}",
        last in "[a-z]{1,12}",
    ) {
        let config = MatcherConfig::balanced();
        let mut p = Patient::new("prop");
        p.first_name = first;
        p.last_name = last;
        p.dob = "1980-01-01".to_string();
        p.sex = "f".to_string();

        let score = score_records(&config, &p, &p.clone());
        // All present fields identical, the rest neutral: the weighted
        // aggregate is bounded below by the identical fields' share.
        prop_assert!(score.value > 0.8, "got {}", score.value);
        prop_assert!(score.early_exit.is_none());
    }

    #[test]
    fn blocking_never_excludes_wildcard_records(
        dob in "[0-9-]{0,10}",
        sex in "[mf]{0,1}",
    ) {
        use patient_matcher::CandidateIndex;

        let mut blank = Patient::new("int-blank");
        blank.first_name = "pat".to_string();
        let internal = vec![blank];
        let index = CandidateIndex::build(&internal, &[Field::Dob, Field::Sex]);

        let mut external = Patient::new("ext-prop");
        external.dob = dob;
        external.sex = sex;
        // A record with empty blocking values is compatible with any key.
        prop_assert_eq!(index.candidates(&external), vec![0]);
    }
}
