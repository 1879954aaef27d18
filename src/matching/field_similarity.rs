//! Field-aware similarity dispatch.
//!
//! Maps a (field, declared kind) pair to the right metric and applies
//! field-specific policy: phone suffix credit, address component matching,
//! first-name/middle-name handling, strict last-name comparison.

use crate::config::SimilarityTunables;
use crate::model::{Field, FieldKind, FieldSimilarity, SimilarityMetric};

use super::normalize::normalize;
use super::string_similarity::{
    hybrid_token_similarity, jaro_winkler, levenshtein_ratio, token_jaccard,
};

/// Compare two field values.
///
/// Both values are normalized for the field's intrinsic kind first
/// (normalization is idempotent, so pre-normalized input is fine). Policy, in
/// priority order: empty, exact, field-specific override, declared-kind
/// fallback.
#[must_use]
pub fn field_similarity(
    value1: &str,
    value2: &str,
    declared: FieldKind,
    field: Field,
    tunables: &SimilarityTunables,
) -> FieldSimilarity {
    let kind = field.normalization_kind();
    let norm1 = normalize(value1, kind);
    let norm2 = normalize(value2, kind);

    if norm1.is_empty() || norm2.is_empty() {
        return FieldSimilarity::new(0.0, SimilarityMetric::Empty);
    }
    if norm1 == norm2 {
        return FieldSimilarity::new(1.0, SimilarityMetric::Exact);
    }

    // Field-specific overrides apply regardless of the declared kind.
    match field {
        Field::PhoneNumber => phone_similarity(&norm1, &norm2, tunables),
        Field::Address => address_similarity(&norm1, &norm2, tunables),
        Field::FirstName => first_name_similarity(&norm1, &norm2, tunables),
        Field::LastName => last_name_similarity(&norm1, &norm2, tunables),
        _ => match declared {
            FieldKind::Exact => FieldSimilarity::new(0.0, SimilarityMetric::ExactKind),
            _ => general_similarity(&norm1, &norm2, tunables),
        },
    }
}

/// Phone comparison over digits-only strings.
///
/// A local number recorded without its area code appears as a trailing
/// suffix of the full number and earns fixed partial credit; numbers sharing
/// only an area code earn a smaller fixed credit.
fn phone_similarity(a: &str, b: &str, tunables: &SimilarityTunables) -> FieldSimilarity {
    if a.ends_with(b) || b.ends_with(a) {
        return FieldSimilarity::new(tunables.phone_partial_match, SimilarityMetric::PhoneSuffix);
    }

    if a.len() == 10 && b.len() == 10 && a[..3] == b[..3] {
        return FieldSimilarity::new(
            tunables.phone_area_code_match,
            SimilarityMetric::PhoneAreaCode,
        );
    }

    let ratio = levenshtein_ratio(a, b);
    if ratio >= tunables.phone_ratio_floor {
        FieldSimilarity::new(ratio, SimilarityMetric::EditDistanceRatio)
    } else {
        FieldSimilarity::new(0.0, SimilarityMetric::EditDistanceRatio)
    }
}

/// Address comparison over normalized base addresses.
fn address_similarity(a: &str, b: &str, tunables: &SimilarityTunables) -> FieldSimilarity {
    let (number1, street1) = parse_address(a);
    let (number2, street2) = parse_address(b);

    if !number1.is_empty() && number1 == number2 && !street1.is_empty() && street1 == street2 {
        return FieldSimilarity::new(1.0, SimilarityMetric::AddressComponents);
    }
    if !street1.is_empty() && street1 == street2 {
        return FieldSimilarity::new(
            tunables.address_base_match,
            SimilarityMetric::AddressComponents,
        );
    }
    if !number1.is_empty() && number1 == number2 {
        return FieldSimilarity::new(
            tunables.address_number_match,
            SimilarityMetric::AddressComponents,
        );
    }

    let hybrid = hybrid_token_similarity(a, b, tunables.token_match_threshold);
    let damped = levenshtein_ratio(a, b) * tunables.address_multiplier;
    FieldSimilarity::new(hybrid.max(damped), SimilarityMetric::HybridToken)
}

/// Split a normalized address into street number and street name (up to the
/// first two street tokens).
fn parse_address(address: &str) -> (String, String) {
    let tokens: Vec<&str> = address.split_whitespace().collect();
    let has_number = tokens
        .first()
        .is_some_and(|t| t.chars().all(|c| c.is_ascii_digit()));

    let (number, rest) = if has_number {
        (tokens[0].to_string(), &tokens[1..])
    } else {
        (String::new(), &tokens[..])
    };

    let street = rest[..rest.len().min(2)].join(" ");
    (number, street)
}

/// First-name comparison with middle-name awareness.
fn first_name_similarity(a: &str, b: &str, tunables: &SimilarityTunables) -> FieldSimilarity {
    let tokens1: Vec<&str> = a.split_whitespace().collect();
    let tokens2: Vec<&str> = b.split_whitespace().collect();
    let first_token_eq = matches!(
        (tokens1.first(), tokens2.first()),
        (Some(x), Some(y)) if x == y
    );

    // "john" vs "john michael": the single token is the first name, the rest
    // a middle name.
    let middle_name_case = (tokens1.len() == 1 && tokens2.len() > 1)
        || (tokens2.len() == 1 && tokens1.len() > 1);
    if first_token_eq && middle_name_case {
        return FieldSimilarity::new(
            tunables.first_name_middle_name,
            SimilarityMetric::FirstMiddleName,
        );
    }
    if first_token_eq {
        return FieldSimilarity::new(tunables.first_name_match, SimilarityMetric::FirstTokenMatch);
    }

    let similarity = jaro_winkler(a, b);
    if similarity >= tunables.first_name_match {
        FieldSimilarity::new(similarity, SimilarityMetric::JaroWinkler)
    } else {
        FieldSimilarity::new(0.0, SimilarityMetric::JaroWinkler)
    }
}

/// Last-name comparison: Jaro-Winkler, floored to zero below a high bar.
fn last_name_similarity(a: &str, b: &str, tunables: &SimilarityTunables) -> FieldSimilarity {
    let similarity = jaro_winkler(a, b);
    if similarity >= tunables.last_name_match {
        FieldSimilarity::new(similarity, SimilarityMetric::JaroWinkler)
    } else {
        FieldSimilarity::new(0.0, SimilarityMetric::JaroWinkler)
    }
}

/// Fallback for fields without a dedicated policy. Multi-word values take
/// the greater of token overlap and a damped edit-distance ratio.
fn general_similarity(a: &str, b: &str, tunables: &SimilarityTunables) -> FieldSimilarity {
    if a.contains(' ') || b.contains(' ') {
        let token = token_jaccard(a, b);
        let damped = levenshtein_ratio(a, b) * tunables.general_multiplier;
        if token >= damped {
            FieldSimilarity::new(token, SimilarityMetric::TokenOverlap)
        } else {
            FieldSimilarity::new(damped, SimilarityMetric::EditDistanceRatio)
        }
    } else {
        FieldSimilarity::new(levenshtein_ratio(a, b), SimilarityMetric::EditDistanceRatio)
    }
}
