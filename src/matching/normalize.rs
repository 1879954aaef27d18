//! Field normalization for patient matching.
//!
//! Normalization canonicalizes a raw field value into a comparable form
//! based on the field's semantic kind. It is lenient by construction: input
//! that cannot be parsed for a structured field degrades to the trimmed
//! original value, never to an error.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::model::FieldKind;

/// `DD-MMM-YYYY`, e.g. `02-Dec-1978`. Anything else passes through.
static DMY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}-[A-Za-z]{3}-\d{4}$").expect("static regex"));

/// An address that begins directly with an apartment/unit marker has no
/// street component and normalizes to the empty string.
static LEADING_UNIT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:apt|apartment|suite|ste|unit)\b|#)").expect("static regex")
});

/// A house number with optional leading zeros and nothing else.
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0*\d+$").expect("static regex"));

/// Leading zeros on a house number, including hyphenated ones like `0456-B`.
static LEADING_ZEROS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+(\d[\w\-]*)").expect("static regex"));

/// Apartment/unit/suite marker; everything from the marker on is discarded.
static UNIT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:apt|apartment|suite|ste|unit)\b|#").expect("static regex")
});

static TRAILING_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,\.]+$").expect("static regex"));

/// Common address word forms rewritten to standard abbreviations.
static ABBREVIATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let words = ABBREVIATIONS
        .iter()
        .map(|(word, _)| *word)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{words})\b")).expect("static regex")
});

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("street", "st"),
    ("stret", "st"), // common typo
    ("avenue", "ave"),
    ("boulevard", "blvd"),
    ("drive", "dr"),
    ("place", "pl"),
    ("court", "ct"),
    ("apartment", "apt"),
    ("lane", "ln"),
    ("unit", "u"),
    ("suite", "ste"),
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
];

/// Normalize a raw field value according to its semantic kind.
///
/// Total over all string input; malformed values degrade to the trimmed
/// original rather than failing.
#[must_use]
pub fn normalize(value: &str, kind: FieldKind) -> String {
    match kind {
        FieldKind::Date => normalize_date(value),
        FieldKind::Phone => normalize_phone(value),
        FieldKind::Address => normalize_address(value),
        FieldKind::Name | FieldKind::Exact | FieldKind::General => normalize_text(value),
    }
}

/// Rewrite `DD-MMM-YYYY` dates to `YYYY-MM-DD`; leave any other format
/// unchanged. Intentionally asymmetric: callers must not assume every date
/// ends up canonical.
#[must_use]
pub fn normalize_date(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || !DMY_DATE.is_match(trimmed) {
        return trimmed.to_string();
    }

    match NaiveDate::parse_from_str(trimmed, "%d-%b-%Y") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => {
            tracing::warn!(
                date = trimmed,
                "date matched DD-MMM-YYYY pattern but failed to parse"
            );
            trimmed.to_string()
        }
    }
}

/// Strip all non-digit characters from a phone number.
#[must_use]
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Reduce an address to its base form: leading zeros stripped from the house
/// number, apartment/unit/suite information removed, trailing punctuation
/// dropped, whitespace collapsed.
#[must_use]
pub fn extract_base_address(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || LEADING_UNIT_MARKER.is_match(trimmed) {
        return String::new();
    }

    // Just a house number, possibly with leading zeros.
    if BARE_NUMBER.is_match(trimmed) {
        let stripped = trimmed.trim_start_matches('0');
        return if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        };
    }

    let no_zeros = LEADING_ZEROS.replace(trimmed, "$1").into_owned();
    let base = match UNIT_MARKER.find(&no_zeros) {
        Some(marker) => &no_zeros[..marker.start()],
        None => no_zeros.as_str(),
    };
    let base = TRAILING_PUNCTUATION.replace(base, "");
    collapse_whitespace(&base)
}

/// Normalize an address for comparison: base address, lowercased, standard
/// abbreviations, punctuation (except hyphens) replaced with spaces.
#[must_use]
pub fn normalize_address(value: &str) -> String {
    let base = extract_base_address(value);
    if base.is_empty() {
        return String::new();
    }

    let lowered = base.to_lowercase();
    let abbreviated = ABBREVIATION_PATTERN.replace_all(&lowered, |caps: &regex::Captures| {
        abbreviation(&caps[0]).to_string()
    });

    let cleaned: String = abbreviated
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&cleaned)
}

/// General text normalization: lowercase, punctuation stripped, whitespace
/// collapsed.
#[must_use]
pub fn normalize_text(value: &str) -> String {
    let cleaned: String = value
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c.is_whitespace())
        .collect();
    collapse_whitespace(&cleaned)
}

fn abbreviation(word: &str) -> &'static str {
    ABBREVIATIONS
        .iter()
        .find(|(full, _)| *full == word)
        .map_or("", |(_, abbr)| abbr)
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
