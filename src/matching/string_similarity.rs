//! String similarity metrics for record linkage.
//!
//! Every function here is pure, total (defined for empty strings), and
//! returns a score in `[0.0, 1.0]`. Edit distance comes from `strsim`; the
//! Jaro family is implemented in-crate because the prefix-bonus gate and
//! match-window semantics must be exact and reproducible.

use std::collections::HashSet;
use strsim::levenshtein;

/// Winkler prefix bonus per common leading character.
const WINKLER_PREFIX_WEIGHT: f64 = 0.1;
/// The prefix bonus applies only when the raw Jaro score reaches this gate.
const WINKLER_BONUS_GATE: f64 = 0.7;
/// At most this many leading characters count toward the prefix bonus.
const WINKLER_MAX_PREFIX: usize = 4;

/// Normalized Levenshtein similarity: `1 - distance / max(len)`.
///
/// Two empty strings are identical (1.0); one empty vs one non-empty is 0.0.
#[must_use]
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Token-set (Jaccard) overlap on whitespace-separated lowercase tokens.
#[must_use]
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let tokens_b: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Jaro similarity: three-term formula over matched characters within a
/// window of `max(len1, len2) / 2 - 1` (floored at zero).
#[must_use]
pub fn jaro(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let s1: Vec<char> = a.chars().collect();
    let s2: Vec<char> = b.chars().collect();
    let (len1, len2) = (s1.len(), s2.len());
    let window = (len1.max(len2) / 2).saturating_sub(1);

    let mut matched1 = vec![false; len1];
    let mut matched2 = vec![false; len2];
    let mut matches = 0usize;

    for i in 0..len1 {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(len2);
        for j in start..end {
            if !matched2[j] && s1[i] == s2[j] {
                matched1[i] = true;
                matched2[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Transpositions: matched characters compared in original order.
    let mut transpositions = 0usize;
    let mut k = 0usize;
    for i in 0..len1 {
        if !matched1[i] {
            continue;
        }
        while !matched2[k] {
            k += 1;
        }
        if s1[i] != s2[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    (m / len1 as f64 + m / len2 as f64 + (m - transpositions as f64 / 2.0) / m) / 3.0
}

/// Jaro-Winkler similarity: Jaro plus a common-prefix bonus of up to four
/// leading characters, applied only when the raw Jaro score is at least 0.7.
#[must_use]
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let jaro_score = jaro(a, b);
    if jaro_score < WINKLER_BONUS_GATE {
        return jaro_score;
    }

    let prefix = a
        .chars()
        .zip(b.chars())
        .take(WINKLER_MAX_PREFIX)
        .take_while(|(x, y)| x == y)
        .count();

    prefix as f64 * WINKLER_PREFIX_WEIGHT * (1.0 - jaro_score) + jaro_score
}

/// Hybrid token-level Jaccard-Levenshtein similarity for multi-word fields.
///
/// Each token of the first string is greedily paired with its best-scoring
/// unmatched token of the second, counting a pair only when the edit-distance
/// ratio reaches `token_threshold`. The result is
/// `pairs / (|tokens1| + |tokens2| - pairs)`, tolerating token reordering and
/// minor misspellings that plain Jaccard or Levenshtein would miss.
///
/// Tokens are sorted before pairing so the greedy pass is deterministic.
#[must_use]
pub fn hybrid_token_similarity(a: &str, b: &str, token_threshold: f64) -> f64 {
    let tokens_a = sorted_tokens(a);
    let tokens_b = sorted_tokens(b);

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let mut claimed = vec![false; tokens_b.len()];
    let mut pairs = 0usize;

    for token in &tokens_a {
        let best = tokens_b
            .iter()
            .enumerate()
            .filter(|(j, _)| !claimed[*j])
            .map(|(j, candidate)| (j, levenshtein_ratio(token, candidate)))
            .max_by(|(_, x), (_, y)| x.total_cmp(y));

        if let Some((j, score)) = best {
            if score >= token_threshold {
                claimed[j] = true;
                pairs += 1;
            }
        }
    }

    let union = tokens_a.len() + tokens_b.len() - pairs;
    if union > 0 {
        pairs as f64 / union as f64
    } else {
        1.0
    }
}

fn sorted_tokens(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}
