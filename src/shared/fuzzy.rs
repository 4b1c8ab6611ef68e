//! Name similarity used to pick the closest station among search results.

/// Levenshtein distance over chars, keeping a single row of the table.
pub(crate) fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ca != *cb));
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Token-wise similarity of two names in `0.0..=1.0`, case-insensitive.
/// Tokens are compared by position; missing hay tokens score zero.
pub(crate) fn score(needle: &str, hay: &str) -> f64 {
    let needle = needle.to_lowercase();
    let hay = hay.to_lowercase();
    let tokens = needle.split_whitespace().count();
    if tokens == 0 {
        return 0.0;
    }
    let total: f64 = needle
        .split_whitespace()
        .zip(hay.split_whitespace())
        .map(|(n, h)| token_score(n, h))
        .sum();
    total / tokens as f64
}

fn token_score(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    1.0 - distance(a, b) as f64 / longest as f64
}

#[test]
fn fuzzy_empty_vs_empty() {
    let dist = distance("", "");
    assert_eq!(dist, 0);
}

#[test]
fn fuzzy_substitution() {
    let dist = distance("cat", "cut");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_unicode_distinct() {
    let dist = distance("allé", "alle");
    assert_eq!(dist, 1);
}

#[test]
fn score_ignores_case() {
    assert_eq!(score("Kildedal St.", "kildedal st."), 1.0);
}

#[test]
fn score_prefers_closer_name() {
    assert!(score("fuglsang alle", "Fuglsang Allé") > score("fuglsang alle", "Fuglebakken"));
}

#[test]
fn fuzzy_insertion() {
    assert_eq!(distance("fuglsang", "fuglsangs"), 1);
    assert_eq!(distance("", "abc"), 3);
}

#[test]
fn score_missing_tokens() {
    assert_eq!(score("kildedal st.", "kildedal"), 0.5);
    assert_eq!(score("   ", "kildedal"), 0.0);
}
