//! Similarity scoring for chat lines against known quotes.
//!
//! The score is a plain normalized Levenshtein ratio over the whole line.
//! There is no partial-substring or token-set component, so a quote
//! embedded in a longer line (an extra prefix, a trailing remark) is
//! penalized for every extra character and usually falls below the
//! threshold. Announcements carry the quote alone, which is what this
//! scorer is tuned for.

use strsim::generic_levenshtein;

/// Lowercase, turn anything that is not a letter or digit into a space,
/// and collapse whitespace runs.
///
/// Works for CJK too: ideographs and kana count as alphanumeric, so only
/// punctuation like `！` and `、` is dropped.
pub fn normalize(text: &str) -> String {
    let spaced: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Similarity of two strings on a 0-100 scale.
///
/// Both sides are [`normalize`]d first; the score is the Levenshtein
/// similarity over characters, rounded. Identical inputs score 100; if
/// either side normalizes to nothing the score is 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let distance = generic_levenshtein(&a, &b);
    let longest = a.len().max(b.len());
    let similarity = 1.0 - distance as f64 / longest as f64;
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Best-scoring candidate for `query`.
///
/// Candidates are scanned in order and only a strictly higher score
/// replaces the current best, so a tie keeps the earliest candidate.
/// Returns the candidate's index and score.
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<(usize, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, u8)> = None;
    for (idx, candidate) in candidates.into_iter().enumerate() {
        let score = ratio(query, candidate);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
        if score == 100 {
            break;
        }
    }
    best
}
