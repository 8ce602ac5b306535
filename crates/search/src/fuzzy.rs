//! Fuzzy matching algorithms.

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Check if every character of `needle` appears in `haystack` in order.
///
/// The characters need not be consecutive. Empty inputs never match.
///
/// # Example
/// ```
/// use parfum_search::is_subsequence;
///
/// assert!(is_subsequence("brgmt", "bergamot"));
/// assert!(!is_subsequence("tmgreb", "bergamot"));
/// ```
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    if needle.is_empty() || haystack.is_empty() {
        return false;
    }

    let mut hay_chars = haystack.chars();
    needle
        .chars()
        .all(|needle_char| hay_chars.any(|c| c == needle_char))
}

/// Edits tolerated for a needle of `len` characters, if fuzzy distance applies at all.
#[inline]
fn max_edits(len: usize) -> Option<usize> {
    match len {
        0..=3 => None,
        4..=6 => Some(1),
        _ => Some(2),
    }
}

/// Decide whether a query token matches a single haystack token.
///
/// First rule that holds wins:
/// 1. `haystack` contains `needle`
/// 2. needles of 3+ characters that are a subsequence of `haystack`
/// 3. needles of 4+ characters within 1 edit (up to 6 chars) or 2 edits
///
/// Short needles only match as substrings, they carry too little signal
/// to survive looser rules.
pub fn token_matches(needle: &str, haystack: &str) -> bool {
    if needle.is_empty() || haystack.is_empty() {
        return false;
    }
    if haystack.contains(needle) {
        return true;
    }

    let needle_len = needle.chars().count();
    if needle_len >= 3 && is_subsequence(needle, haystack) {
        return true;
    }

    match max_edits(needle_len) {
        Some(limit) => {
            // distance is never below the length gap
            let hay_len = haystack.chars().count();
            needle_len.abs_diff(hay_len) <= limit && levenshtein_distance(needle, haystack) <= limit
        }
        None => false,
    }
}
