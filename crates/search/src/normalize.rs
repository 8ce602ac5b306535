//! Search text normalization.

/// Normalize text for search matching.
///
/// Lowercases, folds `ё` into `е`, turns every character outside
/// `[a-z0-9а-я]` into a separator, collapses separators to one space
/// and trims both ends. Idempotent.
///
/// # Example
/// ```
/// use parfum_search::normalize;
///
/// assert_eq!(normalize("  Ёлка — Tom Ford!! "), "елка tom ford");
/// ```
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        let ch = if ch == 'ё' { 'е' } else { ch };
        if is_search_char(ch) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Split normalized text into its space-separated tokens.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|t| !t.is_empty())
}

#[inline]
fn is_search_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ('а'..='я').contains(&ch)
}
