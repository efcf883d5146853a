//! Case-insensitive literal matching and excerpt extraction.
//!
//! Positions are character indices, not byte offsets, so excerpts never
//! split a multi-byte character. Case folding is per character (first
//! lower-case mapping), which keeps folded and original text aligned.

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn folded(text: &str) -> Vec<char> {
    text.chars().map(fold).collect()
}

fn find_folded(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Character index of the first case-insensitive occurrence of `needle`.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    find_folded(&folded(haystack), &folded(needle))
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

/// Number of non-overlapping case-insensitive occurrences of `needle`.
pub fn count_ignore_case(haystack: &str, needle: &str) -> usize {
    let needle = folded(needle);
    if needle.is_empty() {
        return 0;
    }
    let haystack = folded(haystack);
    let mut count = 0;
    let mut start = 0;
    while let Some(offset) = find_folded(&haystack[start..], &needle) {
        count += 1;
        start += offset + needle.len();
    }
    count
}

/// Excerpt around the first case-insensitive occurrence of `needle`:
/// `radius` characters either side, with `...` marking a cut at either end.
/// Without an occurrence, the first `fallback_len` characters.
pub fn extract_snippet(content: &str, needle: &str, radius: usize, fallback_len: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    let needle_len = needle.chars().count();
    match find_folded(&folded(content), &folded(needle)) {
        Some(start) if needle_len > 0 => window(&chars, start, start + needle_len, radius, true),
        _ => chars.iter().take(fallback_len).collect(),
    }
}

/// Excerpt around the character span `start..end`, with ellipses.
pub fn snippet_around(content: &str, start: usize, end: usize, radius: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    window(&chars, start, end, radius, true)
}

/// Up to `radius` characters either side of the first occurrence of `token`,
/// without ellipses. `None` when the token does not occur.
pub fn highlight(content: &str, token: &str, radius: usize) -> Option<String> {
    let token_len = token.chars().count();
    if token_len == 0 {
        return None;
    }
    let chars: Vec<char> = content.chars().collect();
    let start = find_folded(&folded(content), &folded(token))?;
    Some(window(&chars, start, start + token_len, radius, false))
}

fn window(chars: &[char], start: usize, end: usize, radius: usize, ellipses: bool) -> String {
    let from = start.saturating_sub(radius);
    let to = end.saturating_add(radius).min(chars.len());
    let from = from.min(to);

    let mut excerpt = String::new();
    if ellipses && from > 0 {
        excerpt.push_str("...");
    }
    excerpt.extend(&chars[from..to]);
    if ellipses && to < chars.len() {
        excerpt.push_str("...");
    }
    excerpt
}
