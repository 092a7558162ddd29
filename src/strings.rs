use unicode_normalization::UnicodeNormalization;

/// Words kept lowercase by [`title_case`] unless they open or close the title.
pub const DEFAULT_TITLE_EXCEPTIONS: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "from", "by", "of", "in",
];

pub const DEFAULT_SLUG_SEPARATOR: &str = "-";

/// URL slug joined with `-`: `"Hello World!"` becomes `"hello-world"`.
pub fn slugify(text: &str) -> String {
    slugify_with(text, DEFAULT_SLUG_SEPARATOR)
}

/// URL slug with a custom separator.
///
/// Text is NFKD-normalized so accents split off their letters, non-ASCII characters are then dropped, letters are lowercased, punctuation other than
/// `_` and `-` is removed, and each run of whitespace or `-` becomes one `separator`.
/// Leading and trailing separator characters are trimmed.
pub fn slugify_with(text: &str, separator: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_gap = false;
    for ch in text.nfkd().filter(char::is_ascii) {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_whitespace() || ch == '-' {
            pending_gap = true;
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_gap {
                slug.push_str(separator);
                pending_gap = false;
            }
            slug.push(ch);
        }
    }
    slug.trim_matches(|c: char| separator.contains(c)).to_string()
}

/// Title case with the default exception list.
pub fn title_case(text: &str) -> String {
    title_case_with_exceptions(text, DEFAULT_TITLE_EXCEPTIONS)
}

/// Capitalize every word except the listed ones; the first and last words are always
/// capitalized. Words are rejoined with single spaces.
pub fn title_case_with_exceptions(text: &str, exceptions: &[&str]) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let last = words.len().saturating_sub(1);
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i != 0 && i != last && exceptions.contains(&lower.as_str()) {
                lower
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Words in reverse order, joined with single spaces.
pub fn reverse_words(text: &str) -> String {
    text.split_whitespace().rev().collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
