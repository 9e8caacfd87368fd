//! Display-name normalization.

/// Normalizes a raw display name.
///
/// Trims leading and trailing whitespace, collapses internal whitespace
/// runs to single spaces, and capitalizes each word (first character
/// uppercased, remainder lowercased).
///
/// Idempotent: `normalize_name(normalize_name(x)) == normalize_name(x)`.
/// Empty or whitespace-only input yields an empty string; callers must
/// reject an empty result as invalid.
///
/// # Example
///
/// ```rust
/// use pricebook_model::normalize_name;
///
/// assert_eq!(normalize_name("  apple   juice "), "Apple Juice");
/// ```
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    // Characters whose uppercase form expands to multiple characters
    // (e.g. 'ß' -> "SS") are left as-is, otherwise re-normalizing the
    // result would change it again.
    let mut upper = first.to_uppercase();
    let first_upper = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };

    let mut out = String::new();
    out.push(first_upper);
    out.push_str(&chars.as_str().to_lowercase());
    out
}
