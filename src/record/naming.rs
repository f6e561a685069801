//! Key derivation from field names.

/// Splits a camel-cased name into words.
///
/// Runs of non-uppercase characters are words of their own; an uppercase
/// run followed by non-uppercase text forms one word; a trailing uppercase
/// run stands alone. Within a word, an uppercase run of two or more letters
/// followed by lowercase text is split before its last capital, so acronyms
/// stay together: `HTTPServer` becomes `["HTTP", "Server"]`.
pub fn split_words(name: &str) -> Vec<&str> {
    let is_upper = |c: char| c.is_ascii_uppercase();
    let mut words = Vec::new();
    let mut rest = name;

    while let Some(first) = rest.chars().next() {
        let end = if is_upper(first) {
            let upper_end = rest.find(|c: char| !is_upper(c)).unwrap_or(rest.len());
            let tail = &rest[upper_end..];
            let lower_len = tail.find(is_upper).unwrap_or(tail.len());
            if lower_len > 0 && upper_end > 1 {
                // Acronym run: keep the last capital with the lowercase tail.
                words.push(&rest[..upper_end - 1]);
                words.push(&rest[upper_end - 1..upper_end + lower_len]);
                rest = &rest[upper_end + lower_len..];
                continue;
            }
            upper_end + lower_len
        } else {
            rest.find(is_upper).unwrap_or(rest.len())
        };
        words.push(&rest[..end]);
        rest = &rest[end..];
    }

    words
}

/// Derives the key for a field that has no explicit key name.
pub fn derive_key(name: &str, split: bool, prefix: &str) -> String {
    let key = if split {
        split_words(name).join("_")
    } else {
        name.to_string()
    };
    if prefix.is_empty() {
        key
    } else {
        format!("{prefix}_{key}")
    }
}
