//! Name normalization and display-form helpers.
//!
//! The normalized form is the lookup key everywhere: the store builds its
//! indexes with [`normalize`], and the lookup service folds queries with
//! the same function, so the two can never drift apart.

/// Normalize a name for exact lookup: trim surrounding whitespace and
/// case-fold to Unicode lowercase.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Render a name in title form: the first letter of each
/// whitespace-separated word uppercased, the rest lowercased.
/// Interior whitespace runs collapse to a single space.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
