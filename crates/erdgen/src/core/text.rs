//! Shared text utilities
//!
//! Cleaning of cell values and the identifier conventions of generated code.

/// Numeric character reference draw.io uses for a line break inside labels
pub const NEWLINE_ENTITY: &str = "&#xa;";

/// Remove inline markup tags and trim the result.
///
/// This is plain tag stripping, not HTML parsing: every `<...>` run is
/// dropped, and an unterminated `<` is kept as text.
///
/// # Example
/// ```
/// use erdgen::core::strip_markup;
///
/// assert_eq!(strip_markup("<b>Player</b> "), "Player");
/// ```
pub fn strip_markup(value: &str) -> String {
    let mut cleaned = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find('<') {
        match rest[open + 1..].find('>') {
            // `<>` is not a tag
            Some(0) => {
                cleaned.push_str(&rest[..open + 2]);
                rest = &rest[open + 2..];
            }
            Some(close) => {
                cleaned.push_str(&rest[..open]);
                rest = &rest[open + 1 + close + 1..];
            }
            None => break,
        }
    }
    cleaned.push_str(rest);

    cleaned.trim().to_string()
}

/// Clean an edge label: strip markup, then decode literal `&#xa;` into newlines.
pub fn clean_label(value: &str) -> String {
    strip_markup(value).replace(NEWLINE_ENTITY, "\n")
}

/// Convert a relationship name into a camelCase identifier.
///
/// Underscores, hyphens and whitespace separate words. The first word
/// starts lower-case and every following word starts upper-case. Inner
/// capitals are kept, so a label already written as `playsFor` survives;
/// words written entirely in capitals are lower-cased first. Input without
/// any words becomes `field`.
///
/// # Example
/// ```
/// use erdgen::core::to_camel_case;
///
/// assert_eq!(to_camel_case("Has Many"), "hasMany");
/// assert_eq!(to_camel_case("plays_for"), "playsFor");
/// assert_eq!(to_camel_case(""), "field");
/// ```
pub fn to_camel_case(text: &str) -> String {
    let mut words = text
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty());

    let Some(first) = words.next() else {
        return "field".to_string();
    };

    let mut camel = lower_first(&fold_shouting(first));
    for word in words {
        camel.push_str(&capitalize_first(&fold_shouting(word)));
    }
    camel
}

/// Lower-case words that contain no lower-case letters at all.
fn fold_shouting(word: &str) -> String {
    if word.chars().any(char::is_lowercase) {
        word.to_string()
    } else {
        word.to_lowercase()
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case only the first character, as accessor names need.
///
/// # Example
/// ```
/// use erdgen::core::capitalize_first;
///
/// assert_eq!(capitalize_first("homeGround"), "HomeGround");
/// ```
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
