//! Naming convention utilities for code generation.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `word` | [`capitalize`] | `Word` |
//! | `imageUrl` | [`camel_to_snake`] | `image_url` |
//! | `image_url` | [`snake_to_camel`] | `imageUrl` |
//! | `name` | [`storage_name`] | `mName` |

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use parcelgen_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a camelCase member name to the snake_case key used in JSON.
///
/// Acronyms stay together: `imageURL` becomes `image_url` and `HTTPServer`
/// becomes `http_server`.
///
/// # Examples
///
/// ```
/// use parcelgen_core::naming::camel_to_snake;
///
/// assert_eq!(camel_to_snake("reviewCount"), "review_count");
/// assert_eq!(camel_to_snake("name"), "name");
/// ```
pub fn camel_to_snake(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();

    // Pass 1: split before a capitalized word (`aWord` -> `a_Word`).
    let mut split = Vec::with_capacity(chars.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        let starts_word = chars.get(i + 1).is_some_and(|c| c.is_ascii_uppercase())
            && chars.get(i + 2).is_some_and(|c| c.is_ascii_lowercase());
        if starts_word {
            split.push(chars[i]);
            split.push('_');
            split.push(chars[i + 1]);
            let mut j = i + 2;
            while j < chars.len() && chars[j].is_ascii_lowercase() {
                split.push(chars[j]);
                j += 1;
            }
            i = j;
        } else {
            split.push(chars[i]);
            i += 1;
        }
    }

    // Pass 2: split a lowercase/digit followed by an uppercase (`aB` -> `a_B`).
    let mut out = String::with_capacity(split.len() + 4);
    let mut i = 0;
    while i < split.len() {
        let c = split[i];
        let boundary = (c.is_ascii_lowercase() || c.is_ascii_digit())
            && split.get(i + 1).is_some_and(|n| n.is_ascii_uppercase());
        out.push(c);
        if boundary {
            out.push('_');
            out.push(split[i + 1]);
            i += 2;
        } else {
            i += 1;
        }
    }

    out.to_lowercase()
}

/// Convert a snake_case key to a camelCase member name.
///
/// Only an underscore followed by a lowercase letter or digit is folded, so
/// `foo__bar` becomes `foo_Bar`.
///
/// # Examples
///
/// ```
/// use parcelgen_core::naming::snake_to_camel;
///
/// assert_eq!(snake_to_camel("rating_img_url"), "ratingImgUrl");
/// assert_eq!(snake_to_camel("id"), "id");
/// ```
pub fn snake_to_camel(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '_' && (next.is_ascii_lowercase() || next.is_ascii_digit()) => {
                result.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => result.push(c),
        }
    }

    result
}

/// Name of the storage field backing a member (`name` -> `mName`).
pub fn storage_name(member: &str) -> String {
    format!("m{}", capitalize(member))
}

/// Check that a string is a valid Java identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Check that a string is a dot-qualified Java name (`Foo`, `com.example.Foo`).
pub fn is_qualified_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}
