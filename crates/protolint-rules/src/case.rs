//! Identifier case checks and conversions.

/// Returns true for `lower_snake_case` identifiers (digits allowed after the first letter).
pub(crate) fn is_lower_snake(name: &str) -> bool {
    starts_with(name, char::is_ascii_lowercase)
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && well_separated(name)
}

/// Returns true for `UPPER_SNAKE_CASE` identifiers.
pub(crate) fn is_upper_snake(name: &str) -> bool {
    starts_with(name, char::is_ascii_uppercase)
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && well_separated(name)
}

/// Returns true for `UpperCamelCase` identifiers.
pub(crate) fn is_upper_camel(name: &str) -> bool {
    starts_with(name, char::is_ascii_uppercase) && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Converts `fooBar`, `FooBar` or `HTTPServer` to `foo_bar`, `foo_bar`, `http_server`.
pub(crate) fn to_lower_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Converts to `UPPER_SNAKE_CASE`.
pub(crate) fn to_upper_snake(name: &str) -> String {
    to_lower_snake(name).to_ascii_uppercase()
}

/// Converts to `UpperCamelCase`.
pub(crate) fn to_upper_camel(name: &str) -> String {
    to_lower_snake(name)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                let mut out = first.to_ascii_uppercase().to_string();
                out.push_str(chars.as_str());
                out
            })
        })
        .collect()
}

fn starts_with(name: &str, pred: impl Fn(&char) -> bool) -> bool {
    name.chars().next().is_some_and(|c| pred(&c))
}

// No doubled or trailing separators.
fn well_separated(name: &str) -> bool {
    !name.contains("__") && !name.ends_with('_')
}
