//! Utility functions and helpers

/// Escape text for insertion into HTML element content or quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Uppercase the first character, leave the rest as-is
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop the trailing pluralizing character ("farmers" -> "farmer")
pub fn singularize(plural: &str) -> &str {
    let mut chars = plural.chars();
    chars.next_back();
    chars.as_str()
}
