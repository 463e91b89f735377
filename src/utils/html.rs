//! HTML attribute escaping for emitted tags.

use std::borrow::Cow;

/// Escape a value for use inside a single- or double-quoted attribute.
///
/// Borrows when nothing needs escaping.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert!(matches!(escape_attr("/stylesheets/a.css"), Cow::Borrowed(_)));
        assert_eq!(escape_attr("a'b&c"), "a&#39;b&amp;c");
    }
}
