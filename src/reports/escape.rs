//! Escaping for the HTML report.
//!
//! Inventory fields come from project files and remote metadata, so every
//! name, license and URL is escaped before it is embedded in markup.

/// Escape a string for safe inclusion in HTML content.
///
/// # Examples
///
/// ```
/// use license_scanner::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<b>GPL & friends</b>"),
///     "&lt;b&gt;GPL &amp; friends&lt;/b&gt;");
///
/// assert_eq!(escape_html("MIT License"), "MIT License");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut result, c, false);
    }
    result
}

/// Escape a string for safe inclusion in an HTML attribute value.
///
/// Whitespace that would break attribute parsing is encoded too.
///
/// # Examples
///
/// ```
/// use license_scanner::reports::escape::escape_html_attr;
///
/// assert_eq!(escape_html_attr("https://example.com/?a='1'"),
///     "https://example.com/?a=&#x27;1&#x27;");
/// ```
pub fn escape_html_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut result, c, true);
    }
    result
}

/// Attribute-escaped `href` value, or `None` for anything but http(s).
///
/// Keeps `javascript:` and similar schemes found in dependency metadata out
/// of the generated links.
///
/// # Examples
///
/// ```
/// use license_scanner::reports::escape::safe_href;
///
/// assert_eq!(safe_href("https://github.com/a/b").as_deref(), Some("https://github.com/a/b"));
/// assert_eq!(safe_href("javascript:alert(1)"), None);
/// ```
pub fn safe_href(url: &str) -> Option<String> {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        Some(escape_html_attr(trimmed))
    } else {
        None
    }
}

fn push_escaped(out: &mut String, c: char, attribute: bool) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#x27;"),
        '\n' if attribute => out.push_str("&#10;"),
        '\r' if attribute => out.push_str("&#13;"),
        '\t' if attribute => out.push_str("&#9;"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(escape_html("&<>\"'"), "&amp;&lt;&gt;&quot;&#x27;");
    }

    #[test]
    fn test_content_keeps_newlines() {
        assert_eq!(escape_html("line1\nline2"), "line1\nline2");
        assert_eq!(escape_html_attr("line1\nline2"), "line1&#10;line2");
    }

    #[test]
    fn test_safe_href_schemes() {
        assert!(safe_href("HTTP://example.com").is_some());
        assert_eq!(safe_href("  https://x.org/a b ").as_deref(), Some("https://x.org/a b"));
        assert_eq!(safe_href("git@github.com:a/b.git"), None);
        assert_eq!(safe_href("data:text/html,<script>"), None);
        assert_eq!(safe_href(""), None);
    }

    #[test]
    fn test_unicode_passthrough() {
        assert_eq!(escape_html("Ünïcödé ライセンス"), "Ünïcödé ライセンス");
    }
}
