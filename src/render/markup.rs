//! Small HTML helpers shared by the table and chart renderers.

/// Strip every `<sfurl>` and `</sfurl>` marker, keeping the URL text.
/// Markers need not be paired, so truncated labels are cleaned too.
pub fn remove_sfurl_tags(data: &str) -> String {
    let mut out = data.to_string();
    for (open, close) in TAG_FORMS {
        out = remove_all(&out, open);
        out = remove_all(&out, close);
    }
    out
}

/// Cut `text` to `max` characters, appending `...` when anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => format!("{}...", &text[..byte]),
        None => text.to_string(),
    }
}

/// First `max` characters of `text`, no marker.
pub fn prefix(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const TAG_FORMS: [(&str, &str); 2] = [
    ("&lt;sfurl&gt;", "&lt;/sfurl&gt;"),
    ("<sfurl>", "</sfurl>"),
];

fn remove_all(data: &str, marker: &str) -> String {
    let lower = data.to_ascii_lowercase();
    let mut out = String::with_capacity(data.len());
    let mut pos = 0;
    while let Some(start) = lower[pos..].find(marker).map(|i| i + pos) {
        out.push_str(&data[pos..start]);
        pos = start + marker.len();
    }
    out.push_str(&data[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_raw_tags_any_case() {
        assert_eq!(
            remove_sfurl_tags("see <SFURL>http://x.io</SFURL> now"),
            "see http://x.io now"
        );
    }

    #[test]
    fn test_remove_escaped_tags() {
        assert_eq!(
            remove_sfurl_tags("&lt;sfurl&gt;http://Example.com&lt;/sfurl&gt;"),
            "http://Example.com"
        );
    }

    #[test]
    fn test_unpaired_markers_removed() {
        assert_eq!(remove_sfurl_tags("<sfurl>http://x..."), "http://x...");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("héllo wörld", 4), "héll...");
        assert_eq!(prefix("héllo", 2), "hé");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href='x'>&</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;");
    }
}
