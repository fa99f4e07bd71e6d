use serde::Serialize;
use std::fmt;

pub const NOTES_LIMIT: usize = 270;
const NOTES_KEEP: usize = NOTES_LIMIT - 3;
const ELLIPSIS: char = '…';

/// Text that has already been escaped for HTML.
///
/// The only way to build one is from raw text through [`EscapedText::new`],
/// which escapes `&`, `<`, `>`, `"` and `'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EscapedText(String);

impl EscapedText {
    pub fn new(raw: &str) -> Self {
        Self(html_escape::encode_quoted_attribute(raw).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EscapedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shortens notes longer than the limit to 267 characters plus an ellipsis.
pub fn truncate_notes(notes: &str) -> String {
    if notes.chars().count() <= NOTES_LIMIT {
        return notes.to_string();
    }

    let mut truncated: String = notes.chars().take(NOTES_KEEP).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Lowercase ASCII slug usable inside an element id.
pub fn slug(raw: &str) -> String {
    let mut slug = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "other".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_metacharacters() {
        let escaped = EscapedText::new(r#"<b class="x">Tom & Jerry's</b>"#);
        let text = escaped.as_str();
        assert!(text.contains("&lt;b"));
        assert!(text.contains("&gt;"));
        assert!(text.contains("&amp;"));
        assert!(text.contains("&quot;"));
        assert!(!text.contains('<'));
        assert!(!text.contains('"'));
        assert!(!text.contains('\''));
    }

    #[test]
    fn notes_at_limit_are_untouched() {
        let exact = "a".repeat(270);
        assert_eq!(truncate_notes(&exact), exact);
    }

    #[test]
    fn long_notes_keep_267_characters_and_an_ellipsis() {
        let long = "é".repeat(300);
        let truncated = truncate_notes(&long);
        assert_eq!(truncated.chars().count(), 268);
        assert!(truncated.ends_with('…'));
        assert!(truncated.starts_with(&"é".repeat(267)));
    }

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slug("Board Games!"), "board-games");
        assert_eq!(slug("<>"), "other");
    }
}
