use chrono::{DateTime, Utc};

use crate::utils::parse_timestamp;

pub const KEY_UUID: &str = "uuid";
pub const KEY_TYPE: &str = "type";
pub const KEY_CREATED_AT: &str = "created_at";
pub const KEY_UPDATED_AT: &str = "updated_at";
pub const KEY_OBSIDIZED_AT: &str = "obsidized_at";
pub const KEY_PROJECT: &str = "project";
pub const KEY_TAGS: &str = "tags";
pub const KEY_VERSION: &str = "obsidize_version";

pub const TYPE_CONVERSATION: &str = "conversation";
pub const TYPE_PROJECT_OVERVIEW: &str = "project-overview";
pub const TYPE_PROJECT_DOCUMENT: &str = "project-document";

const DELIMITER: &str = "---";

/// An ordered `key: value` mapping recovered from (or destined for) a note header
///
/// Keys the importer does not know about are carried as opaque entries and
/// keep their position across a re-render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: Vec<(String, String)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Set a key, updating it in place if present, appending otherwise
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse the value of `key` as a timestamp
    ///
    /// Returns `None` if the key is absent or its value is unparsable;
    /// never errors.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key).and_then(parse_timestamp)
    }

    /// Render the header: `key: value` lines in stored order, wrapped by
    /// `---` delimiter lines. Ends with a newline after the closing
    /// delimiter; note creation sites add the blank line that separates the
    /// header from the body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');
        for (key, value) in &self.fields {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}

/// Result of splitting a note into header and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNote<'a> {
    pub frontmatter: Frontmatter,
    /// Raw remainder after the closing delimiter line (or the whole input
    /// when no header is present); `Frontmatter::render` plus this body
    /// reconstructs a well-formed note
    pub body: &'a str,
    pub present: bool,
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split a note into frontmatter and body
///
/// A header is a first line that is exactly `---` followed by flat
/// `key: value` lines up to the next `---` line. Absent or unterminated
/// headers yield `present = false` with the whole input as body -- such a
/// note is simply not managed. Duplicate keys: the last occurrence wins,
/// keeping the position of the first.
pub fn parse(text: &str) -> ParsedNote<'_> {
    let unmanaged = ParsedNote { frontmatter: Frontmatter::new(), body: text, present: false };

    let Some(first_line_end) = text.find('\n') else {
        return unmanaged;
    };
    if strip_line_ending(&text[..first_line_end]) != DELIMITER {
        return unmanaged;
    }

    let mut frontmatter = Frontmatter::new();
    let mut offset = first_line_end + 1;
    while offset <= text.len() {
        let rest = &text[offset..];
        let line_end = rest.find('\n').map(|i| offset + i).unwrap_or(text.len());
        let line = strip_line_ending(&text[offset..line_end]);

        if line == DELIMITER {
            let body_start = if line_end < text.len() { line_end + 1 } else { text.len() };
            return ParsedNote { frontmatter, body: &text[body_start..], present: true };
        }

        if let Some((key, value)) = line.split_once(':') {
            frontmatter.set(key.trim(), value.trim());
        }
        // Lines without a colon are not part of the flat subset; skipped.

        if line_end >= text.len() {
            break;
        }
        offset = line_end + 1;
    }

    // No closing delimiter: treat the whole note as unmanaged body.
    unmanaged
}

/// Replace the values of existing header keys, leaving everything else intact
///
/// Parses the header, mutates only the keys that appear in both the header
/// and `updates`, and re-serializes the header in front of the untouched
/// body. Keys absent from the header are not added; unmanaged keys keep
/// their value and position. Input without a parseable header is returned
/// unchanged.
pub fn substitute_fields(text: &str, updates: &[(&str, String)]) -> String {
    let parsed = parse(text);
    if !parsed.present {
        return text.to_string();
    }

    let mut frontmatter = parsed.frontmatter;
    for (key, value) in updates {
        if frontmatter.contains(key) {
            frontmatter.set(key, value.clone());
        }
    }

    let mut out = frontmatter.render();
    out.push_str(parsed.body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = "---\nuuid: abc-123\ntype: conversation\ncreated_at: 2025-08-04T10:30:00Z\nupdated_at: 2025-08-05T09:15:00Z\nobsidized_at: 2025-08-05T09:15:00Z\n---\n\n# A note\n\nbody text\n";

    #[test]
    fn test_parse_managed_note() {
        let parsed = parse(NOTE);
        assert!(parsed.present);
        assert_eq!(parsed.frontmatter.get("uuid"), Some("abc-123"));
        assert_eq!(parsed.frontmatter.get("type"), Some("conversation"));
        assert_eq!(parsed.frontmatter.len(), 5);
        assert_eq!(parsed.body, "\n# A note\n\nbody text\n");
    }

    #[test]
    fn test_parse_no_header() {
        let parsed = parse("# Just a heading\n\nbody\n");
        assert!(!parsed.present);
        assert!(parsed.frontmatter.is_empty());
        assert_eq!(parsed.body, "# Just a heading\n\nbody\n");
    }

    #[test]
    fn test_parse_unterminated_header() {
        let text = "---\nuuid: abc\nno closing delimiter\n";
        let parsed = parse(text);
        assert!(!parsed.present);
        assert_eq!(parsed.body, text);
    }

    #[test]
    fn test_parse_empty_input() {
        let parsed = parse("");
        assert!(!parsed.present);
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let text = "---\nuuid: first\ntags: x\nuuid: second\n---\nbody";
        let parsed = parse(text);
        assert!(parsed.present);
        assert_eq!(parsed.frontmatter.get("uuid"), Some("second"));
        // Position of the first occurrence is kept.
        let keys: Vec<&str> = parsed.frontmatter.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["uuid", "tags"]);
    }

    #[test]
    fn test_parse_crlf_lines() {
        let text = "---\r\nuuid: abc\r\n---\r\nbody\r\n";
        let parsed = parse(text);
        assert!(parsed.present);
        assert_eq!(parsed.frontmatter.get("uuid"), Some("abc"));
    }

    #[test]
    fn test_parse_value_with_colon() {
        let text = "---\nsource: https://example.com/x\n---\nbody";
        let parsed = parse(text);
        assert_eq!(parsed.frontmatter.get("source"), Some("https://example.com/x"));
    }

    #[test]
    fn test_render_roundtrip() {
        let parsed = parse(NOTE);
        let rebuilt = format!("{}{}", parsed.frontmatter.render(), parsed.body);
        assert_eq!(rebuilt, NOTE);
    }

    #[test]
    fn test_timestamp_field() {
        let parsed = parse(NOTE);
        assert!(parsed.frontmatter.timestamp("updated_at").is_some());
        assert!(parsed.frontmatter.timestamp("uuid").is_none());
        assert!(parsed.frontmatter.timestamp("missing").is_none());
    }

    #[test]
    fn test_substitute_updates_only_named_keys() {
        let out = substitute_fields(
            NOTE,
            &[
                ("updated_at", "2025-08-06T00:00:00Z".to_string()),
                ("obsidized_at", "2025-08-06T00:00:01Z".to_string()),
            ],
        );
        assert!(out.contains("updated_at: 2025-08-06T00:00:00Z"));
        assert!(out.contains("obsidized_at: 2025-08-06T00:00:01Z"));
        assert!(out.contains("created_at: 2025-08-04T10:30:00Z"));
        assert!(out.ends_with("\n# A note\n\nbody text\n"));
    }

    #[test]
    fn test_substitute_preserves_user_keys_and_order() {
        let text = "---\nuuid: abc\ncustom_key: my value\nupdated_at: old\n---\nbody";
        let out = substitute_fields(text, &[("updated_at", "new".to_string())]);
        assert_eq!(out, "---\nuuid: abc\ncustom_key: my value\nupdated_at: new\n---\nbody");
    }

    #[test]
    fn test_substitute_ignores_absent_keys() {
        let text = "---\nuuid: abc\n---\nbody";
        let out = substitute_fields(text, &[("updated_at", "new".to_string())]);
        assert_eq!(out, text);
    }

    #[test]
    fn test_substitute_without_header_is_identity() {
        let text = "no header here\n";
        let out = substitute_fields(text, &[("updated_at", "new".to_string())]);
        assert_eq!(out, text);
    }

    #[test]
    fn test_substitute_is_byte_stable_for_managed_notes() {
        // Substituting a field with its current value must not move a byte.
        let out = substitute_fields(NOTE, &[("uuid", "abc-123".to_string())]);
        assert_eq!(out, NOTE);
    }
}
