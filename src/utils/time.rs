use chrono::{DateTime, SecondsFormat, Utc};

/// Parse an ISO-8601 / RFC 3339 timestamp string
///
/// Returns `None` for anything unparsable (including empty or whitespace-only
/// input); never errors. Callers decide what a missing timestamp means --
/// the planner fails open, the conversation merger skips the note.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<DateTime<Utc>>().ok()
}

/// Format a timestamp the way managed frontmatter stores it
/// (RFC 3339, UTC, second precision, `Z` suffix)
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
