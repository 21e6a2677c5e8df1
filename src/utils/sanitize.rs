/// Sanitize a note filename or project folder name for the vault
///
/// Lowercases the input and collapses every character outside `[a-z0-9-._]`
/// to `-`. Because `.` is in the allowed set, an existing extension survives
/// sanitization unchanged.
pub fn sanitize_filename(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
