//! Shared utility functions.

/// Shorten a string to at most `max_bytes` of its content for log lines
/// and console snippets, appending `…` when anything was cut.
///
/// The cut never splits a UTF-8 character: if `max_bytes` lands inside
/// a multi-byte character, the boundary backs up to the previous one.
pub fn preview(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}
