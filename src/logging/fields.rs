//! Field helpers for structured logging

use crate::config::LoggingConfig;

/// Truncate query text for a log line.
///
/// Cuts on a character boundary, so multi-byte text never panics, and marks
/// the cut with "...".
///
/// # Examples
///
/// ```
/// use dishpick::logging::truncate_query;
///
/// assert_eq!(truncate_query("fish", 100), "fish");
/// assert_eq!(truncate_query("something light", 9), "something...");
/// ```
pub fn truncate_query(query: &str, max_chars: usize) -> String {
    match query.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &query[..cut]),
        None => query.to_string(),
    }
}

/// Query preview for logging, or `None` when content logging is disabled.
pub fn query_preview(query: &str, config: &LoggingConfig) -> Option<String> {
    if !config.enable_content_logging || query.is_empty() {
        return None;
    }
    Some(truncate_query(query, config.query_preview_chars))
}
