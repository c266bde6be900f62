//! Request ID generation

use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// Attached to the tracing span of every HTTP recommendation so resolver,
/// fallback and re-rank events for one query can be correlated.
///
/// # Examples
///
/// ```
/// use dishpick::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert!(!request_id.is_empty());
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
