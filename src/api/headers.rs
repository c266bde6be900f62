//! X-Dishpick-* response headers.
//!
//! Expose how a recommendation was produced without changing the JSON body
//! shape that clients depend on.

use crate::recommend::Recommendation;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const SOURCE_HEADER: &str = "x-dishpick-source";
pub const FALLBACK_HEADER: &str = "x-dishpick-fallback";

/// Headers describing one recommendation.
pub fn recommendation_headers(request_id: &str, rec: &Recommendation) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, REQUEST_ID_HEADER, request_id);
    insert(&mut headers, SOURCE_HEADER, rec.source.as_str());
    if let Some(reason) = rec.fallback_reason {
        insert(&mut headers, FALLBACK_HEADER, reason.as_str());
    }
    headers
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(HeaderName::from_static(name), value);
    }
}
