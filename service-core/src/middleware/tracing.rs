//! `x-request-id` propagation.

use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Caller-supplied ids end up in every log line of the request, so only short
/// tokens of `[A-Za-z0-9._:-]` are trusted.
fn is_acceptable_request_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':'))
}

/// Reuses an acceptable caller `x-request-id` or mints a uuid, stores it on
/// the request for the trace span and echoes it on the response.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let caller_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_acceptable_request_id(id));

    let header_value = caller_id
        .and_then(|id| HeaderValue::from_str(id).ok())
        .unwrap_or_else(|| {
            let minted = Uuid::new_v4().to_string();
            HeaderValue::from_str(&minted).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        });

    req.headers_mut()
        .insert(REQUEST_ID_HEADER, header_value.clone());

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER, header_value);

    response
}
