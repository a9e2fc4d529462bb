//! Cross-origin middleware
//!
//! Every response, any route and any status, carries the three CORS headers.
//! Preflight `OPTIONS` requests are answered here and never reach a handler.

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::Response;

/// Inject the CORS headers into an already-built response.
///
/// `insert` overwrites, so a handler cannot accidentally ship a different
/// origin than the configured one.
pub fn apply(response: &mut Response<Full<Bytes>>, allowed_origin: &str) {
    let origin = HeaderValue::from_str(allowed_origin).unwrap_or_else(|_| {
        logger::log_warning(&format!(
            "Configured CORS origin is not a valid header value: '{allowed_origin}', falling back to '*'"
        ));
        HeaderValue::from_static("*")
    });

    let headers = response.headers_mut();
    headers.insert("Access-Control-Allow-Origin", origin);
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
}

/// Build the preflight short-circuit response: 200, empty body, CORS headers.
pub fn preflight_response(allowed_origin: &str) -> Response<Full<Bytes>> {
    let mut response = Response::builder()
        .status(200)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build preflight response: {e}"));
            Response::new(Full::new(Bytes::new()))
        });
    apply(&mut response, allowed_origin);
    response
}
