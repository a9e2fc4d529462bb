//! Static asset serving from the font store
//!
//! Serves anything under the asset route prefix straight out of the store
//! directory with a one-year immutable cache window. Also owns the path
//! resolution shared with the download route: names are joined onto the
//! store, canonicalized, and must stay inside it.

use crate::handler::router::RequestContext;
use crate::http::cache::{check_etag_match, generate_etag, CachePolicy, ASSET_MAX_AGE};
use crate::http::range::{resolve_range, RangeOutcome};
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a file from the store under the asset route
pub async fn serve_asset(
    ctx: &RequestContext<'_>,
    relative: &str,
    font_dir: &Path,
) -> Response<Full<Bytes>> {
    // Request paths arrive percent-encoded; on-disk names are the decoded form
    let decoded = urlencoding::decode(relative)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| relative.to_string());

    let Some(file_path) = resolve_in_store(font_dir, &decoded) else {
        return http::build_404_response("404 Not Found");
    };

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read asset '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response("404 Not Found");
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    build_file_response(
        &content,
        content_type,
        CachePolicy::Immutable(ASSET_MAX_AGE),
        None,
        ctx,
    )
}

/// Resolve a store-relative name to an on-disk path.
///
/// Returns None when the file does not exist or when the canonicalized
/// result escapes the store directory (traversal attempt).
pub fn resolve_in_store(store_dir: &Path, relative: &str) -> Option<PathBuf> {
    if relative.is_empty() {
        return None;
    }

    let store_canonical = match store_dir.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Font store directory not found or inaccessible '{}': {e}",
                store_dir.display()
            ));
            return None;
        }
    };

    // canonicalize requires the target to exist, so the 404 check comes free
    let resolved = store_dir.join(relative).canonicalize().ok()?;
    if !resolved.starts_with(&store_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            resolved.display()
        ));
        return None;
    }
    if !resolved.is_file() {
        return None;
    }

    Some(resolved)
}

/// Build the response for file bytes: ETag/304, Range/206/416, else 200.
pub fn build_file_response(
    data: &[u8],
    content_type: &str,
    cache: CachePolicy,
    content_disposition: Option<&str>,
    ctx: &RequestContext<'_>,
) -> Response<Full<Bytes>> {
    let etag = generate_etag(data);
    let total_size = data.len();

    if check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag, cache);
    }

    match resolve_range(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(range) => http::response::build_partial_response(
            Bytes::from(data[range.start..=range.end].to_vec()),
            content_type,
            cache,
            &etag,
            content_disposition,
            range.start,
            range.end,
            total_size,
            ctx.is_head,
        ),
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Full => http::response::build_file_ok_response(
            Bytes::from(data.to_vec()),
            content_type,
            cache,
            &etag,
            content_disposition,
            ctx.is_head,
        ),
    }
}
