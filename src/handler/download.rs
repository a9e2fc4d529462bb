//! Font download resolution
//!
//! Maps the name segment of the download route onto a file in the store.
//! Display names use spaces; on-disk names use underscores, so every space
//! is normalized before the lookup. The resolved path is confined to the
//! store directory; traversal attempts get the same 404 as missing fonts.

use crate::handler::router::RequestContext;
use crate::handler::static_files::{build_file_response, resolve_in_store};
use crate::http;
use crate::http::cache::CachePolicy;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve a font as an attachment download
pub async fn serve_download(
    ctx: &RequestContext<'_>,
    raw_name: &str,
    font_dir: &Path,
) -> Response<Full<Bytes>> {
    let decoded = urlencoding::decode(raw_name)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| raw_name.to_string());

    if decoded.is_empty() {
        return http::build_400_response("Font name is required");
    }

    // Display names carry spaces; the store uses underscores
    let file_name = decoded.replace(' ', "_");

    let Some(file_path) = resolve_in_store(font_dir, &file_name) else {
        return http::build_404_response("Font file not found");
    };

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read font '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response("Font file not found");
        }
    };

    let disposition = format!("attachment; filename={file_name}");
    build_file_response(
        &content,
        "application/octet-stream",
        CachePolicy::None,
        Some(&disposition),
        ctx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &[u8])]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn ctx() -> RequestContext<'static> {
        RequestContext {
            path: "/api/fonts/download/x",
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }

    #[tokio::test]
    async fn test_spaces_normalize_to_underscores() {
        let store = store_with(&[("My_Font.ttf", b"glyph data")]);
        let response = serve_download(&ctx(), "My Font.ttf", store.path()).await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Disposition").unwrap(),
            "attachment; filename=My_Font.ttf"
        );
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/octet-stream"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"glyph data");
    }

    #[tokio::test]
    async fn test_percent_encoded_spaces() {
        let store = store_with(&[("My_Font.ttf", b"glyph data")]);
        let response = serve_download(&ctx(), "My%20Font.ttf", store.path()).await;
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_empty_name_is_400() {
        let store = store_with(&[]);
        let response = serve_download(&ctx(), "", store.path()).await;
        assert_eq!(response.status(), 400);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Font name is required");
    }

    #[tokio::test]
    async fn test_missing_font_is_404() {
        let store = store_with(&[]);
        let response = serve_download(&ctx(), "does-not-exist.ttf", store.path()).await;
        assert_eq!(response.status(), 404);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Font file not found");
    }

    #[tokio::test]
    async fn test_traversal_is_404() {
        let store = store_with(&[]);
        let outside = store.path().parent().unwrap().join("shadow.ttf");
        std::fs::write(&outside, b"outside").unwrap();
        let response = serve_download(&ctx(), "../shadow.ttf", store.path()).await;
        assert_eq!(response.status(), 404);
        std::fs::remove_file(outside).unwrap();
    }

    #[tokio::test]
    async fn test_no_cache_header_on_downloads() {
        let store = store_with(&[("a.ttf", b"glyphs")]);
        let response = serve_download(&ctx(), "a.ttf", store.path()).await;
        assert!(response.headers().get("Cache-Control").is_none());
    }

    #[tokio::test]
    async fn test_resumable_range_download() {
        let store = store_with(&[("a.ttf", b"0123456789")]);
        let c = RequestContext {
            path: "/api/fonts/download/a.ttf",
            is_head: false,
            if_none_match: None,
            range_header: Some("bytes=5-".to_string()),
        };
        let response = serve_download(&c, "a.ttf", store.path()).await;
        assert_eq!(response.status(), 206);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"56789");
    }
}
