//! Static catalog serving
//!
//! The catalog is a JSON file on disk, served verbatim on every request.
//! The server never materializes records on the request path; parsing only
//! happens once at startup, as a sanity check that logs what it finds.

use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::http::cache::{CachePolicy, CATALOG_MAX_AGE};

/// Shape of one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRecord {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub size: String,
}

/// Serve the catalog file as-is
pub async fn serve_catalog(
    ctx: &RequestContext<'_>,
    catalog_file: &Path,
) -> Response<Full<Bytes>> {
    let content = match fs::read(catalog_file).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read catalog '{}': {e}",
                catalog_file.display()
            ));
            return http::build_500_response("Failed to read font data");
        }
    };

    let content_length = content.len();
    let body = if ctx.is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length);
    if let Some(value) = CachePolicy::Public(CATALOG_MAX_AGE).header_value() {
        builder = builder.header("Cache-Control", value);
    }
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to build catalog response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}

/// Startup sanity check: warn when the catalog is missing or malformed.
///
/// Serving is unaffected either way; requests keep returning whatever bytes
/// are on disk at the time.
pub async fn preflight(catalog_file: &Path) {
    match fs::read(catalog_file).await {
        Ok(content) => match serde_json::from_slice::<Vec<FontRecord>>(&content) {
            Ok(records) => {
                logger::log_info(&format!("Catalog holds {} font(s)", records.len()));
            }
            Err(e) => {
                logger::log_warning(&format!(
                    "Catalog '{}' is not a valid font list: {e}",
                    catalog_file.display()
                ));
            }
        },
        Err(e) => {
            logger::log_warning(&format!(
                "Catalog '{}' is not readable yet: {e}",
                catalog_file.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ctx() -> RequestContext<'static> {
        RequestContext {
            path: "/api/fonts",
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }

    fn catalog_json() -> Vec<u8> {
        serde_json::to_vec(&vec![
            FontRecord {
                id: 1,
                name: "Roboto".to_string(),
                author: "Christian Robertson".to_string(),
                size: "168 KB".to_string(),
            },
            FontRecord {
                id: 2,
                name: "My Font".to_string(),
                author: "Anonymous".to_string(),
                size: "72 KB".to_string(),
            },
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_catalog_served_byte_identical() {
        let mut file = NamedTempFile::new().unwrap();
        let raw = catalog_json();
        file.write_all(&raw).unwrap();

        let response = serve_catalog(&ctx(), file.path()).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(
            response.headers().get("Cache-Control").unwrap(),
            "public, max-age=300"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], &raw[..]);
    }

    #[tokio::test]
    async fn test_catalog_not_reformatted() {
        // Odd whitespace must survive the round trip untouched
        let mut file = NamedTempFile::new().unwrap();
        let raw = b"[\n  {\"id\": 1,   \"name\": \"X\", \"author\": \"Y\", \"size\": \"1 KB\"}\n]\n";
        file.write_all(raw).unwrap();

        let response = serve_catalog(&ctx(), file.path()).await;
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], &raw[..]);
    }

    #[tokio::test]
    async fn test_missing_catalog_is_500() {
        let response = serve_catalog(&ctx(), Path::new("/no/such/fonts.json")).await;
        assert_eq!(response.status(), 500);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Failed to read font data");
    }

    #[tokio::test]
    async fn test_head_has_length_no_body() {
        let mut file = NamedTempFile::new().unwrap();
        let raw = catalog_json();
        file.write_all(&raw).unwrap();

        let head_ctx = RequestContext {
            path: "/api/fonts",
            is_head: true,
            if_none_match: None,
            range_header: None,
        };
        let response = serve_catalog(&head_ctx, file.path()).await;
        assert_eq!(
            response.headers().get("Content-Length").unwrap(),
            raw.len().to_string().as_str()
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_font_record_round_trip() {
        let record = FontRecord {
            id: 7,
            name: "Inter".to_string(),
            author: "Rasmus Andersson".to_string(),
            size: "1.2 MB".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<FontRecord>(&json).unwrap(), record);
    }
}
