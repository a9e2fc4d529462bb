//! Request routing dispatch
//!
//! Entry point for request processing: OPTIONS short-circuit, method gate,
//! path dispatch to the three handlers, CORS injection on every response,
//! and the access log line once the response is built.

use crate::config::Config;
use crate::handler::{catalog, download, static_files};
use crate::http::{self, cors};
use crate::logger::{self, AccessLogEntry};
use chrono::Local;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

const CATALOG_PATH: &str = "/api/fonts";
const DOWNLOAD_PREFIX: &str = "/api/fonts/download/";
const ASSET_PREFIX: &str = "/fonts/";

const ROOT_INFO: &str =
    "Fontopia backend is running. Use /api/fonts or /api/fonts/download/{fontname}";

/// Request context shared by the handlers
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_label(req.version());
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    let ctx = RequestContext {
        path: &path,
        is_head: method == Method::HEAD,
        if_none_match: header_string(&req, "if-none-match"),
        range_header: header_string(&req, "range"),
    };

    let mut response = respond(&method, &ctx, &config).await;
    cors::apply(&mut response, &config.cors.allowed_origin);

    if config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: remote_addr.ip().to_string(),
            time: Local::now(),
            method: method.to_string(),
            path,
            query,
            http_version,
            status: response.status().as_u16(),
            body_bytes: content_length_of(&response),
            referer,
            user_agent,
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Method gate and short-circuits, ahead of path routing
async fn respond(
    method: &Method,
    ctx: &RequestContext<'_>,
    config: &Config,
) -> Response<Full<Bytes>> {
    match *method {
        // Preflight never reaches a route handler
        Method::OPTIONS => cors::preflight_response(&config.cors.allowed_origin),
        Method::GET | Method::HEAD => route_request(ctx, config).await,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    }
}

/// Route request based on path
async fn route_request(ctx: &RequestContext<'_>, config: &Config) -> Response<Full<Bytes>> {
    // Longest prefix first: the download route sits under the catalog path
    if let Some(name) = ctx.path.strip_prefix(DOWNLOAD_PREFIX) {
        return download::serve_download(ctx, name, &config.store.font_dir).await;
    }

    if ctx.path == CATALOG_PATH {
        return catalog::serve_catalog(ctx, &config.store.catalog_file).await;
    }

    if let Some(relative) = ctx.path.strip_prefix(ASSET_PREFIX) {
        return static_files::serve_asset(ctx, relative, &config.store.font_dir).await;
    }

    if ctx.path == "/" {
        return http::build_text_response(ROOT_INFO, ctx.is_head);
    }

    http::build_404_response("404 Not Found")
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> String {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        _ => "1.1",
    }
    .to_string()
}

fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tempfile::TempDir;

    fn test_config(store: &TempDir) -> Config {
        let mut config = Config::load_from("does-not-exist").unwrap();
        config.store.font_dir = store.path().to_path_buf();
        config.store.catalog_file = store.path().join("fonts.json");
        config.logging.access_log = false;
        config
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }

    #[tokio::test]
    async fn test_root_info_route() {
        let store = TempDir::new().unwrap();
        let config = test_config(&store);
        let response = route_request(&ctx("/"), &config).await;
        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], ROOT_INFO.as_bytes());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let store = TempDir::new().unwrap();
        let config = test_config(&store);
        let response = route_request(&ctx("/nope"), &config).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_catalog_route_dispatch() {
        let store = TempDir::new().unwrap();
        std::fs::write(store.path().join("fonts.json"), b"[]").unwrap();
        let config = test_config(&store);
        let response = route_request(&ctx("/api/fonts"), &config).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_download_route_dispatch() {
        let store = TempDir::new().unwrap();
        std::fs::write(store.path().join("A.ttf"), b"x").unwrap();
        let config = test_config(&store);
        let response = route_request(&ctx("/api/fonts/download/A.ttf"), &config).await;
        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("Content-Disposition"));
    }

    #[tokio::test]
    async fn test_download_empty_name_is_400() {
        let store = TempDir::new().unwrap();
        let config = test_config(&store);
        let response = route_request(&ctx("/api/fonts/download/"), &config).await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_asset_route_dispatch() {
        let store = TempDir::new().unwrap();
        std::fs::write(store.path().join("A.woff2"), b"x").unwrap();
        let config = test_config(&store);
        let response = route_request(&ctx("/fonts/A.woff2"), &config).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Cache-Control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_options_short_circuits_routing() {
        let store = TempDir::new().unwrap();
        // No catalog file on disk: reaching the handler would produce a 500
        let config = test_config(&store);
        let response = respond(&Method::OPTIONS, &ctx("/api/fonts"), &config).await;
        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("Access-Control-Allow-Origin"));
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_post_is_405() {
        let store = TempDir::new().unwrap();
        let config = test_config(&store);
        let response = respond(&Method::POST, &ctx("/api/fonts"), &config).await;
        assert_eq!(response.status(), 405);
    }
}
