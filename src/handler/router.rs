//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body size check, exact path
//! match, dispatch and access logging.

use crate::config::{AppState, RoutesConfig};
use crate::handler::{form_echo, static_file};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, REFERER, USER_AGENT};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// The two routed endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Index,
    Form,
}

fn match_route(path: &str, routes: &RoutesConfig) -> Option<Route> {
    if path == routes.index_path {
        Some(Route::Index)
    } else if path == routes.form_path {
        Some(Route::Form)
    } else {
        None
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let config = &state.config;

    let mut entry = config.logging.access_log.then(|| {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            req.uri()
                .path_and_query()
                .map_or_else(|| req.uri().path().to_string(), ToString::to_string),
        );
        entry.http_version = version_label(req.version()).to_string();
        entry.referer = header_string(&req, REFERER.as_str());
        entry.user_agent = header_string(&req, USER_AGENT.as_str());
        entry
    });

    let response = if let Some(resp) = check_body_size(&req, config.http.max_body_size) {
        resp
    } else {
        match match_route(req.uri().path(), &config.routes) {
            Some(Route::Index) => {
                static_file::serve_index(
                    req.method(),
                    &config.routes.index_file,
                    config.read_timeout(),
                )
                .await
            }
            Some(Route::Form) => {
                form_echo::echo_form(
                    req,
                    config.http.max_body_size,
                    config.read_timeout(),
                    config.routes.echo_format,
                )
                .await
            }
            None => http::build_404_response(),
        }
    };

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.elapsed = started.elapsed();
        logger::log_access(entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Reject a declared `Content-Length` above the limit before reading the body
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get(CONTENT_LENGTH)?;
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return None;
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
