//! Index file responder
//!
//! Serves the bytes of one configured file, re-read on every request.

use crate::handler::method_is;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use std::io::ErrorKind;
use std::time::Duration;
use tokio::fs;

/// Serve the index file for a GET request, reading it within `read_timeout`
pub async fn serve_index(
    method: &Method,
    file_path: &str,
    read_timeout: Duration,
) -> Response<Full<Bytes>> {
    if !method_is(method, &Method::GET) {
        logger::log_warning(&format!("Method not allowed on index: {method}"));
        return http::build_405_response("GET");
    }

    let Ok(read_result) = tokio::time::timeout(read_timeout, fs::read(file_path)).await else {
        logger::log_error(&format!(
            "Reading '{file_path}' exceeded {} seconds",
            read_timeout.as_secs()
        ));
        return http::build_500_response();
    };

    match read_result {
        Ok(content) => http::build_ok_response(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            logger::log_debug(&format!("Index file '{file_path}' not found"));
            http::build_file_not_found_response()
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{file_path}': {e}"));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_serves_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<h1>hi</h1>").unwrap();

        let response = serve_index(&Method::GET, path.to_str().unwrap(), TIMEOUT).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-length"], "11");
        assert_eq!(body_of(response).await, "<h1>hi</h1>");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");

        let response = serve_index(&Method::GET, path.to_str().unwrap(), TIMEOUT).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-length"], "14");
        assert_eq!(body_of(response).await, "File not found");
    }

    #[tokio::test]
    async fn test_directory_is_server_error() {
        let dir = tempfile::tempdir().unwrap();

        let response = serve_index(&Method::GET, dir.path().to_str().unwrap(), TIMEOUT).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_lowercase_get_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "ok").unwrap();

        let method = Method::from_bytes(b"get").unwrap();
        let response = serve_index(&method, path.to_str().unwrap(), TIMEOUT).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_post_not_allowed() {
        let response = serve_index(&Method::POST, "index.html", TIMEOUT).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "GET");
    }

    #[tokio::test]
    async fn test_binary_content_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        let bytes = vec![0u8, 159, 146, 150, 255];
        std::fs::write(&path, &bytes).unwrap();

        let response = serve_index(&Method::GET, path.to_str().unwrap(), TIMEOUT).await;
        assert_eq!(response.headers()["content-length"], "5");
        assert_eq!(body_of(response).await.to_vec(), bytes);
    }
}
