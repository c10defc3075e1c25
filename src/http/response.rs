//! HTTP response building module
//!
//! Every response carries a `Content-Length` equal to its body size and no
//! content type.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_LENGTH};
use hyper::{Response, StatusCode};

/// Body sent when the index file does not exist
pub const FILE_NOT_FOUND_BODY: &str = "File not found";

/// Build a response with the given status and body
pub fn build_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let body = body.into();
    Response::builder()
        .status(status)
        .header(CONTENT_LENGTH, body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 OK response
pub fn build_ok_response(body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    build_response(StatusCode::OK, body)
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    build_response(StatusCode::BAD_REQUEST, "Bad Request")
}

/// Build 404 for a missing index file
pub fn build_file_not_found_response() -> Response<Full<Bytes>> {
    build_response(StatusCode::NOT_FOUND, FILE_NOT_FOUND_BODY)
}

/// Build 404 for an unrouted path
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &'static str) -> Response<Full<Bytes>> {
    let mut response = build_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    response
        .headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static(allow));
    response
}

/// Build 408 Request Timeout response
pub fn build_408_response() -> Response<Full<Bytes>> {
    build_response(StatusCode::REQUEST_TIMEOUT, "Request Timeout")
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_response(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_length(response: &Response<Full<Bytes>>) -> Option<&str> {
        response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_ok_sets_only_content_length() {
        let response = build_ok_response("hello");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_length(&response), Some("5"));
        assert_eq!(response.headers().len(), 1);
    }

    #[test]
    fn test_file_not_found() {
        let response = build_file_not_found_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(content_length(&response), Some("14"));
    }

    #[test]
    fn test_405_has_allow() {
        let response = build_405_response("POST");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(ALLOW).unwrap(), "POST");
    }

    #[test]
    fn test_content_length_counts_bytes() {
        let response = build_ok_response("héllo");
        assert_eq!(content_length(&response), Some("6"));
    }
}
