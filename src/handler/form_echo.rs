//! Form echo responder
//!
//! Reads a `key=value&...` body and answers with the decoded pairs.

use crate::handler::method_is;
use crate::http::form::{self, EchoFormat};
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::time::Duration;

/// Echo the form pairs of a POST body.
///
/// The body must arrive within `read_timeout` and stay under `max_body_size`.
pub async fn echo_form<B>(
    req: Request<B>,
    max_body_size: u64,
    read_timeout: Duration,
    format: EchoFormat,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if !method_is(req.method(), &Method::POST) {
        logger::log_warning(&format!("Method not allowed on form: {}", req.method()));
        return http::build_405_response("POST");
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let collect = Limited::new(req.into_body(), limit).collect();
    let Ok(collected) = tokio::time::timeout(read_timeout, collect).await else {
        logger::log_warning(&format!(
            "Request body not received within {} seconds",
            read_timeout.as_secs()
        ));
        return http::build_408_response();
    };
    let body = match collected {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_error(&format!(
                "Request body too large (max: {max_body_size} bytes)"
            ));
            return http::build_413_response();
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return http::build_400_response();
        }
    };

    let text = String::from_utf8_lossy(&body);
    let parsed = form::parse(&text);
    if parsed.is_empty() && !body.is_empty() {
        logger::log_debug("Form body contained no valid key=value pairs");
    } else {
        logger::log_debug(&format!(
            "Parsed {} form field(s) from {} byte body",
            parsed.len(),
            body.len()
        ));
    }

    http::build_ok_response(form::render(&parsed, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Frame;
    use hyper::StatusCode;
    use std::convert::Infallible;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Body whose bytes never arrive
    struct StalledBody;

    impl Body for StalledBody {
        type Data = Bytes;
        type Error = Infallible;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
            Poll::Pending
        }
    }

    fn post(body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::POST)
            .uri("/post")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_echo_pairs() {
        let response = echo_form(post("name=Alice&age=30"), 1024, TIMEOUT, EchoFormat::Braces).await;
        assert_eq!(response.status(), StatusCode::OK);
        let expected = "Received POST data: {name=Alice, age=30}";
        assert_eq!(
            response.headers()["content-length"],
            expected.len().to_string().as_str()
        );
        assert_eq!(body_text(response).await, expected);
    }

    #[tokio::test]
    async fn test_empty_body() {
        let response = echo_form(post(""), 1024, TIMEOUT, EchoFormat::Braces).await;
        assert_eq!(body_text(response).await, "Received POST data: {}");
    }

    #[tokio::test]
    async fn test_json_format() {
        let response = echo_form(post("a=1&b"), 1024, TIMEOUT, EchoFormat::Json).await;
        assert_eq!(body_text(response).await, r#"Received POST data: {"a":"1"}"#);
    }

    #[tokio::test]
    async fn test_multibyte_length() {
        let response = echo_form(post("city=Zürich"), 1024, TIMEOUT, EchoFormat::Braces).await;
        let expected = "Received POST data: {city=Zürich}";
        assert_eq!(
            response.headers()["content-length"],
            expected.len().to_string().as_str()
        );
        assert_eq!(body_text(response).await, expected);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let req = Request::builder()
            .method(Method::POST)
            .body(Full::new(Bytes::from_static(b"k=\xff")))
            .unwrap();
        let response = echo_form(req, 1024, TIMEOUT, EchoFormat::Braces).await;
        assert_eq!(
            body_text(response).await,
            "Received POST data: {k=\u{fffd}}"
        );
    }

    #[tokio::test]
    async fn test_body_too_large() {
        let response = echo_form(post("key=0123456789"), 8, TIMEOUT, EchoFormat::Braces).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_get_not_allowed() {
        let req = Request::builder()
            .method(Method::GET)
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = echo_form(req, 1024, TIMEOUT, EchoFormat::Braces).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "POST");
    }

    #[tokio::test]
    async fn test_lowercase_post_accepted() {
        let req = Request::builder()
            .method(Method::from_bytes(b"post").unwrap())
            .body(Full::new(Bytes::from_static(b"x=1&x=2")))
            .unwrap();
        let response = echo_form(req, 1024, TIMEOUT, EchoFormat::Braces).await;
        assert_eq!(body_text(response).await, "Received POST data: {x=2}");
    }

    #[tokio::test]
    async fn test_stalled_body_times_out() {
        let req = Request::builder()
            .method(Method::POST)
            .body(StalledBody)
            .unwrap();
        let response = echo_form(
            req,
            1024,
            Duration::from_millis(100),
            EchoFormat::Braces,
        )
        .await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
