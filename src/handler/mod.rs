//! Request handler module
//!
//! Routes each request to the index file responder or the form echo
//! responder.

pub mod form_echo;
pub mod router;
pub mod static_file;

// Re-export main entry point
pub use router::handle_request;

use hyper::Method;

/// Method comparison ignoring ASCII case, so `get` matches `GET`
pub fn method_is(method: &Method, expected: &Method) -> bool {
    method.as_str().eq_ignore_ascii_case(expected.as_str())
}
