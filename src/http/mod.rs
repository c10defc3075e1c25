//! HTTP protocol layer module
//!
//! Form body decoding and response builders, decoupled from routing.

pub mod form;
pub mod response;

// Re-export commonly used types
pub use form::EchoFormat;
pub use response::{
    build_400_response, build_404_response, build_405_response, build_408_response,
    build_413_response,
    build_500_response, build_file_not_found_response, build_ok_response,
};
