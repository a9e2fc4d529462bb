//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by all handlers: CORS header injection,
//! cache policies, MIME lookup, range parsing, and response builders.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_400_response, build_404_response, build_405_response,
    build_416_response, build_500_response, build_text_response,
};
