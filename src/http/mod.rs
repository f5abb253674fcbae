//! HTTP protocol layer module
//!
//! Content-type lookup, cache headers and response builders, decoupled from
//! how an image gets picked.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cache::CachePolicy;
pub use response::{
    build_405_response, build_image_response, build_options_response, build_text_response,
};
