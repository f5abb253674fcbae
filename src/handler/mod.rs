//! Request handler module
//!
//! Method checks and dispatch to the random image endpoint.

pub mod random_image;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
