//! Random image module
//!
//! Everything between "a request arrived" and "these are the bytes to send":
//! device sniffing, directory listing, random selection and file loading.

pub mod device;
pub mod error;
pub mod lister;
pub mod responder;
pub mod selector;

pub use device::DeviceClass;
pub use error::ImageError;
pub use responder::{ImageDirectories, ImageResponder, ServedImage};
