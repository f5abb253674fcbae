//! MIME type detection module
//!
//! Maps the supported image extensions to their Content-Type.

/// Fallback for anything outside the table
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extensions eligible for serving, lowercase
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["webp", "jpg", "jpeg", "png", "gif"];

/// Get MIME Content-Type based on file extension
///
/// Matching is case-insensitive, so `JPG` and `jpg` resolve the same way.
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return DEFAULT_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Whether an extension belongs to the supported image set
pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(extension))
}
