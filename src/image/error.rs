//! Failures of the image request path

use hyper::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal failure for a single image request
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("no supported images in '{}'", .dir.display())]
    NoImagesFound { dir: PathBuf },

    #[error("selected image '{}' no longer exists", .path.display())]
    ImageVanished { path: PathBuf },

    #[error("failed to read image '{}': {source}", .path.display())]
    StreamFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImageError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NoImagesFound { .. } | Self::ImageVanished { .. } => StatusCode::NOT_FOUND,
            Self::StreamFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short text sent to the client and written to the error log
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::NoImagesFound { .. } => "No images found.",
            Self::ImageVanished { .. } => "Image not found.",
            Self::StreamFailure { .. } => "Error reading image file.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let missing = ImageError::NoImagesFound { dir: "landscape".into() };
        let vanished = ImageError::ImageVanished { path: "landscape/a.png".into() };
        let failed = ImageError::StreamFailure {
            path: "landscape/a.png".into(),
            source: std::io::Error::other("disk gone"),
        };

        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(vanished.status(), StatusCode::NOT_FOUND);
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(missing.client_message(), "No images found.");
        assert_eq!(vanished.client_message(), "Image not found.");
        assert_eq!(failed.client_message(), "Error reading image file.");
    }

    #[test]
    fn test_display_includes_path() {
        let err = ImageError::StreamFailure {
            path: "portrait/b.jpg".into(),
            source: std::io::Error::other("disk gone"),
        };
        let text = err.to_string();
        assert!(text.contains("portrait/b.jpg"));
        assert!(text.contains("disk gone"));
    }
}
