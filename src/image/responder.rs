//! Image responder
//!
//! Runs the per-request flow: classify the device, list its directory, pick
//! one image at random, then read it. Every failure is terminal for the
//! request; nothing is retried and no fallback image is used.

use super::device::DeviceClass;
use super::error::ImageError;
use super::lister::list_images;
use super::selector::select_random;
use crate::http::{mime, CachePolicy};
use hyper::body::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Image roots keyed by device class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDirectories {
    pub desktop: PathBuf,
    pub mobile: PathBuf,
}

impl ImageDirectories {
    /// Resolve both directory names against `base_dir`
    pub fn new(base_dir: &Path, desktop_dir: &str, mobile_dir: &str) -> Self {
        Self {
            desktop: base_dir.join(desktop_dir),
            mobile: base_dir.join(mobile_dir),
        }
    }

    pub fn for_device(&self, device: DeviceClass) -> &Path {
        match device {
            DeviceClass::Mobile => &self.mobile,
            DeviceClass::Desktop => &self.desktop,
        }
    }
}

/// An image chosen for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub device: DeviceClass,
    pub dir: PathBuf,
    pub file_name: String,
}

impl SelectedImage {
    pub fn path(&self) -> PathBuf {
        image_path(&self.dir, &self.file_name)
    }

    pub fn content_type(&self) -> &'static str {
        mime::get_content_type(Path::new(&self.file_name).extension().and_then(|e| e.to_str()))
    }
}

/// A selected image together with its bytes
#[derive(Debug, Clone)]
pub struct ServedImage {
    pub image: SelectedImage,
    pub data: Bytes,
}

/// Picks and loads a random image per request
#[derive(Debug, Clone)]
pub struct ImageResponder {
    dirs: ImageDirectories,
    cache_policy: CachePolicy,
}

impl ImageResponder {
    pub const fn new(dirs: ImageDirectories, cache_policy: CachePolicy) -> Self {
        Self { dirs, cache_policy }
    }

    pub const fn directories(&self) -> &ImageDirectories {
        &self.dirs
    }

    /// Freshness window attached to every served image
    pub const fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    /// Full request flow with a freshly seeded RNG
    pub async fn respond(&self, user_agent: Option<&str>) -> Result<ServedImage, ImageError> {
        let mut rng = StdRng::from_entropy();
        let selected = self.select(user_agent, &mut rng).await?;
        load_image(selected).await
    }

    /// List the device's directory and pick one entry
    pub async fn select<R>(
        &self,
        user_agent: Option<&str>,
        rng: &mut R,
    ) -> Result<SelectedImage, ImageError>
    where
        R: Rng + ?Sized,
    {
        let device = DeviceClass::from_user_agent(user_agent);
        let dir = self.dirs.for_device(device);
        let candidates = list_images(dir).await;

        let file_name = select_random(&candidates, rng).ok_or_else(|| {
            ImageError::NoImagesFound {
                dir: dir.to_path_buf(),
            }
        })?;

        Ok(SelectedImage {
            device,
            dir: dir.to_path_buf(),
            file_name: file_name.clone(),
        })
    }
}

/// Read the selected image from disk
///
/// The file may have been removed since it was listed; that case is
/// reported as [`ImageError::ImageVanished`] rather than a read failure.
pub async fn load_image(image: SelectedImage) -> Result<ServedImage, ImageError> {
    let path = image.path();

    match fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(ImageError::ImageVanished { path }),
        Err(e) => return Err(read_error(path, e)),
    }

    let data = match fs::read(&path).await {
        Ok(data) => data,
        Err(e) => return Err(read_error(path, e)),
    };

    Ok(ServedImage {
        image,
        data: Bytes::from(data),
    })
}

fn read_error(path: PathBuf, err: io::Error) -> ImageError {
    if err.kind() == io::ErrorKind::NotFound {
        ImageError::ImageVanished { path }
    } else {
        ImageError::StreamFailure { path, source: err }
    }
}

/// Join a file name under its directory
fn image_path(dir: &Path, file_name: &str) -> PathBuf {
    // A leading slash would make `join` discard the directory
    dir.join(file_name.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";

    fn fixture() -> (tempfile::TempDir, ImageResponder) {
        let base = tempfile::tempdir().unwrap();
        let dirs = ImageDirectories::new(base.path(), "landscape", "portrait");
        std::fs::create_dir(&dirs.desktop).unwrap();
        std::fs::create_dir(&dirs.mobile).unwrap();
        (base, ImageResponder::new(dirs, CachePolicy::default()))
    }

    #[test]
    fn test_directories_for_device() {
        let dirs = ImageDirectories::new(Path::new("/srv"), "landscape", "portrait");
        assert_eq!(dirs.for_device(DeviceClass::Desktop), Path::new("/srv/landscape"));
        assert_eq!(dirs.for_device(DeviceClass::Mobile), Path::new("/srv/portrait"));
    }

    #[test]
    fn test_image_path_strips_leading_slash() {
        assert_eq!(
            image_path(Path::new("landscape"), "/a.png"),
            PathBuf::from("landscape/a.png")
        );
        assert_eq!(
            image_path(Path::new("landscape/"), "a.png"),
            PathBuf::from("landscape/a.png")
        );
    }

    #[test]
    fn test_content_type_from_selected_name() {
        let image = SelectedImage {
            device: DeviceClass::Desktop,
            dir: PathBuf::from("landscape"),
            file_name: "photo.JPG".to_string(),
        };
        assert_eq!(image.content_type(), "image/jpeg");
    }

    #[test]
    fn test_read_error_classification() {
        let path = PathBuf::from("landscape/a.png");
        let vanished = read_error(path.clone(), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(vanished, ImageError::ImageVanished { .. }));

        let failed = read_error(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(failed, ImageError::StreamFailure { .. }));
        assert_eq!(failed.status(), hyper::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_serves_only_desktop_image_without_user_agent() {
        let (_base, responder) = fixture();
        let bytes = b"RIFF\x00\x00\x00\x00WEBPVP8 ".to_vec();
        std::fs::write(responder.directories().desktop.join("sunset.webp"), &bytes).unwrap();

        let served = responder.respond(None).await.unwrap();
        assert_eq!(served.image.device, DeviceClass::Desktop);
        assert_eq!(served.image.file_name, "sunset.webp");
        assert_eq!(served.image.content_type(), "image/webp");
        assert_eq!(served.data, Bytes::from(bytes));
    }

    #[tokio::test]
    async fn test_iphone_uses_mobile_directory_only() {
        let (_base, responder) = fixture();
        std::fs::write(responder.directories().desktop.join("wide.png"), b"d").unwrap();
        std::fs::write(responder.directories().mobile.join("tall.png"), b"m").unwrap();

        for _ in 0..20 {
            let served = responder.respond(Some(IPHONE_UA)).await.unwrap();
            assert_eq!(served.image.device, DeviceClass::Mobile);
            assert_eq!(served.image.file_name, "tall.png");
        }
    }

    #[tokio::test]
    async fn test_empty_directory_is_not_found() {
        let (_base, responder) = fixture();
        std::fs::write(responder.directories().desktop.join("notes.txt"), b"x").unwrap();

        let err = responder.respond(None).await.unwrap_err();
        assert!(matches!(err, ImageError::NoImagesFound { .. }));
        assert_eq!(err.status(), hyper::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_found() {
        let base = tempfile::tempdir().unwrap();
        let dirs = ImageDirectories::new(base.path(), "landscape", "portrait");
        let responder = ImageResponder::new(dirs, CachePolicy::Disabled);

        let err = responder.respond(Some(IPHONE_UA)).await.unwrap_err();
        assert!(matches!(err, ImageError::NoImagesFound { .. }));
    }

    #[tokio::test]
    async fn test_deleted_after_selection_is_vanished() {
        let (_base, responder) = fixture();
        let path = responder.directories().desktop.join("gone.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let selected = responder.select(None, &mut rng).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = load_image(selected).await.unwrap_err();
        assert!(matches!(err, ImageError::ImageVanished { .. }));
        assert_eq!(err.status(), hyper::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_selection_spreads_across_files() {
        let (_base, responder) = fixture();
        let names = ["a.png", "b.jpg", "c.webp"];
        for name in names {
            std::fs::write(responder.directories().desktop.join(name), b"x").unwrap();
        }

        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..3000 {
            let selected = responder.select(None, &mut rng).await.unwrap();
            *counts.entry(selected.file_name).or_default() += 1;
        }

        for name in names {
            let count = counts.get(name).copied().unwrap_or_default();
            assert!((800..=1200).contains(&count), "{name} picked {count} times");
        }
    }
}
