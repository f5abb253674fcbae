//! Directory listing for servable images
//!
//! Only entries directly inside the directory are considered. Names starting
//! with `.` are always skipped, whatever their extension. A directory that is
//! missing or unreadable yields an empty list instead of an error, so the
//! caller reports it the same way as an empty directory.

use crate::http::mime;
use crate::logger;
use std::path::Path;
use tokio::fs;

/// List supported image file names in `dir`, sorted by name
pub async fn list_images(dir: &Path) -> Vec<String> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!(
                "Image directory not found or inaccessible '{}': {e}",
                dir.display()
            ));
            return Vec::new();
        }
    };

    let mut images = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                logger::log_warning(&format!(
                    "Stopped reading image directory '{}': {e}",
                    dir.display()
                ));
                break;
            }
        };

        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_eligible_name(&name) {
            continue;
        }

        // Follows symlinks, so a link to an image file is servable
        match fs::metadata(entry.path()).await {
            Ok(meta) if meta.is_file() => images.push(name),
            _ => {}
        }
    }

    images.sort();
    images
}

/// Visible file name with a supported extension
fn is_eligible_name(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(mime::is_supported_extension)
}
