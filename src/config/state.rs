// Application state module
// Holds the loaded configuration, the image responder built from it and the
// request error log

use std::path::Path;

use super::types::Config;
use crate::http::CachePolicy;
use crate::image::{ImageDirectories, ImageResponder};
use crate::logger::ErrorLog;

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    pub responder: ImageResponder,
    pub error_log: ErrorLog,
}

impl AppState {
    pub fn new(config: &Config, error_log: ErrorLog) -> Self {
        let images = &config.images;
        let dirs = ImageDirectories::new(
            Path::new(&images.base_dir),
            &images.desktop_dir,
            &images.mobile_dir,
        );
        let responder =
            ImageResponder::new(dirs, CachePolicy::from_max_age(config.http.cache_max_age));

        Self {
            config: config.clone(),
            responder,
            error_log,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
