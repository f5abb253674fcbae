//! Random image endpoint
//!
//! Turns the responder's outcome into an HTTP response and records failures.

use crate::config::AppState;
use crate::http;
use crate::image::{DeviceClass, ImageError, ServedImage};
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Serve one random image for the given user agent
pub async fn serve_random_image(
    state: &AppState,
    user_agent: Option<&str>,
    is_head: bool,
    access_entry: Option<&mut AccessLogEntry>,
) -> Response<Full<Bytes>> {
    let outcome = state.responder.respond(user_agent).await;
    outcome_response(state, outcome, user_agent, is_head, access_entry)
}

fn outcome_response(
    state: &AppState,
    outcome: Result<ServedImage, ImageError>,
    user_agent: Option<&str>,
    is_head: bool,
    access_entry: Option<&mut AccessLogEntry>,
) -> Response<Full<Bytes>> {
    match outcome {
        Ok(served) => {
            if let Some(entry) = access_entry {
                entry.device = Some(served.image.device.as_str());
                entry.image = Some(served.image.file_name.clone());
            }
            http::build_image_response(
                served.data,
                served.image.content_type(),
                state.responder.cache_policy(),
                state.config.http.enable_cors,
                is_head,
            )
        }
        Err(err) => {
            if let Some(entry) = access_entry {
                entry.device = Some(DeviceClass::from_user_agent(user_agent).as_str());
            }
            error_response(state, &err)
        }
    }
}

/// Record a request failure and build its plain-text response
fn error_response(state: &AppState, err: &ImageError) -> Response<Full<Bytes>> {
    let status = err.status();
    state.error_log.record(status.as_u16(), err.client_message());
    http::build_text_response(status, err.client_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::image::responder::load_image;
    use crate::logger::ErrorLog;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::{Path, PathBuf};

    fn state_with_error_log(base: &Path) -> (AppState, PathBuf) {
        let mut cfg = Config::load_from(base.join("absent").to_str().unwrap()).unwrap();
        cfg.images.base_dir = base.to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        let log_path = base.join("error.log");
        let error_log = ErrorLog::open(log_path.to_str()).unwrap();
        (AppState::new(&cfg, error_log), log_path)
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_image_removed_before_read_is_404() {
        let base = tempfile::tempdir().unwrap();
        let (state, log_path) = state_with_error_log(base.path());
        let image = state.responder.directories().desktop.join("gone.gif");
        std::fs::create_dir_all(image.parent().unwrap()).unwrap();
        std::fs::write(&image, b"GIF89a").unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let selected = state.responder.select(None, &mut rng).await.unwrap();
        std::fs::remove_file(&image).unwrap();
        let outcome = load_image(selected).await;

        let resp = outcome_response(&state, outcome, None, false, None);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(resp).await, Bytes::from_static(b"Image not found."));

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(log.lines().count(), 1);
        assert!(log.trim_end().ends_with("] Error 404: Image not found."));
    }

    #[tokio::test]
    async fn test_read_failure_is_500() {
        let base = tempfile::tempdir().unwrap();
        let (state, log_path) = state_with_error_log(base.path());
        let outcome = Err(ImageError::StreamFailure {
            path: base.path().join("landscape/a.png"),
            source: std::io::Error::other("disk gone"),
        });

        let mut entry =
            AccessLogEntry::new("127.0.0.1".to_string(), "GET".to_string(), "/".to_string());
        let resp = outcome_response(&state, outcome, None, false, Some(&mut entry));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(entry.device, Some("desktop"));
        assert!(entry.image.is_none());
        assert_eq!(body_of(resp).await, Bytes::from_static(b"Error reading image file."));

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(log.lines().count(), 1);
        assert!(log.trim_end().ends_with("] Error 500: Error reading image file."));
    }

    #[tokio::test]
    async fn test_success_leaves_error_log_empty() {
        let base = tempfile::tempdir().unwrap();
        let (state, log_path) = state_with_error_log(base.path());
        let desktop = state.responder.directories().desktop.clone();
        std::fs::create_dir_all(&desktop).unwrap();
        std::fs::write(desktop.join("a.png"), b"png").unwrap();

        let resp = serve_random_image(&state, None, false, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(std::fs::read_to_string(&log_path).unwrap(), "");
    }
}
