//! Logger module
//!
//! Logging utilities for the image server:
//! - Server lifecycle logging
//! - Access logging with configurable formats
//! - Request error lines in a dedicated error log
//! - Operational warnings and errors on stderr

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::ErrorLog;

use crate::config::Config;
use crate::image::ImageDirectories;
use std::net::SocketAddr;

/// Initialize the access logger with configuration
///
/// Should be called once at application startup. An empty path keeps the
/// access log on stdout.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(non_empty(&config.logging.access_log_file))
}

/// Open the configured request error log; an empty path means stderr
pub fn open_error_log(config: &Config) -> std::io::Result<ErrorLog> {
    ErrorLog::open(non_empty(&config.logging.error_log_file))
}

fn non_empty(path: &Option<String>) -> Option<&str> {
    path.as_deref().filter(|p| !p.is_empty())
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Operational diagnostics never share the request error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, dirs: &ImageDirectories) {
    write_info("======================================");
    write_info("Random image server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Desktop images: {}", dirs.desktop.display()));
    write_info(&format!("Mobile images: {}", dirs.mobile.display()));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_server_stop() {
    write_info("[Shutdown] Stop signal received, no longer accepting connections");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
