//! Log writer module
//!
//! Access lines go to stdout or an append-mode file through the process-wide
//! writer. Failed requests are recorded in a separate [`ErrorLog`] that holds
//! nothing but `[time] Error <code>: <message>` lines. Operational warnings
//! and errors always go to stderr.

use super::format::format_request_error;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Where one stream of log lines ends up
enum Sink {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl Sink {
    /// Append to `path` when given, otherwise use the console `fallback`
    fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        let Some(path) = path else {
            return Ok(fallback);
        };

        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::File(Mutex::new(file)))
    }

    /// Write one line; failures are dropped
    fn write_line(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Stderr => eprintln!("{line}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{line}");
                }
            }
        }
    }
}

/// Access log destination
pub struct LogWriter {
    access: Sink,
}

impl LogWriter {
    pub fn new(access_log_file: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            access: Sink::open(access_log_file, Sink::Stdout)?,
        })
    }

    pub fn write_access(&self, message: &str) {
        self.access.write_line(message);
    }
}

/// Install the process-wide writer; fails if the access log cannot be
/// opened or a writer is already installed.
pub fn init(access_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file)?;
    LOG_WRITER
        .set(writer)
        .map_err(|_| io::Error::new(io::ErrorKind::AlreadyExists, "log writer already initialized"))
}

/// The installed writer, if `init()` has run
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

/// Record of failed requests, one line each
pub struct ErrorLog {
    sink: Sink,
}

impl ErrorLog {
    /// Append to `path`, or write to stderr when no path is given
    pub fn open(path: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            sink: Sink::open(path, Sink::Stderr)?,
        })
    }

    /// Append `[YYYY-MM-DD HH:MM:SS] Error <status>: <message>` in local time
    pub fn record(&self, status: u16, message: &str) {
        self.sink
            .write_line(&format_request_error(&chrono::Local::now(), status, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let access = dir.path().join("access.log");
        std::fs::write(&access, "existing line\n").unwrap();

        let writer = LogWriter::new(access.to_str()).unwrap();
        writer.write_access("GET / 200");

        assert_eq!(
            std::fs::read_to_string(&access).unwrap(),
            "existing line\nGET / 200\n"
        );
    }

    #[test]
    fn test_error_log_records_formatted_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.log");

        let log = ErrorLog::open(path.to_str()).unwrap();
        log.record(404, "No images found.");
        log.record(500, "Error reading image file.");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Error 404: No images found."));
        assert!(lines[1].ends_with("] Error 500: Error reading image file."));
        assert!(chrono::NaiveDateTime::parse_from_str(&lines[0][1..20], "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/error.log");

        let log = ErrorLog::open(nested.to_str()).unwrap();
        log.record(404, "Image not found.");
        let contents = std::fs::read_to_string(&nested).unwrap();
        assert!(contents.ends_with("] Error 404: Image not found.\n"));
    }

    #[test]
    fn test_unopenable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        assert!(LogWriter::new(dir.path().to_str()).is_err());
        assert!(ErrorLog::open(dir.path().to_str()).is_err());
    }
}
