use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Opens the log file in append mode. Until this is called every log call is a no-op.
pub fn init(path: impl AsRef<Path>) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

pub fn log(level: Level, message: &str) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if let Some(file) = logger.as_mut() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "[{}] {:<5} {}", timestamp, level.as_str(), message);
    }
}

pub fn info(message: &str) {
    log(Level::Info, message);
}

pub fn warn(message: &str) {
    log(Level::Warn, message);
}

pub fn error(message: &str) {
    log(Level::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_without_init_is_noop() {
        info("nobody is listening");
        error("still nobody");
    }

    #[test]
    fn test_logger_writes_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        init(&path);
        warn("Test log message");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("WARN"));
        assert!(content.contains("Test log message"));
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(Level::Info.as_str(), "INFO");
        assert_eq!(Level::Warn.as_str(), "WARN");
        assert_eq!(Level::Error.as_str(), "ERROR");
    }
}
