/// File-backed `log` sink; the terminal itself belongs to the UI
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

/// Path of the log file. Logging is off when unset.
pub const LOG_PATH_VAR: &str = "ROUNDSHAPE_LOG";
/// Maximum level, e.g. `info` or `trace`. Defaults to `debug`.
pub const LOG_LEVEL_VAR: &str = "ROUNDSHAPE_LOG_LEVEL";

pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// Truncate `path` and log into it
    pub fn open<P: AsRef<Path>>(path: P, level: LevelFilter) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the file logger when `ROUNDSHAPE_LOG` is set.
///
/// Returns whether a logger was installed.
pub fn init_from_env() -> io::Result<bool> {
    let Ok(path) = std::env::var(LOG_PATH_VAR) else {
        return Ok(false);
    };
    let level = std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|value| LevelFilter::from_str(&value).ok())
        .unwrap_or(LevelFilter::Debug);

    let logger = FileLogger::open(&path, level)?;
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("error initializing logger: {}", e)))?;
    log::set_max_level(level);
    Ok(true)
}
