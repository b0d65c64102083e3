//! Console and SD card logger.
//!
//! Implements the [`log`] facade. Every record is printed to the console and
//! appended to `auton_log.txt` in the root of the SD card.
//!
//! Each line carries the level, the time since program start, the module
//! path and the message:
//!
//! ```text
//! INFO [12s 40ms] autonkit::auton::calibration - Calibrated left tracker offset: 1.4821 in
//! WARN [31s 2ms] autonkit::auton::recovery - Drive of -12 in still blocked after 3 attempts, giving up
//! ```

use std::{
    fmt,
    fs::OpenOptions,
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::format_duration;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Name of the log file on the SD card.
pub const LOG_FILE: &str = "auton_log.txt";

/// Logger writing to both the console and [`LOG_FILE`].
pub struct AutonLogger {
    /// `None` when the file could not be opened (e.g. no SD card inserted).
    file_writer: Mutex<Option<BufWriter<std::fs::File>>>,
    #[cfg(not(target_os = "vexos"))]
    started:     std::time::Instant,
}

impl AutonLogger {
    fn new() -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
            #[cfg(not(target_os = "vexos"))]
            started: std::time::Instant::now(),
        }
    }

    #[cfg(target_os = "vexos")]
    fn uptime(&self) -> Duration { vexide::time::user_uptime() }

    #[cfg(not(target_os = "vexos"))]
    fn uptime(&self) -> Duration { self.started.elapsed() }
}

/// Formats one log line, including the trailing newline.
///
/// The uptime is truncated to milliseconds.
fn format_line(level: Level, uptime: Duration, target: &str, args: impl fmt::Display) -> String {
    let uptime = Duration::from_millis(uptime.as_millis() as u64);
    format!("{} [{}] {} - {}\n", level, format_duration(uptime), target, args)
}

impl log::Log for AutonLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), self.uptime(), record.target(), record.args());
        print!("{}", line);

        if let Ok(mut guard) = self.file_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writer.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<AutonLogger> = OnceLock::new();

/// Installs the logger as the global [`log`] backend.
///
/// Call once at program start, before any routine runs.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(AutonLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}
