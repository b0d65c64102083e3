//! Filesystem utilities for the V5 Brain.
//!
//! # Logging
//!
//! The `logger` submodule writes every log record to the console and to
//! `auton_log.txt` on the SD card. Calibration results are logged at
//! `info`, so a run's offsets can be read off the card afterwards.
//!
//! # Example
//!
//! ```ignore
//! use autonkit::fs::logger;
//! use log::LevelFilter;
//!
//! logger::init(LevelFilter::Info).expect("Failed to initialize logger");
//! ```

/// Console and SD card logging.
pub mod logger;
