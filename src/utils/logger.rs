//! Logger utility for application-wide logging
//!
//! This module provides a file logger that works alongside the standard log
//! crate, and a console fallback through `env_logger`.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Metadata, LevelFilter};
use crate::coordinate::TransformReport;

/// File-backed logger
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written by the `Log` implementation
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: LevelFilter::Info,
        })
    }

    /// Creates a logger that discards everything
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
            level: LevelFilter::Off,
        }
    }

    /// Set the most verbose level passed through the `Log` implementation
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Writes a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn write_line(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file mutex poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs the intermediate quantities of a transformation
    ///
    /// # Arguments
    ///
    /// * `target` - The UV point that was transformed
    /// * `report` - Report returned by the transformer
    pub fn log_transform_report(&self, target: (f64, f64), report: &TransformReport) -> io::Result<()> {
        self.write_line("Transform Report:")?;
        self.write_line(&format!("  UV target: ({}, {})", target.0, target.1))?;
        self.write_line(&format!("  XY target: ({}, {})",
                                 report.output.target.x, report.output.target.y))?;
        self.write_line(&format!("  Scale ratio: {}, Scale factor: {}",
                                 report.scale_ratio, report.output.scale_factor))?;
        self.write_line(&format!("  Rotation: {} rad, XY bearing: {} rad",
                                 report.rotation, report.bearing))?;
        self.write_line(&format!("  Consistency ratio: {}", report.consistency_ratio))?;
        Ok(())
    }

    /// Static method to route the log crate into a file
    pub fn init_global_logger(log_file: &str, level: LevelFilter) -> io::Result<()> {
        let global_logger = Logger::new(log_file)?.with_level(level);

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }

    /// Static method to route the log crate to stderr via env_logger
    ///
    /// `RUST_LOG` still overrides the given level.
    pub fn init_console_logger(level: LevelFilter) {
        let result = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp(None)
            .try_init();

        if result.is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.write_line(&message);
        }
    }

    fn flush(&self) {
        // Already flushing in write_line
    }
}
