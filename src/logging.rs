//! Logging initialization and the structured-log capability
//!
//! The engine emits through the [`Logger`] trait rather than calling
//! `tracing` macros directly, so checks can run against a capturing
//! implementation in tests. [`TracingLogger`] is the production
//! implementation.

use std::io;
use std::sync::Mutex;

/// Severity of an emitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Structured-log capability used by the engine
///
/// The engine only emits; it never reads records back.
pub trait Logger {
    /// Emit a record at the given level with key/value fields
    fn log(&self, level: Level, message: &str, fields: &[(&str, String)]);

    fn debug(&self, message: &str, fields: &[(&str, String)]) {
        self.log(Level::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: &[(&str, String)]) {
        self.log(Level::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: &[(&str, String)]) {
        self.log(Level::Warn, message, fields);
    }

    fn error(&self, message: &str, fields: &[(&str, String)]) {
        self.log(Level::Error, message, fields);
    }
}

/// Render a message plus fields as a single `msg key=value` line
fn render(message: &str, fields: &[(&str, String)]) -> String {
    if fields.is_empty() {
        return message.to_string();
    }
    let rendered: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{message} {}", rendered.join(" "))
}

/// Logger that forwards to the `tracing` macros
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, fields: &[(&str, String)]) {
        let line = render(message, fields);
        match level {
            Level::Debug => tracing::debug!("{line}"),
            Level::Info => tracing::info!("{line}"),
            Level::Warn => tracing::warn!("{line}"),
            Level::Error => tracing::error!("{line}"),
        }
    }
}

/// A record captured by [`RecordingLogger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Logger that captures every record for later assertions
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured records, in emission order
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Captured warn-level records
    pub fn warnings(&self) -> Vec<LogRecord> {
        self.at_level(Level::Warn)
    }

    /// Captured error-level records
    pub fn errors(&self) -> Vec<LogRecord> {
        self.at_level(Level::Error)
    }

    fn at_level(&self, level: Level) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str, fields: &[(&str, String)]) {
        let record = LogRecord {
            level,
            message: message.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        };
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);
    }
}

/// Initialize logging based on the verbose flag
///
/// Writes to stderr so stdout stays clean for tooling. `RUST_LOG` overrides
/// the default filter.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}
