//! `log_context` provides a structured logging facade that stamps every
//! record with the identity of the emitting process.
//!
//! It offers:
//! - A [`LogContext`] bound to a per-day log file, writing one JSON record
//!   per line.
//! - A [`LevelFilter`] selecting the enabled severities by name.
//! - Identity stamping: every record carries the `uid`, `name`, and `srv`
//!   fields configured at initialization, so call sites never repeat them.
//!
//! Each context owns its destination and formatter outright. Two contexts
//! for different services in the same process never write through each
//! other's file, and emissions from a context that was never successfully
//! initialized are silent no-ops.
//!
//! # Example
//!
//! ```no_run
//! use log_context::{LogConfig, LogContext};
//!
//! let mut log = LogContext::new();
//! log.init(LogConfig {
//!     logs_directory: "logs".into(),
//!     levels: "Info|Warning|Error".into(),
//!     uid: "a1b2c3".into(),
//!     name: "worker-1".into(),
//!     service: "app".into(),
//! });
//!
//! log.info("worker started");
//! log.error(Some(&"connection refused"), "upstream unreachable");
//! ```

mod filter;
mod formatter;
mod sink;

use std::{
    fmt,
    path::{Path, PathBuf},
    process,
};

use serde::{Deserialize, Serialize};

pub use self::filter::{Level, LevelFilter};

mod keys {
    pub(crate) const MESSAGE: &str = "message";
    pub(crate) const HOSTNAME: &str = "hostname";
    pub(crate) const PID: &str = "pid";
    pub(crate) const LEVEL: &str = "level";
    pub(crate) const TIME: &str = "time";
    pub(crate) const NAME: &str = "name";
    pub(crate) const UID: &str = "uid";
    pub(crate) const SRV: &str = "srv";
    pub(crate) const ERROR: &str = "error";
}

/// Errors that can occur while binding a context to its destination.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The logs directory could not be created.
    #[error("Failed to create logs directory: {0}")]
    DirectoryCreation(#[source] std::io::Error),

    /// The day's log file could not be opened.
    #[error("Failed to open log file: {0}")]
    FileOpen(#[source] std::io::Error),

    /// A record could not be serialized to JSON.
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// The identity fields attached to every emitted record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier of the running process, emitted as `uid`.
    pub uid: String,

    /// Name of the running process, emitted as `name`.
    pub name: String,

    /// Service the process belongs to, emitted as `srv`.
    pub service: String,
}

/// Configuration for binding a [`LogContext`] to its destination and
/// identity. All fields are required; there are no defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    /// Base directory for log files. Created if missing.
    pub logs_directory: PathBuf,

    /// Enabled severity names, matched by containment (for example
    /// `"Error|Warning"`), or the sentinel `"All"`.
    pub levels: String,

    /// Unique identifier of the running process.
    pub uid: String,

    /// Name of the running process.
    pub name: String,

    /// Service the process belongs to. Also determines the log file name.
    pub service: String,
}

/// A logging facade bound to one log file and one process identity.
///
/// A context starts unbound: the filter is empty and every emission is a
/// silent no-op. [`init`](Self::init) binds it to a file and an identity in
/// one step; after a successful initialization the destination, filter, and
/// identity stay fixed for the life of the context. Emission operations take
/// `&self` and never mutate the context.
#[derive(Debug, Default)]
pub struct LogContext {
    sink: Option<sink::FileSink>,
    formatter: formatter::JsonFormatter,
    filter: LevelFilter,
    identity: Identity,
}

impl LogContext {
    /// Creates an unbound context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context and binds it in one step.
    ///
    /// Failure behavior is that of [`init`](Self::init); after a directory
    /// failure the returned context is unbound.
    pub fn initialized(config: LogConfig) -> Self {
        let mut context = Self::new();
        context.init(config);
        context
    }

    /// Binds the context to the day's log file and the given identity.
    ///
    /// The log file is `<service>_<day>.log` under `config.logs_directory`,
    /// where `<day>` is the local calendar day-of-month at this moment.
    /// Records append across runs within the same day, and the day number
    /// alone keys the file, so the same day of a later month reuses it.
    ///
    /// Failure to create the logs directory is reported on standard error
    /// and leaves the context unbound; subsequent emissions are no-ops.
    /// Failure to open the log file terminates the process with a non-zero
    /// status, independent of the level filter.
    pub fn init(&mut self, config: LogConfig) {
        match self.try_init(config) {
            Ok(()) => (),
            Err(err @ LoggerError::DirectoryCreation(_)) => {
                // Setup failures cannot go through the context itself; it
                // has no destination yet.
                #[allow(clippy::print_stderr)]
                {
                    eprintln!("[ERROR] {}: {err}", env!("CARGO_PKG_NAME"));
                }
            }
            Err(err) => {
                #[allow(clippy::print_stderr)]
                {
                    eprintln!("[FATAL] {}: {err}", env!("CARGO_PKG_NAME"));
                }
                process::exit(1);
            }
        }
    }

    /// Fallible variant of [`init`](Self::init): reports all failures to the
    /// caller instead of degrading or terminating.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::DirectoryCreation`] when the logs directory
    /// cannot be created and [`LoggerError::FileOpen`] when the log file
    /// cannot be opened. The context is only modified on success; a failed
    /// re-initialization keeps any previous binding.
    pub fn try_init(&mut self, config: LogConfig) -> Result<(), LoggerError> {
        let sink = sink::FileSink::open(&config.logs_directory, &config.service)?;

        self.sink = Some(sink);
        self.filter = LevelFilter::new(config.levels);
        self.identity = Identity {
            uid: config.uid,
            name: config.name,
            service: config.service,
        };
        Ok(())
    }

    /// Path of the bound log file, or `None` while unbound.
    pub fn log_path(&self) -> Option<&Path> {
        self.sink.as_ref().map(sink::FileSink::path)
    }

    /// Whether records at `level` would currently be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        self.sink.is_some() && self.filter.enabled(level)
    }

    /// Logs fine-grained request-handling detail.
    pub fn trace(&self, message: impl fmt::Display) {
        if self.enabled(Level::Trace) {
            self.write(Level::Trace, None, &message.to_string());
        }
    }

    /// Logs debugging and profiling output.
    pub fn debug(&self, message: impl fmt::Display) {
        if self.enabled(Level::Debug) {
            self.write(Level::Debug, None, &message.to_string());
        }
    }

    /// Logs normal progress messages.
    pub fn info(&self, message: impl fmt::Display) {
        if self.enabled(Level::Info) {
            self.write(Level::Info, None, &message.to_string());
        }
    }

    /// Logs something unusual that deserves operator attention.
    pub fn warning(&self, message: impl fmt::Display) {
        if self.enabled(Level::Warning) {
            self.write(Level::Warning, None, &message.to_string());
        }
    }

    /// Logs a failure that needs intervention.
    ///
    /// The stringified `error` is attached under the `error` field. Pass
    /// `None` when there is no underlying error value; the field is then
    /// present but empty.
    pub fn error(&self, error: Option<&dyn fmt::Display>, message: impl fmt::Display) {
        if self.enabled(Level::Error) {
            self.write(Level::Error, Some(&error_text(error)), &message.to_string());
        }
    }

    /// Logs an unrecoverable failure, then terminates the process with a
    /// non-zero status once the record is written.
    ///
    /// Subject to the level filter like every other severity: when `Fatal`
    /// is not enabled the call is a silent no-op and the process keeps
    /// running.
    pub fn fatal(&self, error: Option<&dyn fmt::Display>, message: impl fmt::Display) {
        if self.enabled(Level::Fatal) {
            self.write(Level::Fatal, Some(&error_text(error)), &message.to_string());
            process::exit(1);
        }
    }

    fn write(&self, level: Level, error: Option<&str>, message: &str) {
        let Some(sink) = &self.sink else { return };
        if let Ok(record) = self.formatter.format(level, &self.identity, error, message) {
            sink.write_record(record);
        }
    }
}

/// Stringified form of a caller-supplied error value; empty when absent.
fn error_text(error: Option<&dyn fmt::Display>) -> String {
    error.map(|error| error.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unbound_context_is_a_silent_no_op() {
        let context = LogContext::new();
        assert!(context.log_path().is_none());
        for level in Level::ALL {
            assert!(!context.enabled(level));
        }

        context.trace("ignored");
        context.info("ignored");
        context.error(None, "ignored");
        // Fatal is disabled on an unbound context, so this must not exit.
        context.fatal(None, "ignored");
    }

    #[test]
    fn error_text_is_empty_for_absent_errors() {
        assert_eq!(error_text(None), "");

        let err = std::io::Error::other("boom");
        assert_eq!(error_text(Some(&err)), "boom");
    }
}
