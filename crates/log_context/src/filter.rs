//! Severity levels and the string-containment level filter.

use std::fmt;

/// Severity of a log record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Fine-grained request-handling detail.
    Trace,

    /// Debugging and profiling output. Usually enabled during initial
    /// deployments or while hunting bottlenecks.
    Debug,

    /// Normal progress messages. No reaction required; useful when
    /// reconstructing what the system did.
    Info,

    /// Something unusual that deserves operator attention without being an
    /// error yet.
    Warning,

    /// A failure that needs intervention soon. A user mistake is not a
    /// system error and does not belong at this level.
    Error,

    /// The system, or one of its subsystems, cannot continue. Emitting an
    /// enabled record at this level terminates the process once the record
    /// is written.
    Fatal,
}

impl Level {
    /// All levels, in increasing severity order.
    pub const ALL: [Self; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Fatal,
    ];

    /// Canonical level name. The same string is used for filter matching and
    /// for the `level` field of emitted records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of enabled severities, kept as the raw filter string it was
/// configured with.
///
/// A level is enabled when its canonical name occurs anywhere in the string,
/// so any separator works (`"Error|Warning"`, `"Error,Warning"`). Matching
/// is literal containment and case-sensitive. The sentinel `"All"` enables
/// every level. The default (empty) filter enables nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelFilter {
    levels: String,
}

impl LevelFilter {
    /// Sentinel value enabling every level.
    pub const ALL_SENTINEL: &'static str = "All";

    /// Wraps a raw filter string.
    pub fn new(levels: impl Into<String>) -> Self {
        Self {
            levels: levels.into(),
        }
    }

    /// Whether records at `level` should be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        self.levels.contains(Self::ALL_SENTINEL) || self.levels.contains(level.as_str())
    }

    /// The raw filter string.
    pub fn as_str(&self) -> &str {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_title_case() {
        assert_eq!(Level::Warning.as_str(), "Warning");
        assert_eq!(Level::Fatal.to_string(), "Fatal");
    }

    #[test]
    fn all_sentinel_enables_every_level() {
        let filter = LevelFilter::new("All");
        for level in Level::ALL {
            assert!(filter.enabled(level), "{level} should be enabled");
        }
    }

    #[test]
    fn pipe_separated_filter_enables_exactly_the_named_levels() {
        let filter = LevelFilter::new("Error|Warning");
        assert!(filter.enabled(Level::Error));
        assert!(filter.enabled(Level::Warning));
        assert!(!filter.enabled(Level::Trace));
        assert!(!filter.enabled(Level::Debug));
        assert!(!filter.enabled(Level::Info));
        assert!(!filter.enabled(Level::Fatal));
    }

    #[test]
    fn empty_filter_enables_nothing() {
        let filter = LevelFilter::default();
        for level in Level::ALL {
            assert!(!filter.enabled(level), "{level} should be disabled");
        }
    }

    #[test]
    fn matching_is_containment_regardless_of_separator() {
        let filter = LevelFilter::new("Info,Debug");
        assert!(filter.enabled(Level::Info));
        assert!(filter.enabled(Level::Debug));
        assert!(!filter.enabled(Level::Error));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let filter = LevelFilter::new("error|warning");
        assert!(!filter.enabled(Level::Error));
        assert!(!filter.enabled(Level::Warning));
    }
}
