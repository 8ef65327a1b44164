//! Diagnostics emitted by release gating
//!
//! Components report decisions and recoverable failures through an injected
//! [`DiagnosticsSink`] instead of a global logger, so hosts can observe
//! them deterministically. [`TracingSink`] is the default and forwards to
//! `tracing`; [`RecordingSink`] captures diagnostics in memory.

use std::fmt;
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::{debug, warn};

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine decision, logged at debug level
    Debug,
    /// Suspicious state worth surfacing to operators
    Warning,
}

/// A single observable decision or recoverable failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A configured parse pattern did not expand as a date pattern
    ParsePatternInvalid { pattern: String },
    /// A configured format pattern did not apply to the release date
    FormatPatternInvalid { pattern: String },
    /// A release-date string could not be parsed
    ReleaseDateParseFailed {
        input: String,
        pattern: String,
        reason: String,
    },
    /// A release date entry exists but its date was never parsed
    ReleaseDateUnset { change_set: String },
    /// The change set was released on or before the installation date
    ReleasedBeforeInstallation {
        change_set: String,
        released_on: NaiveDate,
        installation_date: NaiveDate,
    },
    /// No release date found and the filter rejects such change sets
    MissingReleaseDate { change_set: String },
}

impl Diagnostic {
    /// Severity this diagnostic is reported at
    pub fn severity(&self) -> Severity {
        match self {
            Self::ReleaseDateUnset { .. } => Severity::Warning,
            _ => Severity::Debug,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParsePatternInvalid { pattern } => {
                write!(f, "invalid parse pattern '{}', using the default", pattern)
            }
            Self::FormatPatternInvalid { pattern } => {
                write!(f, "invalid format pattern '{}', using the default", pattern)
            }
            Self::ReleaseDateParseFailed {
                input,
                pattern,
                reason,
            } => write!(
                f,
                "failed to parse release date '{}' with pattern '{}': {}",
                input, pattern, reason
            ),
            Self::ReleaseDateUnset { change_set } => write!(
                f,
                "change set '{}' has a release date entry without a parsed date, not accepted",
                change_set
            ),
            Self::ReleasedBeforeInstallation {
                change_set,
                released_on,
                installation_date,
            } => write!(
                f,
                "change set '{}' was released before the current installation ({} <= {}), not accepted",
                change_set, released_on, installation_date
            ),
            Self::MissingReleaseDate { change_set } => write!(
                f,
                "change set '{}' does not carry a release date, the filter is advised to not accept it",
                change_set
            ),
        }
    }
}

/// Observer interface for diagnostics
pub trait DiagnosticsSink: Send + Sync {
    /// Report a diagnostic
    fn emit(&self, diagnostic: Diagnostic);
}

/// Default sink forwarding diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => warn!("{}", diagnostic),
            Severity::Debug => debug!("{}", diagnostic),
        }
    }
}

/// Sink capturing diagnostics in memory, for tests and host test harnesses
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics emitted so far, in order
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().expect("diagnostics mutex poisoned").clone()
    }

    /// Drain and return the captured diagnostics
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.lock().expect("diagnostics mutex poisoned"))
    }
}

impl DiagnosticsSink for RecordingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.records
            .lock()
            .expect("diagnostics mutex poisoned")
            .push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        let unset = Diagnostic::ReleaseDateUnset {
            change_set: "1".to_string(),
        };
        assert_eq!(unset.severity(), Severity::Warning);

        let missing = Diagnostic::MissingReleaseDate {
            change_set: "1".to_string(),
        };
        assert_eq!(missing.severity(), Severity::Debug);
    }

    #[test]
    fn test_display_mentions_change_set_and_dates() {
        let diagnostic = Diagnostic::ReleasedBeforeInstallation {
            change_set: "create-users".to_string(),
            released_on: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            installation_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        let message = diagnostic.to_string();
        assert!(message.contains("create-users"));
        assert!(message.contains("2019-01-01"));
        assert!(message.contains("2020-01-01"));
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(Diagnostic::MissingReleaseDate {
            change_set: "a".to_string(),
        });
        sink.emit(Diagnostic::ReleaseDateUnset {
            change_set: "b".to_string(),
        });

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert!(matches!(
            &records[0],
            Diagnostic::MissingReleaseDate { change_set } if change_set == "a"
        ));
        assert!(matches!(
            &records[1],
            Diagnostic::ReleaseDateUnset { change_set } if change_set == "b"
        ));
    }

    #[test]
    fn test_recording_sink_take_drains() {
        let sink = RecordingSink::new();
        sink.emit(Diagnostic::MissingReleaseDate {
            change_set: "a".to_string(),
        });
        assert_eq!(sink.take().len(), 1);
        assert!(sink.records().is_empty());
    }
}
