//! The release-date annotation change
//!
//! Attaches a release date to a change set. The date is parsed leniently
//! from a configurable pattern, and rendered through a comment template
//! into the generated migration output.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use slipway_core::change::{Change, ChangeMetadata, ReleaseDated, PRIORITY_DEFAULT};
use slipway_core::database::Database;
use slipway_core::diagnostics::{Diagnostic, DiagnosticsSink, TracingSink};
use slipway_core::statement::Statement;

use crate::date::{self, DEFAULT_FORMAT_PATTERN, DEFAULT_PARSE_PATTERN};
use crate::error::DateError;

/// Default comment text, with the date placeholder at its end.
const DEFAULT_COMMENT_TEXT: &str = "released on: {}";

/// Placeholder token replaced by the formatted date.
const DATE_PLACEHOLDER: &str = "{}";

/// A change entry that gives its change set a release date.
///
/// The date stays unset until [`set_release_date`](Self::set_release_date)
/// succeeds; a failed parse leaves the previously stored date untouched.
pub struct ReleaseDateChange {
    released_on: Option<NaiveDate>,
    parse_pattern: String,
    format_pattern: String,
    comment_text: String,
    sink: Arc<dyn DiagnosticsSink>,
}

impl ReleaseDateChange {
    /// Create a change with default patterns and comment text
    pub fn new() -> Self {
        Self {
            released_on: None,
            parse_pattern: DEFAULT_PARSE_PATTERN.to_string(),
            format_pattern: DEFAULT_FORMAT_PATTERN.to_string(),
            comment_text: DEFAULT_COMMENT_TEXT.to_string(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Report parse and formatting problems through a custom sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Build a change from host-supplied changelog properties.
    ///
    /// Patterns and the template are applied before the date string is
    /// parsed, so a configured parse pattern governs the configured date.
    /// A date that fails to parse is reported and left unset, never fatal.
    pub fn from_properties(properties: ReleaseDateProperties) -> Self {
        let mut change = Self::new();
        if let Some(pattern) = properties.parse_pattern {
            change.set_parse_pattern(pattern);
        }
        if let Some(pattern) = properties.format_pattern {
            change.set_format_pattern(pattern);
        }
        if let Some(text) = properties.comment_text {
            change.set_comment_text(text);
        }
        if let Some(input) = properties.release_date {
            let _ = change.set_release_date(&input);
        }
        change
    }

    /// Parse `input` and store the release date.
    ///
    /// The configured parse pattern is applied leniently; a malformed
    /// pattern falls back to the default pattern and the parse is retried.
    /// On failure the stored date is left untouched and the error is both
    /// returned and reported through the diagnostics sink, so the host
    /// decides whether a bad date is fatal.
    pub fn set_release_date(&mut self, input: &str) -> Result<NaiveDate, DateError> {
        let pattern = if date::pattern_is_valid(&self.parse_pattern) {
            self.parse_pattern.as_str()
        } else {
            self.sink.emit(Diagnostic::ParsePatternInvalid {
                pattern: self.parse_pattern.clone(),
            });
            DEFAULT_PARSE_PATTERN
        };

        match date::parse_date(input, pattern) {
            Ok(parsed) => {
                self.released_on = Some(parsed);
                Ok(parsed)
            }
            Err(err) => {
                self.sink.emit(Diagnostic::ReleaseDateParseFailed {
                    input: input.to_string(),
                    pattern: pattern.to_string(),
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// The parsed release date, if any
    pub fn released_on(&self) -> Option<NaiveDate> {
        self.released_on
    }

    /// Replace the parse pattern. Validated lazily, at parse time.
    pub fn set_parse_pattern(&mut self, pattern: impl Into<String>) {
        self.parse_pattern = pattern.into();
    }

    /// Pattern used to parse incoming date strings
    pub fn parse_pattern(&self) -> &str {
        &self.parse_pattern
    }

    /// Replace the format pattern. Validated lazily, at render time.
    pub fn set_format_pattern(&mut self, pattern: impl Into<String>) {
        self.format_pattern = pattern.into();
    }

    /// Pattern used to render the date into the comment
    pub fn format_pattern(&self) -> &str {
        &self.format_pattern
    }

    /// Replace the comment template
    pub fn set_comment_text(&mut self, text: impl Into<String>) {
        self.comment_text = text.into();
    }

    /// Comment template with `{}` placeholders for the formatted date
    pub fn comment_text(&self) -> &str {
        &self.comment_text
    }

    /// Render the comment with the formatted release date substituted for
    /// every `{}` token, or `None` while no date is set.
    ///
    /// A format pattern that is malformed or inapplicable to a calendar
    /// date is reported and silently replaced by the default pattern, so
    /// comment cosmetics can never break a migration run.
    pub fn render_comment(&self) -> Option<String> {
        let released_on = self.released_on?;
        let formatted = match date::format_date(released_on, &self.format_pattern) {
            Ok(formatted) => formatted,
            Err(_) => {
                self.sink.emit(Diagnostic::FormatPatternInvalid {
                    pattern: self.format_pattern.clone(),
                });
                date::format_date(released_on, DEFAULT_FORMAT_PATTERN).unwrap_or_default()
            }
        };
        Some(self.comment_text.replace(DATE_PLACEHOLDER, &formatted))
    }
}

impl Default for ReleaseDateChange {
    fn default() -> Self {
        Self::new()
    }
}

impl Change for ReleaseDateChange {
    fn metadata(&self) -> ChangeMetadata {
        ChangeMetadata {
            name: "releaseDate",
            description: "Gives the change set a release date for install-time gating",
            priority: PRIORITY_DEFAULT,
        }
    }

    fn confirmation_message(&self) -> String {
        self.render_comment()
            .unwrap_or_else(|| self.metadata().description.to_string())
    }

    fn generate_statements(&self, _database: &dyn Database) -> Vec<Statement> {
        match self.render_comment() {
            Some(comment) => vec![Statement::comment(comment)],
            None => Vec::new(),
        }
    }

    fn as_release_dated(&self) -> Option<&dyn ReleaseDated> {
        Some(self)
    }
}

impl ReleaseDated for ReleaseDateChange {
    fn released_on(&self) -> Option<NaiveDate> {
        self.released_on
    }
}

/// Attribute bag a host deserializes from its changelog entry to configure
/// a release-date change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseDateProperties {
    /// The release date string, parsed with the configured parse pattern
    pub release_date: Option<String>,
    /// Pattern for parsing `release_date`
    pub parse_pattern: Option<String>,
    /// Pattern for rendering the date into the comment
    pub format_pattern: Option<String>,
    /// Comment template with `{}` placeholders for the formatted date
    pub comment_text: Option<String>,
}
