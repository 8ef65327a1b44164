//! Change set filtering by release date

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::instrument;

use slipway_core::changeset::{ChangeSet, ChangeSetFilter};
use slipway_core::diagnostics::{Diagnostic, DiagnosticsSink, TracingSink};

/// Filter accepting only change sets released after the installation date.
///
/// Registered with the host's filtering pipeline, typically by an installer
/// that wants to skip change sets already contained in the installed
/// version. Each decision reads only construction-bound state and the
/// change set under inspection.
pub struct ReleaseDateFilter {
    installation_date: NaiveDate,
    accept_if_not_exists: bool,
    sink: Arc<dyn DiagnosticsSink>,
}

impl ReleaseDateFilter {
    /// Create a filter bound to the given installation date.
    ///
    /// Change sets without a release date are rejected unless
    /// [`with_accept_if_not_exists`](Self::with_accept_if_not_exists)
    /// says otherwise.
    pub fn new(installation_date: NaiveDate) -> Self {
        Self {
            installation_date,
            accept_if_not_exists: false,
            sink: Arc::new(TracingSink),
        }
    }

    /// Accept change sets that carry no release date at all
    pub fn with_accept_if_not_exists(mut self, accept: bool) -> Self {
        self.accept_if_not_exists = accept;
        self
    }

    /// Report decisions through a custom diagnostics sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The date acceptance decisions are compared against
    pub fn installation_date(&self) -> NaiveDate {
        self.installation_date
    }

    /// Current missing-annotation policy
    pub fn accept_if_not_exists(&self) -> bool {
        self.accept_if_not_exists
    }

    /// Change the missing-annotation policy
    pub fn set_accept_if_not_exists(&mut self, accept: bool) {
        self.accept_if_not_exists = accept;
    }
}

impl ChangeSetFilter for ReleaseDateFilter {
    #[instrument(skip(self, change_set), fields(change_set = %change_set.id()))]
    fn accepts(&self, change_set: &ChangeSet) -> bool {
        // only the first release date entry per change set is considered
        let annotation = change_set
            .changes()
            .iter()
            .find_map(|change| change.as_release_dated());

        let annotation = match annotation {
            Some(annotation) => annotation,
            None => {
                if !self.accept_if_not_exists {
                    self.sink.emit(Diagnostic::MissingReleaseDate {
                        change_set: change_set.id().to_string(),
                    });
                }
                return self.accept_if_not_exists;
            }
        };

        match annotation.released_on() {
            Some(released_on) if released_on > self.installation_date => true,
            Some(released_on) => {
                self.sink.emit(Diagnostic::ReleasedBeforeInstallation {
                    change_set: change_set.id().to_string(),
                    released_on,
                    installation_date: self.installation_date,
                });
                false
            }
            None => {
                self.sink.emit(Diagnostic::ReleaseDateUnset {
                    change_set: change_set.id().to_string(),
                });
                false
            }
        }
    }
}
