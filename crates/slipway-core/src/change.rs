//! The polymorphic change model
//!
//! A change is a single declarative migration action inside a change set.
//! Extensions implement [`Change`] and advertise optional capabilities
//! through query methods instead of downcasting to concrete types.

use chrono::NaiveDate;

use crate::database::Database;
use crate::statement::Statement;

/// Default registration priority for a change implementation.
pub const PRIORITY_DEFAULT: u32 = 1;

/// Registration metadata describing a change implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeMetadata {
    /// Tag name the change is registered under in the changelog format
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Registration priority when several implementations share a name
    pub priority: u32,
}

/// Trait for change entries inside a change set
pub trait Change: Send + Sync {
    /// Registration metadata for this change kind
    fn metadata(&self) -> ChangeMetadata;

    /// Message confirming what applying this change did
    fn confirmation_message(&self) -> String;

    /// Materialize this change into statements for a target database
    fn generate_statements(&self, database: &dyn Database) -> Vec<Statement>;

    /// Release-date capability query.
    ///
    /// Changes that attach a release date to their change set return
    /// `Some`; everything else keeps the default.
    fn as_release_dated(&self) -> Option<&dyn ReleaseDated> {
        None
    }
}

/// Capability of changes that attach a release date to their change set.
pub trait ReleaseDated {
    /// The release date, or `None` while no date was successfully parsed.
    fn released_on(&self) -> Option<NaiveDate>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainChange;

    impl Change for PlainChange {
        fn metadata(&self) -> ChangeMetadata {
            ChangeMetadata {
                name: "plain",
                description: "A change without capabilities",
                priority: PRIORITY_DEFAULT,
            }
        }

        fn confirmation_message(&self) -> String {
            "plain change applied".to_string()
        }

        fn generate_statements(&self, _database: &dyn Database) -> Vec<Statement> {
            Vec::new()
        }
    }

    #[test]
    fn test_capability_defaults_to_none() {
        let change = PlainChange;
        assert!(change.as_release_dated().is_none());
    }

    #[test]
    fn test_metadata() {
        let metadata = PlainChange.metadata();
        assert_eq!(metadata.name, "plain");
        assert_eq!(metadata.priority, PRIORITY_DEFAULT);
    }
}
