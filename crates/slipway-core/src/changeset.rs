//! Change sets and the filtering extension point

use crate::change::Change;

/// A named, ordered unit of migration work
pub struct ChangeSet {
    id: String,
    author: Option<String>,
    changes: Vec<Box<dyn Change>>,
}

impl ChangeSet {
    /// Create an empty change set with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: None,
            changes: Vec::new(),
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Append a change, preserving declaration order
    pub fn add_change(&mut self, change: Box<dyn Change>) {
        self.changes.push(change);
    }

    /// Change set id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Author, if declared
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Changes in declaration order
    pub fn changes(&self) -> &[Box<dyn Change>] {
        &self.changes
    }

    /// Check if the change set has no changes
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Extension point for the host's changelog filtering pipeline.
///
/// Registered filters are asked once per candidate change set during a run.
pub trait ChangeSetFilter: Send + Sync {
    /// Whether the change set should be applied in this run
    fn accepts(&self, change_set: &ChangeSet) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{ChangeMetadata, PRIORITY_DEFAULT};
    use crate::database::Database;
    use crate::statement::Statement;

    struct RawChange(&'static str);

    impl Change for RawChange {
        fn metadata(&self) -> ChangeMetadata {
            ChangeMetadata {
                name: "sql",
                description: "Raw SQL",
                priority: PRIORITY_DEFAULT,
            }
        }

        fn confirmation_message(&self) -> String {
            format!("executed: {}", self.0)
        }

        fn generate_statements(&self, _database: &dyn Database) -> Vec<Statement> {
            vec![Statement::raw(self.0)]
        }
    }

    #[test]
    fn test_empty_change_set() {
        let set = ChangeSet::new("1");
        assert_eq!(set.id(), "1");
        assert!(set.author().is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_with_author() {
        let set = ChangeSet::new("1").with_author("dba");
        assert_eq!(set.author(), Some("dba"));
    }

    #[test]
    fn test_changes_keep_declaration_order() {
        let mut set = ChangeSet::new("2");
        set.add_change(Box::new(RawChange("CREATE TABLE a (id INT)")));
        set.add_change(Box::new(RawChange("CREATE TABLE b (id INT)")));

        assert!(!set.is_empty());
        let messages: Vec<String> = set
            .changes()
            .iter()
            .map(|c| c.confirmation_message())
            .collect();
        assert_eq!(
            messages,
            vec![
                "executed: CREATE TABLE a (id INT)",
                "executed: CREATE TABLE b (id INT)"
            ]
        );
    }
}
