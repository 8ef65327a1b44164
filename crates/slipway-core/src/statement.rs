//! Statement output model

use serde::{Deserialize, Serialize};

use crate::database::Database;

/// A single statement produced when materializing a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Statement {
    /// A comment embedded in the generated migration output
    Comment { text: String },
    /// Raw SQL passed through to the target database
    Raw { sql: String },
}

impl Statement {
    /// Create a comment statement
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    /// Create a raw SQL statement
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw { sql: sql.into() }
    }

    /// Render the statement for inclusion in a migration script
    pub fn render(&self, database: &dyn Database) -> String {
        match self {
            Self::Comment { text } => {
                format!("{} {}", database.line_comment_prefix(), text)
            }
            Self::Raw { sql } => sql.clone(),
        }
    }
}
