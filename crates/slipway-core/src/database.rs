//! Target database abstraction

/// The database a change set is materialized for
pub trait Database: Send + Sync {
    /// Short identifier of the target, e.g. "postgresql"
    fn short_name(&self) -> &str;

    /// Prefix starting a single-line comment in this dialect
    fn line_comment_prefix(&self) -> &str {
        "--"
    }
}

/// ANSI-flavored target for hosts without dialect-specific needs
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDatabase;

impl Database for GenericDatabase {
    fn short_name(&self) -> &str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_database() {
        let database = GenericDatabase;
        assert_eq!(database.short_name(), "generic");
        assert_eq!(database.line_comment_prefix(), "--");
    }
}
