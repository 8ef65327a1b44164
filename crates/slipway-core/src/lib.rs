//! Slipway Core - changelog model and extension seams for release gating
//!
//! This crate provides the host-facing types shared by Slipway extensions:
//! the polymorphic change model, change sets, the statement output model,
//! the target database abstraction, and the diagnostics sink.

pub mod change;
pub mod changeset;
pub mod database;
pub mod diagnostics;
pub mod statement;

pub use change::{Change, ChangeMetadata, ReleaseDated, PRIORITY_DEFAULT};
pub use changeset::{ChangeSet, ChangeSetFilter};
pub use database::{Database, GenericDatabase};
pub use diagnostics::{Diagnostic, DiagnosticsSink, RecordingSink, Severity, TracingSink};
pub use statement::Statement;
