//! Slipway Release - release-date gating for change sets
//!
//! This crate provides the release-date annotation change and the change
//! set filter that compares annotations against a fixed installation date,
//! so installers can skip change sets that were not yet released when the
//! target instance was installed.

pub mod change;
pub mod date;
pub mod error;
pub mod filter;

pub use change::{ReleaseDateChange, ReleaseDateProperties};
pub use date::{DEFAULT_FORMAT_PATTERN, DEFAULT_PARSE_PATTERN};
pub use error::{DateError, Result};
pub use filter::ReleaseDateFilter;
