//! Core business logic for the job tracker.
//!
//! Everything here is independent of how requests arrive. Functions take the
//! store handle by reference and return [`crate::errors::Result`], so the CLI
//! (or any other front end) only translates arguments and prints results.

/// Filtered and sorted listings
pub mod query;
/// Totals, per-status counts and recent activity
pub mod stats;
/// Create, read, update, delete and list application records
pub mod store;
