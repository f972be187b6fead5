//! Discord interaction handlers
//!
//! Handlers for interactions other than command invocations.

/// Autocomplete handlers for material, worker, and project options
pub mod autocomplete;
