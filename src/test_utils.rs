//! Shared test utilities for `BuildBoard`.
//!
//! This module provides helpers for setting up a test store and building
//! records with sensible defaults.

use crate::{errors::Result, models::Project, store::DatabaseStore};
use chrono::{DateTime, TimeZone, Utc};

/// Creates an in-memory `SQLite` database with the key-value table and wraps
/// it in a [`DatabaseStore`].
pub async fn setup_test_store() -> Result<DatabaseStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(DatabaseStore::new(db))
}

/// A fixed "now" (2026-10-17 09:00 UTC) so deadline arithmetic is stable.
#[must_use]
#[allow(clippy::unwrap_used)] // A literal valid date
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap()
}

/// Builds a project directly, bypassing the page.
///
/// # Defaults
/// * `progress`: 0
/// * `status`: "In Progress"
#[must_use]
pub fn sample_project(id: i64, name: &str, deadline: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        deadline: deadline.to_string(),
        progress: 0,
        status: crate::models::DEFAULT_PROJECT_STATUS.to_string(),
    }
}
