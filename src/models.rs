//! Persisted domain records.
//!
//! These structs are stored as JSON arrays under the `materials`, `workers`,
//! and `projects` keys, so their serde field names are part of the storage
//! format and must not change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Deadline value stored when a project is created without one.
pub const NO_DEADLINE: &str = "No deadline";

/// Status given to every newly created project.
pub const DEFAULT_PROJECT_STATUS: &str = "In Progress";

/// Stock state of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialStatus {
    /// Available on site
    #[serde(rename = "In Stock")]
    InStock,
    /// Needs reordering
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl MaterialStatus {
    /// Returns the opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::InStock => Self::OutOfStock,
            Self::OutOfStock => Self::InStock,
        }
    }
}

impl fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InStock => f.write_str("In Stock"),
            Self::OutOfStock => f.write_str("Out of Stock"),
        }
    }
}

/// A material tracked in the inventory. Materials have no id and are
/// addressed by their position in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name (e.g. "Cement")
    pub name: String,
    /// Current stock state
    pub status: MaterialStatus,
    /// Units on hand; non-negative by convention only
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub quantity: f64,
}

impl Material {
    /// Creates a material record.
    pub fn new(name: impl Into<String>, status: MaterialStatus, quantity: f64) -> Self {
        Self {
            name: name.into(),
            status,
            quantity,
        }
    }
}

/// Quantity edits were historically stored as the raw text of the input box,
/// so a numeric string is accepted and a blank one reads as zero.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) if text.trim().is_empty() => Ok(0.0),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Availability of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkerStatus {
    /// Free to be assigned
    Available,
    /// Working on a project
    Assigned,
    /// Away on leave
    OnLeave,
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("Available"),
            Self::Assigned => f.write_str("Assigned"),
            Self::OnLeave => f.write_str("On-leave"),
        }
    }
}

/// A member of the workforce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Creation timestamp in milliseconds; unique and immutable
    pub id: i64,
    /// Full name
    pub name: String,
    /// Trade or role on site (e.g. "Electrician")
    pub role: String,
    /// Availability
    pub status: WorkerStatus,
    /// Free-text project label, not a reference to a stored project
    pub project: Option<String>,
    /// Marked absent for the day
    pub is_absent: bool,
    /// Abbreviated month name at creation (e.g. "Oct")
    pub month: String,
}

/// A construction project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Creation timestamp in milliseconds; unique and immutable
    pub id: i64,
    /// Project name
    pub name: String,
    /// ISO date (`YYYY-MM-DD`) or [`NO_DEADLINE`]
    pub deadline: String,
    /// Completion percentage, 0 to 100
    pub progress: i32,
    /// Free-form status label
    pub status: String,
}

impl Project {
    /// Moment the project was created, recovered from its id.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.id)
    }

    /// Parses the deadline. A bare date means midnight UTC of that day;
    /// anything unparseable (including [`NO_DEADLINE`]) yields `None`.
    #[must_use]
    pub fn deadline_at(&self) -> Option<DateTime<Utc>> {
        parse_deadline(&self.deadline)
    }
}

/// Parses a deadline string the way the dashboard stores it.
#[must_use]
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
