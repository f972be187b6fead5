//! Notifications page - alerts derived from the projects and materials lists.
//!
//! Notifications are never stored. Each time the page mounts it reads both
//! collections and applies three rules:
//!
//! - a project created less than 24 hours ago is announced as new
//! - a project whose deadline is between 0 and 3 days away gets a warning
//! - every out-of-stock material gets a warning
//!
//! The list is a snapshot. Callers re-derive it with
//! [`NotificationsPage::apply_snapshot`] each time the page is shown, which
//! keeps read state, or with [`NotificationsPage::refresh`], which resets it.

use crate::{
    errors::Result,
    models::{Material, MaterialStatus, Project},
    store::{self, KeyValueStore, MATERIALS, PROJECTS},
};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Offset added to a project id for its "new project" notification id.
pub const NEW_PROJECT_BAND: i64 = 1000;
/// Offset added to a project id for its deadline notification id.
pub const DEADLINE_BAND: i64 = 2000;
/// Offset added to a material index for its out-of-stock notification id.
pub const OUT_OF_STOCK_BAND: i64 = 3000;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const DEADLINE_WINDOW_DAYS: f64 = 3.0;

/// Severity shown next to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Something needs attention
    Warning,
    /// Something good happened
    Success,
    /// Neutral information
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Success => f.write_str("success"),
            Self::Info => f.write_str("info"),
        }
    }
}

/// Which rule produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationSource {
    /// Project created in the last 24 hours; source id is the project id
    NewProject,
    /// Project deadline within three days; source id is the project id
    ProjectDeadline,
    /// Material out of stock; source id is the material's position
    OutOfStock,
}

/// Identity of a notification: the rule plus the record it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationKey {
    /// Rule that fired
    pub source: NotificationSource,
    /// Project id or material position
    pub source_id: i64,
}

impl NotificationKey {
    /// Numeric id in the legacy band scheme (project id + 1000 / + 2000,
    /// material index + 3000). Bands can overlap; use the key for identity.
    #[must_use]
    pub const fn legacy_id(&self) -> i64 {
        let band = match self.source {
            NotificationSource::NewProject => NEW_PROJECT_BAND,
            NotificationSource::ProjectDeadline => DEADLINE_BAND,
            NotificationSource::OutOfStock => OUT_OF_STOCK_BAND,
        };
        self.source_id.saturating_add(band)
    }
}

/// A derived alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identity used for read tracking
    pub key: NotificationKey,
    /// Legacy numeric id, see [`NotificationKey::legacy_id`]
    pub id: i64,
    /// Severity
    pub kind: NotificationKind,
    /// Text shown to the user
    pub message: String,
    /// Relative time label ("Just now", "Today")
    pub time: String,
}

impl Notification {
    fn new(
        source: NotificationSource,
        source_id: i64,
        kind: NotificationKind,
        message: String,
        time: &str,
    ) -> Self {
        let key = NotificationKey { source, source_id };
        Self {
            key,
            id: key.legacy_id(),
            kind,
            message,
            time: time.to_string(),
        }
    }
}

/// Applies the notification rules to the given collections.
///
/// Output order: for each project its "new" notification then its deadline
/// notification, projects in list order, then material warnings in list
/// order.
#[must_use]
pub fn derive_notifications(
    projects: &[Project],
    materials: &[Material],
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let mut notifications = Vec::new();

    for project in projects {
        let is_new = project
            .created_at()
            .is_some_and(|created| now.signed_duration_since(created) < TimeDelta::hours(24));
        if is_new {
            notifications.push(Notification::new(
                NotificationSource::NewProject,
                project.id,
                NotificationKind::Success,
                format!("New project added: {}", project.name),
                "Just now",
            ));
        }

        let days_left = days_until_deadline(project, now)
            .filter(|days| (0.0..=DEADLINE_WINDOW_DAYS).contains(days));
        if let Some(days_left) = days_left {
            #[allow(clippy::cast_possible_truncation)] // Bounded to 0..=3 above
            let whole_days = days_left.ceil() as i64;
            notifications.push(Notification::new(
                NotificationSource::ProjectDeadline,
                project.id,
                NotificationKind::Warning,
                format!(
                    "Deadline approaching for {} ({whole_days} days left)",
                    project.name
                ),
                "Today",
            ));
        }
    }

    for (index, material) in materials.iter().enumerate() {
        if material.status != MaterialStatus::OutOfStock {
            continue;
        }
        let Ok(position) = i64::try_from(index) else {
            continue;
        };
        notifications.push(Notification::new(
            NotificationSource::OutOfStock,
            position,
            NotificationKind::Warning,
            format!("Out of stock: {}", material.name),
            "Today",
        ));
    }

    notifications
}

/// Fractional days from `now` to the project's deadline.
fn days_until_deadline(project: &Project, now: DateTime<Utc>) -> Option<f64> {
    let deadline = project.deadline_at()?;
    #[allow(clippy::cast_precision_loss)] // Millisecond spans of a few years are exact in f64
    let millis = deadline.signed_duration_since(now).num_milliseconds() as f64;
    Some(millis / MILLIS_PER_DAY)
}

/// Reads both collections and derives the current notifications. A missing
/// or malformed collection contributes nothing; materials are not seeded here.
pub async fn load_notifications<S: KeyValueStore>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<Vec<Notification>> {
    let projects = store::load(store, PROJECTS).await?.unwrap_or_default();
    let materials = store::load(store, MATERIALS).await?.unwrap_or_default();

    let notifications = derive_notifications(&projects, &materials, now);
    debug!(
        "Derived {} notifications from {} projects and {} materials",
        notifications.len(),
        projects.len(),
        materials.len()
    );
    Ok(notifications)
}

/// The notifications list plus its session-local read state.
#[derive(Debug, Clone, Default)]
pub struct NotificationsPage {
    notifications: Vec<Notification>,
    read: HashSet<NotificationKey>,
    show_all: bool,
}

impl NotificationsPage {
    /// Derives a fresh snapshot with nothing marked read.
    pub async fn mount<S: KeyValueStore>(store: &S, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self::from_notifications(load_notifications(store, now).await?))
    }

    /// Wraps an already derived list.
    #[must_use]
    pub fn from_notifications(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            read: HashSet::new(),
            show_all: false,
        }
    }

    /// Re-derives the snapshot. Read state and the show-all toggle reset,
    /// as they would when the page is opened again.
    pub async fn refresh<S: KeyValueStore>(&mut self, store: &S, now: DateTime<Utc>) -> Result<()> {
        *self = Self::mount(store, now).await?;
        Ok(())
    }

    /// Swaps in a freshly derived list while keeping the view's state. Read
    /// keys survive for notifications that are still present; keys whose
    /// notification has gone are dropped. Show-all is untouched.
    pub fn apply_snapshot(&mut self, notifications: Vec<Notification>) {
        self.read
            .retain(|key| notifications.iter().any(|n| n.key == *key));
        self.notifications = notifications;
    }

    /// Every notification in the snapshot, read or not.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Notifications to display: all of them when show-all is on, otherwise
    /// only the unread ones.
    #[must_use]
    pub fn visible(&self) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| self.show_all || !self.read.contains(&n.key))
            .collect()
    }

    /// Notifications not yet marked read.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| !self.read.contains(&n.key))
            .count()
    }

    /// Marks every notification in the snapshot as read.
    pub fn mark_all_as_read(&mut self) {
        self.read = self.notifications.iter().map(|n| n.key).collect();
    }

    /// Flips show-all and returns the new setting.
    pub fn toggle_show_all(&mut self) -> bool {
        self.show_all = !self.show_all;
        self.show_all
    }

    /// Whether read notifications are currently shown.
    #[must_use]
    pub const fn show_all(&self) -> bool {
        self.show_all
    }
}
