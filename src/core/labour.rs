//! Labour page - workforce roster with attendance toggling.
//!
//! Workers are created through the add form and afterwards only their
//! `is_absent` flag changes. The roster is persisted whenever it is non-empty.

use crate::{
    core::ids::IdGenerator,
    errors::{Error, Result},
    models::{Worker, WorkerStatus},
    store::{self, KeyValueStore, WORKERS},
};
use chrono::{DateTime, Local};
use tracing::info;

/// Alert shown when the add form is incomplete.
pub const MISSING_NAME_OR_ROLE: &str = "Please fill in both Name and Role.";

/// Form contents for a new worker.
#[derive(Debug, Clone)]
pub struct WorkerDraft {
    /// Full name; required
    pub name: String,
    /// Role; required
    pub role: String,
    /// Initial availability
    pub status: WorkerStatus,
    /// Optional project label; blank means none
    pub project: Option<String>,
}

/// Headcounts shown at the top of the labour page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabourSummary {
    /// Workers with status `available`
    pub available: usize,
    /// Workers with status `assigned`
    pub assigned: usize,
    /// Workers with status `on-leave`
    pub on_leave: usize,
    /// Workers currently marked absent, whatever their status
    pub absent: usize,
}

/// Owns the in-memory roster for one page visit.
#[derive(Debug)]
pub struct LabourPage<'a, S> {
    store: &'a S,
    ids: &'a IdGenerator,
    workers: Vec<Worker>,
}

impl<'a, S: KeyValueStore> LabourPage<'a, S> {
    /// Loads the stored roster; starts empty (without writing) when nothing
    /// usable is stored.
    pub async fn mount(store: &'a S, ids: &'a IdGenerator) -> Result<Self> {
        let workers = store::load(store, WORKERS).await?.unwrap_or_default();
        if let Some(max_id) = workers.iter().map(|w| w.id).max() {
            ids.observe(max_id);
        }
        Ok(Self {
            store,
            ids,
            workers,
        })
    }

    /// Current roster in creation order.
    #[must_use]
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Adds a worker with a fresh id, present, stamped with the current month.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] with [`MISSING_NAME_OR_ROLE`] when the
    /// name or role is blank; nothing is stored.
    pub async fn add(&mut self, draft: WorkerDraft) -> Result<Worker> {
        let name = draft.name.trim();
        let role = draft.role.trim();
        if name.is_empty() || role.is_empty() {
            return Err(Error::validation(MISSING_NAME_OR_ROLE));
        }

        let id = self.ids.next_id();
        let worker = Worker {
            id,
            name: name.to_string(),
            role: role.to_string(),
            status: draft.status,
            project: draft
                .project
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            is_absent: false,
            month: month_label(id),
        };

        self.workers.push(worker.clone());
        self.persist().await?;

        info!("Added worker '{}' ({}) with id {}", worker.name, worker.role, worker.id);
        Ok(worker)
    }

    /// Flips `is_absent` for the worker with `id`.
    pub async fn toggle_absent(&mut self, id: i64) -> Result<Worker> {
        let worker = self
            .workers
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(Error::WorkerNotFound { id })?;
        worker.is_absent = !worker.is_absent;
        let updated = worker.clone();

        self.persist().await?;
        info!(
            "Worker '{}' marked {}",
            updated.name,
            if updated.is_absent { "absent" } else { "present" }
        );
        Ok(updated)
    }

    /// Headcounts for the page header.
    #[must_use]
    pub fn summary(&self) -> LabourSummary {
        self.workers
            .iter()
            .fold(LabourSummary::default(), |mut summary, worker| {
                match worker.status {
                    WorkerStatus::Available => summary.available += 1,
                    WorkerStatus::Assigned => summary.assigned += 1,
                    WorkerStatus::OnLeave => summary.on_leave += 1,
                }
                if worker.is_absent {
                    summary.absent += 1;
                }
                summary
            })
    }

    async fn persist(&self) -> Result<()> {
        if self.workers.is_empty() {
            return Ok(());
        }
        store::save(self.store, WORKERS, &self.workers).await
    }
}

/// Short local month name for the moment encoded in `id`.
fn month_label(id: i64) -> String {
    DateTime::from_timestamp_millis(id)
        .map(|dt| dt.with_timezone(&Local).format("%b").to_string())
        .unwrap_or_default()
}
