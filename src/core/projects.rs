//! Projects page - project list with in-place edits and confirmed deletion.
//!
//! Every mutating operation writes the whole collection straight away, even
//! when the last project has just been deleted and the list is empty.

use crate::{
    core::ids::IdGenerator,
    errors::{Error, Result},
    models::{DEFAULT_PROJECT_STATUS, NO_DEADLINE, Project},
    store::{self, KeyValueStore, PROJECTS},
};
use tracing::info;

/// Form contents for a new project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    /// Project name; required
    pub name: String,
    /// ISO date; blank or missing is stored as [`NO_DEADLINE`]
    pub deadline: Option<String>,
    /// Starting progress
    pub progress: i32,
    /// Status label; defaults to [`DEFAULT_PROJECT_STATUS`]
    pub status: Option<String>,
}

/// Fields to overwrite on an existing project. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    /// New name
    pub name: Option<String>,
    /// New deadline
    pub deadline: Option<String>,
    /// New progress; not range-checked
    pub progress: Option<i32>,
}

/// Outcome of the confirmation prompt shown before a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user agreed to delete
    Confirmed,
    /// The user cancelled or the prompt expired
    Declined,
}

/// Figures shown at the top of the projects page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectSummary {
    /// Number of projects
    pub total: usize,
    /// Projects at 100% or above
    pub completed: usize,
    /// Mean progress, 0 when there are no projects
    pub average_progress: f64,
}

/// Owns the in-memory project list for one page visit.
#[derive(Debug)]
pub struct ProjectsPage<'a, S> {
    store: &'a S,
    ids: &'a IdGenerator,
    projects: Vec<Project>,
}

impl<'a, S: KeyValueStore> ProjectsPage<'a, S> {
    /// Loads the stored projects; starts empty (without writing) when nothing
    /// usable is stored.
    pub async fn mount(store: &'a S, ids: &'a IdGenerator) -> Result<Self> {
        let projects = store::load(store, PROJECTS).await?.unwrap_or_default();
        if let Some(max_id) = projects.iter().map(|p| p.id).max() {
            ids.observe(max_id);
        }
        Ok(Self {
            store,
            ids,
            projects,
        })
    }

    /// Current projects in creation order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a project by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Creates a project with a fresh id and saves the list.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when the name is blank; nothing is stored.
    pub async fn add(&mut self, draft: ProjectDraft) -> Result<Project> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Project name is required."));
        }

        let deadline = draft
            .deadline
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DEADLINE.to_string());

        let project = Project {
            id: self.ids.next_id(),
            name: name.to_string(),
            deadline,
            progress: draft.progress,
            status: draft
                .status
                .unwrap_or_else(|| DEFAULT_PROJECT_STATUS.to_string()),
        };

        self.projects.push(project.clone());
        self.persist().await?;

        info!("Added project '{}' with id {}", project.name, project.id);
        Ok(project)
    }

    /// Overwrites the fields set in `update` on the project with `id`.
    pub async fn update(&mut self, id: i64, update: ProjectUpdate) -> Result<Project> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::ProjectNotFound { id })?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(deadline) = update.deadline {
            project.deadline = deadline;
        }
        if let Some(progress) = update.progress {
            project.progress = progress;
        }
        let updated = project.clone();

        self.persist().await?;
        info!("Updated project {id}");
        Ok(updated)
    }

    /// Removes the project with `id` once the user has confirmed.
    ///
    /// # Returns
    /// * `Ok(Some(project))` - the removed project
    /// * `Ok(None)` - the user declined; nothing changed
    pub async fn delete(&mut self, id: i64, confirmation: Confirmation) -> Result<Option<Project>> {
        if confirmation == Confirmation::Declined {
            info!("Deletion of project {id} declined");
            return Ok(None);
        }

        let position = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::ProjectNotFound { id })?;
        let removed = self.projects.remove(position);

        self.persist().await?;
        info!("Deleted project '{}' ({id})", removed.name);
        Ok(Some(removed))
    }

    /// Totals for the page header.
    #[must_use]
    pub fn summary(&self) -> ProjectSummary {
        let total = self.projects.len();
        let completed = self.projects.iter().filter(|p| p.progress >= 100).count();
        let progress_sum: f64 = self.projects.iter().map(|p| f64::from(p.progress)).sum();
        #[allow(clippy::cast_precision_loss)] // Project counts are small
        let average_progress = if total == 0 {
            0.0
        } else {
            progress_sum / total as f64
        };

        ProjectSummary {
            total,
            completed,
            average_progress,
        }
    }

    async fn persist(&self) -> Result<()> {
        store::save(self.store, PROJECTS, &self.projects).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_utils::setup_test_store;

    fn draft(name: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.to_string(),
            ..ProjectDraft::default()
        }
    }

    #[tokio::test]
    async fn test_mount_empty_writes_nothing() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let page = ProjectsPage::mount(&store, &ids).await?;

        assert!(page.projects().is_empty());
        assert!(store.get("projects").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_applies_defaults() -> Result<()> {
        let store = setup_test_store().await?;
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;

        let project = page.add(draft(" Riverside Villas ")).await?;

        assert_eq!(project.name, "Riverside Villas");
        assert_eq!(project.deadline, NO_DEADLINE);
        assert_eq!(project.progress, 0);
        assert_eq!(project.status, DEFAULT_PROJECT_STATUS);
        assert_eq!(
            store::load(&store, PROJECTS).await?,
            Some(vec![project])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_deadline_means_no_deadline() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;

        let project = page
            .add(ProjectDraft {
                name: "Depot".to_string(),
                deadline: Some("  ".to_string()),
                progress: 15,
                status: None,
            })
            .await?;

        assert_eq!(project.deadline, NO_DEADLINE);
        assert_eq!(project.progress, 15);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_blank_name_is_rejected() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;

        assert!(matches!(
            page.add(draft("   ")).await,
            Err(Error::Validation { .. })
        ));
        assert!(store.get("projects").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_increasing() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;

        let a = page.add(draft("A")).await?;
        let b = page.add(draft("B")).await?;
        let c = page.add(draft("C")).await?;

        assert!(a.id < b.id && b.id < c.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_changes_only_targeted_fields() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;
        let original = page
            .add(ProjectDraft {
                name: "Bridge".to_string(),
                deadline: Some("2026-12-31".to_string()),
                progress: 10,
                status: None,
            })
            .await?;
        let other = page.add(draft("Canal")).await?;

        let updated = page
            .update(
                original.id,
                ProjectUpdate {
                    progress: Some(55),
                    ..ProjectUpdate::default()
                },
            )
            .await?;

        assert_eq!(
            updated,
            Project {
                progress: 55,
                ..original.clone()
            }
        );
        let stored = store::load(&store, PROJECTS).await?.unwrap();
        assert_eq!(stored, vec![updated, other]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_does_not_clamp_progress() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;
        let project = page.add(draft("Bridge")).await?;

        let updated = page
            .update(
                project.id,
                ProjectUpdate {
                    progress: Some(150),
                    ..ProjectUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.progress, 150);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_project() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;

        let result = page.update(7, ProjectUpdate::default()).await;
        assert!(matches!(result, Err(Error::ProjectNotFound { id: 7 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;
        let a = page.add(draft("A")).await?;
        let b = page.add(draft("B")).await?;
        let c = page.add(draft("C")).await?;

        let removed = page.delete(b.id, Confirmation::Confirmed).await?;

        assert_eq!(removed, Some(b));
        assert_eq!(store::load(&store, PROJECTS).await?, Some(vec![a, c]));
        Ok(())
    }

    #[tokio::test]
    async fn test_declined_delete_is_a_no_op() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;
        let a = page.add(draft("A")).await?;
        let before = store.get("projects").await?;

        let removed = page.delete(a.id, Confirmation::Declined).await?;

        assert!(removed.is_none());
        assert_eq!(page.projects(), [a].as_slice());
        assert_eq!(store.get("projects").await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_last_project_stores_empty_list() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;
        let a = page.add(draft("A")).await?;

        page.delete(a.id, Confirmation::Confirmed).await?;

        assert_eq!(store::load(&store, PROJECTS).await?, Some(Vec::new()));
        Ok(())
    }

    #[tokio::test]
    async fn test_summary() -> Result<()> {
        let store = MemoryStore::new();
        let ids = IdGenerator::new();
        let mut page = ProjectsPage::mount(&store, &ids).await?;
        assert_eq!(page.summary().average_progress, 0.0);

        for (name, progress) in [("A", 100), ("B", 50), ("C", 0)] {
            page.add(ProjectDraft {
                name: name.to_string(),
                progress,
                ..ProjectDraft::default()
            })
            .await?;
        }

        let summary = page.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.average_progress, 50.0);
        Ok(())
    }
}
