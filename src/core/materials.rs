//! Materials page - inventory list with stock toggles and quantity edits.
//!
//! Materials carry no id; every operation addresses them by position. The
//! collection is seeded on first mount and is never shrunk.

use crate::{
    errors::{Error, Result},
    models::{Material, MaterialStatus},
    store::{self, KeyValueStore, MATERIALS},
};
use tracing::{info, warn};

/// Form contents for a new material.
#[derive(Debug, Clone)]
pub struct MaterialDraft {
    /// Material name; required
    pub name: String,
    /// Initial stock state
    pub status: MaterialStatus,
    /// Initial quantity
    pub quantity: f64,
}

/// Counts shown at the top of the materials page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSummary {
    /// Materials marked in stock
    pub in_stock: usize,
    /// Materials marked out of stock
    pub out_of_stock: usize,
    /// Sum of all quantities
    pub total_quantity: f64,
}

/// Owns the in-memory materials collection for one page visit.
#[derive(Debug)]
pub struct MaterialsPage<'a, S> {
    store: &'a S,
    materials: Vec<Material>,
}

impl<'a, S: KeyValueStore> MaterialsPage<'a, S> {
    /// Loads the stored materials, or seeds and immediately persists `seed`
    /// when nothing usable is stored. A stored empty list is kept as-is.
    pub async fn mount(store: &'a S, seed: &[Material]) -> Result<Self> {
        if let Some(materials) = store::load(store, MATERIALS).await? {
            return Ok(Self { store, materials });
        }

        info!("Seeding materials with {} defaults", seed.len());
        let materials = seed.to_vec();
        store::save(store, MATERIALS, &materials).await?;
        Ok(Self { store, materials })
    }

    /// Current materials in display order.
    #[must_use]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Appends a material built from `draft`.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when the name is blank; nothing is stored.
    pub async fn add(&mut self, draft: MaterialDraft) -> Result<Material> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Material name is required."));
        }
        if draft.quantity < 0.0 {
            warn!("Adding material '{name}' with negative quantity {}", draft.quantity);
        }

        let material = Material::new(name, draft.status, draft.quantity);
        self.materials.push(material.clone());
        self.persist().await?;

        info!("Added material '{}'", material.name);
        Ok(material)
    }

    /// Flips the material at `index` between in stock and out of stock.
    pub async fn toggle_status(&mut self, index: usize) -> Result<Material> {
        let material = self
            .materials
            .get_mut(index)
            .ok_or(Error::MaterialNotFound { index })?;
        material.status = material.status.toggled();
        let updated = material.clone();

        self.persist().await?;
        info!("Material '{}' is now {}", updated.name, updated.status);
        Ok(updated)
    }

    /// Replaces the quantity of the material at `index`. Bounds are not
    /// checked here.
    pub async fn set_quantity(&mut self, index: usize, quantity: f64) -> Result<Material> {
        let material = self
            .materials
            .get_mut(index)
            .ok_or(Error::MaterialNotFound { index })?;
        material.quantity = quantity;
        let updated = material.clone();

        self.persist().await?;
        info!("Material '{}' quantity set to {quantity}", updated.name);
        Ok(updated)
    }

    /// Stock counts for the page header.
    #[must_use]
    pub fn summary(&self) -> MaterialSummary {
        let out_of_stock = self
            .materials
            .iter()
            .filter(|m| m.status == MaterialStatus::OutOfStock)
            .count();
        MaterialSummary {
            in_stock: self.materials.len() - out_of_stock,
            out_of_stock,
            total_quantity: self.materials.iter().map(|m| m.quantity).sum(),
        }
    }

    async fn persist(&self) -> Result<()> {
        if self.materials.is_empty() {
            return Ok(());
        }
        store::save(self.store, MATERIALS, &self.materials).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::materials::default_materials;
    use crate::store::MemoryStore;
    use crate::test_utils::setup_test_store;

    fn draft(name: &str, quantity: f64) -> MaterialDraft {
        MaterialDraft {
            name: name.to_string(),
            status: MaterialStatus::InStock,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_first_mount_seeds_and_persists_defaults() -> Result<()> {
        let store = setup_test_store().await?;
        let page = MaterialsPage::mount(&store, &default_materials()).await?;

        assert_eq!(page.materials(), default_materials().as_slice());
        assert_eq!(
            store::load(&store, MATERIALS).await?,
            Some(default_materials())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_second_mount_loads_stored_collection() -> Result<()> {
        let store = MemoryStore::new();
        {
            let mut page = MaterialsPage::mount(&store, &default_materials()).await?;
            page.add(draft("Timber", 40.0)).await?;
        }

        let page = MaterialsPage::mount(&store, &default_materials()).await?;
        assert_eq!(page.materials().len(), 5);
        assert_eq!(page.materials()[4].name, "Timber");
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupted_value_falls_back_to_seed() -> Result<()> {
        let store = MemoryStore::new();
        store.set("materials", "{\"oops\":true}".to_string()).await?;

        let page = MaterialsPage::mount(&store, &default_materials()).await?;
        assert_eq!(page.materials(), default_materials().as_slice());
        Ok(())
    }

    #[tokio::test]
    async fn test_stored_empty_list_is_not_reseeded() -> Result<()> {
        let store = MemoryStore::new();
        store.set("materials", "[]".to_string()).await?;

        let page = MaterialsPage::mount(&store, &default_materials()).await?;
        assert!(page.materials().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_trims_and_persists() -> Result<()> {
        let store = MemoryStore::new();
        let mut page = MaterialsPage::mount(&store, &default_materials()).await?;

        let added = page.add(draft("  Gravel ", 75.0)).await?;

        assert_eq!(added.name, "Gravel");
        let stored = store::load(&store, MATERIALS).await?.unwrap();
        assert_eq!(stored.last(), Some(&added));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_blank_name_is_rejected() -> Result<()> {
        let store = MemoryStore::new();
        let mut page = MaterialsPage::mount(&store, &default_materials()).await?;

        let result = page.add(draft("   ", 10.0)).await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        assert_eq!(page.materials().len(), 4);
        assert_eq!(store::load(&store, MATERIALS).await?.unwrap().len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_status_flips_only_target() -> Result<()> {
        let store = MemoryStore::new();
        let mut page = MaterialsPage::mount(&store, &default_materials()).await?;

        let steel = page.toggle_status(1).await?;
        assert_eq!(steel.status, MaterialStatus::InStock);
        assert_eq!(steel.quantity, 0.0);

        let stored = store::load(&store, MATERIALS).await?.unwrap();
        assert_eq!(stored[1].status, MaterialStatus::InStock);
        assert_eq!(stored[0], default_materials()[0]);

        page.toggle_status(1).await?;
        assert_eq!(page.materials()[1], default_materials()[1]);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_quantity_is_unbounded() -> Result<()> {
        let store = MemoryStore::new();
        let mut page = MaterialsPage::mount(&store, &default_materials()).await?;

        page.set_quantity(2, -5.0).await?;

        let stored = store::load(&store, MATERIALS).await?.unwrap();
        assert_eq!(stored[2].quantity, -5.0);
        assert_eq!(stored[2].status, MaterialStatus::InStock);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_index_is_an_error() -> Result<()> {
        let store = MemoryStore::new();
        let mut page = MaterialsPage::mount(&store, &default_materials()).await?;

        assert!(matches!(
            page.toggle_status(9).await,
            Err(Error::MaterialNotFound { index: 9 })
        ));
        assert!(matches!(
            page.set_quantity(4, 1.0).await,
            Err(Error::MaterialNotFound { index: 4 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_counts() -> Result<()> {
        let store = MemoryStore::new();
        let page = MaterialsPage::mount(&store, &default_materials()).await?;

        let summary = page.summary();
        assert_eq!(summary.in_stock, 3);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.total_quantity, 1000.0);
        Ok(())
    }
}
