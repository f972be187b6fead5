//! Key-value entity - Backs the persistent store adapter.
//!
//! Each row holds one whole collection (`materials`, `workers`, `projects`)
//! serialized as a JSON array. Rows are overwritten, never appended.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value database model - one row per stored collection
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kv_store")]
pub struct Model {
    /// Storage key (e.g. `"projects"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized value, stored verbatim
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `KvEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
