//! Material seed configuration loaded from config.toml
//!
//! The materials page seeds its collection the first time it is opened. The
//! seed comes from `[[materials]]` entries in the configuration file when one
//! is present, and from the four built-in construction staples otherwise.

use crate::errors::{Error, Result};
use crate::models::{Material, MaterialStatus};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "BUILDBOARD_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Materials to seed an empty inventory with
    #[serde(default)]
    pub materials: Vec<MaterialConfig>,
}

/// Configuration for a single seeded material
#[derive(Debug, Deserialize, Clone)]
pub struct MaterialConfig {
    /// Name of the material
    pub name: String,
    /// Initial stock state
    pub status: MaterialStatus,
    /// Initial quantity
    pub quantity: f64,
}

impl From<MaterialConfig> for Material {
    fn from(value: MaterialConfig) -> Self {
        Self::new(value.name, value.status, value.quantity)
    }
}

/// The built-in seed: Cement, Steel, Bricks, Sand.
#[must_use]
pub fn default_materials() -> Vec<Material> {
    vec![
        Material::new("Cement", MaterialStatus::InStock, 200.0),
        Material::new("Steel", MaterialStatus::OutOfStock, 0.0),
        Material::new("Bricks", MaterialStatus::InStock, 500.0),
        Material::new("Sand", MaterialStatus::InStock, 300.0),
    ]
}

/// Loads the seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A material entry is missing a field or has an unknown status
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Resolves the material seed for this run.
///
/// Reads the file named by `BUILDBOARD_CONFIG` (default `config.toml`). A
/// missing file falls back to [`default_materials`]; a file that exists but
/// does not parse is an error. An empty `[[materials]]` list also falls back,
/// since an empty seed would leave the page with nothing to persist.
pub fn load_material_seed() -> Result<Vec<Material>> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());

    if !Path::new(&path).exists() {
        tracing::info!("No config file at {path}, using built-in material seed");
        return Ok(default_materials());
    }

    let config = load_config(&path)?;
    if config.materials.is_empty() {
        tracing::info!("{path} lists no materials, using built-in material seed");
        return Ok(default_materials());
    }

    tracing::info!(
        "Loaded {} seed materials from {path}",
        config.materials.len()
    );
    Ok(config.materials.into_iter().map(Material::from).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_material_config() {
        let toml_str = r#"
            [[materials]]
            name = "Timber"
            status = "In Stock"
            quantity = 40.0

            [[materials]]
            name = "Rebar"
            status = "Out of Stock"
            quantity = 0.0
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.materials.len(), 2);
        assert_eq!(config.materials[0].name, "Timber");
        assert_eq!(config.materials[0].quantity, 40.0);
        assert_eq!(config.materials[1].status, MaterialStatus::OutOfStock);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let toml_str = r#"
            [[materials]]
            name = "Timber"
            status = "Backordered"
            quantity = 1.0
        "#;

        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_default_materials_order() {
        let names: Vec<String> = default_materials().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Cement", "Steel", "Bricks", "Sand"]);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
