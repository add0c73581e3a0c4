use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming a JSON file with a [`DatasetConfig`].
pub const CONFIG_ENV: &str = "GROUNDWATER_DASH_CONFIG";

// ---------------------------------------------------------------------------
// Dataset configuration
// ---------------------------------------------------------------------------

/// Column naming convention of the wide input table.
///
/// ```json
/// { "region_column": "NOM_EDO", "site_column": "NOM_ACUIF", "value_prefix": "PNE_" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub region_column: String,
    pub site_column: String,
    /// Value columns are named `<value_prefix><year>`.
    pub value_prefix: String,
    /// Label shown for the "every value" filter option.
    pub all_label: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            region_column: "NOM_EDO".to_string(),
            site_column: "NOM_ACUIF".to_string(),
            value_prefix: "PNE_".to_string(),
            all_label: "ALL".to_string(),
        }
    }
}

impl DatasetConfig {
    /// Read a configuration file; absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text).context("parsing config JSON")
    }

    /// Configuration from the file named by [`CONFIG_ENV`], or defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
