//! Catalog source configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the dish table comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// TOML file with `[[dishes]]` tables; the built-in menu is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
