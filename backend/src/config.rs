//! Console settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Database file used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "buildings.sqlite3";

/// Configuration values for the buildings console.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BUILDINGS")]
pub struct BuildingsSettings {
    /// SQLite database path or URL.
    pub database_url: Option<String>,
    /// Keep buildings in memory only; nothing is written to disk.
    #[ortho_config(default = false)]
    pub in_memory: bool,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl BuildingsSettings {
    /// Return the configured database URL, falling back to the default.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }
}
