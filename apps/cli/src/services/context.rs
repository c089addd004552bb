use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rally_domain::config::RallyConfig;
use rally_registry::{
    RegistrantStore, RegistrationStatus, load_snapshot, registration_status, save_snapshot,
};
use std::path::PathBuf;

/// Resolved configuration plus the roster file every command reads and writes.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: RallyConfig,
    pub roster_path: PathBuf,
}

impl AppContext {
    pub fn new(config: RallyConfig, roster_override: Option<PathBuf>) -> Self {
        let roster_path = roster_override.unwrap_or_else(|| config.storage.roster.clone());
        Self { config, roster_path }
    }

    pub async fn open_store(&self) -> Result<RegistrantStore> {
        let snapshot = load_snapshot(&self.roster_path)
            .await
            .with_context(|| format!("Cannot open roster {}", self.roster_path.display()))?;
        Ok(RegistrantStore::from_snapshot(snapshot))
    }

    pub async fn save_store(&self, store: &RegistrantStore) -> Result<()> {
        save_snapshot(&self.roster_path, &store.snapshot())
            .await
            .with_context(|| format!("Cannot save roster {}", self.roster_path.display()))
    }

    pub fn status(&self, store: &RegistrantStore, at: DateTime<Utc>) -> RegistrationStatus {
        registration_status(at, &self.config.registration, store.window_override())
    }
}
