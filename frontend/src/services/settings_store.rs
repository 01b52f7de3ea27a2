use anyhow::Result;
use shared::{Configuration, SettingsMessage, StoredSettings, HOURS_PER_DAY_KEY, WORKING_BREED_DAY_KEY};

use super::chrome;

/// Read both settings from extension storage, using defaults for anything
/// missing or unusable
pub async fn load_configuration() -> Result<Configuration> {
    let stored: StoredSettings = chrome::storage_get(&[HOURS_PER_DAY_KEY, WORKING_BREED_DAY_KEY]).await?;
    Ok(Configuration::from_stored(&stored))
}

/// Persist the value carried by a settings message under its storage key
pub async fn persist(message: &SettingsMessage) -> Result<()> {
    chrome::storage_set(&message.storage_entry()).await
}
