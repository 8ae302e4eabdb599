use log::info;

use crate::core::models::settings::{Settings, SETTINGS_NAME};
use crate::core::ports::repository::{SettingsCommon, Store};
use crate::error::Error;

/// Both flags read as false until the bundle has been saved once.
pub async fn load_settings<S>(store: &mut S) -> Result<Settings, Error>
where
    S: Store,
{
    Ok(SettingsCommon::get(store, SETTINGS_NAME).await?.unwrap_or_default())
}

pub async fn save_settings<S>(store: &mut S, settings: Settings) -> Result<Settings, Error>
where
    S: Store,
{
    SettingsCommon::save(store, SETTINGS_NAME, &settings).await?;
    info!(
        "voting settings updated: deactivate_voting={}, deactivate_voting_per_question={}",
        settings.deactivate_voting, settings.deactivate_voting_per_question
    );
    Ok(settings)
}
