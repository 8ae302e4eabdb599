use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Name of the configuration bundle holding the voting flags.
pub const SETTINGS_NAME: &str = "voting_system.settings";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Settings {
    #[serde(default)]
    pub deactivate_voting: bool,
    #[serde(default)]
    pub deactivate_voting_per_question: bool,
}
