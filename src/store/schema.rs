use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;

/// Completed lessons, persisted across runs. The badge count is derived
/// from the completed list but stored too so other tools can read it
/// without knowing the rule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressData {
    pub schema_version: u32,
    pub completed: Vec<u32>,
    pub badges: u32,
    pub last_completed_date: Option<String>,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            completed: Vec::new(),
            badges: 0,
            last_completed_date: None,
        }
    }
}

impl ProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

/// Learner-facing toggles, kept apart from progress so resetting progress
/// never touches them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettingsData {
    pub schema_version: u32,
    pub sound_enabled: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            sound_enabled: true,
        }
    }
}
