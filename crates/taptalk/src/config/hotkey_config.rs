use crate::{
    AppError, AppResult,
    config::{default_assert_keys, default_release_watch_keys},
    hotkey::{HotkeyCombo, ModKey},
};

use std::{collections::HashSet, panic::Location};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Hotkey chord configuration.
///
/// Key names use lowercase snake_case: `ctrl_left`, `ctrl_right`,
/// `alt_left`, `alt_right`, `shift_left`, `shift_right`, `meta_left`,
/// `meta_right`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Keys that must all be held to start a session.
    #[serde(default = "default_assert_keys")]
    pub assert: Vec<String>,
    /// Keys whose release ends a session. Must be a superset of `assert`.
    #[serde(default = "default_release_watch_keys")]
    pub release_watch: Vec<String>,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            assert: default_assert_keys(),
            release_watch: default_release_watch_keys(),
        }
    }
}

impl HotkeyConfig {
    /// Build the validated chord from the configured key names.
    #[track_caller]
    pub fn to_combo(&self) -> AppResult<HotkeyCombo> {
        let assert = Self::parse_keys(&self.assert)?;
        let release_watch = Self::parse_keys(&self.release_watch)?;

        HotkeyCombo::new(assert, release_watch)
    }

    #[track_caller]
    fn parse_keys(names: &[String]) -> AppResult<HashSet<ModKey>> {
        names
            .iter()
            .map(|name| {
                ModKey::from_name(name).ok_or_else(|| AppError::ConfigError {
                    reason: format!("Unknown hotkey name: {:?}", name),
                    location: ErrorLocation::from(Location::caller()),
                })
            })
            .collect()
    }
}
