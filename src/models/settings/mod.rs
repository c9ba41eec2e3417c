// Settings module
// User configuration loaded from the TOML config file

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::occurrence::LeapDayPolicy;

/// Default look-ahead for the upcoming list.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite file; the platform data directory is used when unset.
    pub database_path: Option<PathBuf>,
    /// Account the records belong to; the OS login name is used when unset.
    pub user: Option<String>,
    pub upcoming_window_days: u32,
    pub leap_day_policy: LeapDayPolicy,
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            user: None,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            leap_day_policy: LeapDayPolicy::default(),
            notifications_enabled: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.upcoming_window_days > 365 {
            return Err("upcoming_window_days must be between 0 and 365".to_string());
        }

        if let Some(ref user) = self.user {
            if user.trim().is_empty() {
                return Err("user cannot be blank".to_string());
            }
        }

        Ok(())
    }
}
