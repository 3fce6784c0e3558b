//! Runtime application configuration loaded from DB + environment overrides.

use super::defaults::get_default;
use super::manager::SettingsManager;

/// Runtime configuration populated from the settings DB.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub profile_name: String,
    pub profile_email: String,
    /// Pass the user's interests to the catalog when browsing "All".
    pub filter_by_interests: bool,
    pub notifications_enabled: bool,
    pub email_updates: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile_name: String::new(),
            profile_email: String::new(),
            filter_by_interests: true,
            notifications_enabled: true,
            email_updates: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager (DB-first, env overrides).
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String { sm.get_setting(key).unwrap_or_default() };

        // FILTER_BY_INTERESTS can also be overridden by env
        let filter_by_interests = match std::env::var("FILTER_BY_INTERESTS") {
            Ok(v) => parse_bool(&v, "FILTER_BY_INTERESTS"),
            Err(_) => parse_bool(&g("FILTER_BY_INTERESTS"), "FILTER_BY_INTERESTS"),
        };

        Ok(Self {
            profile_name: g("PROFILE_NAME"),
            profile_email: g("PROFILE_EMAIL"),
            filter_by_interests,
            notifications_enabled: parse_bool(&g("NOTIFICATIONS_ENABLED"), "NOTIFICATIONS_ENABLED"),
            email_updates: parse_bool(&g("EMAIL_UPDATES"), "EMAIL_UPDATES"),
        })
    }

    /// Reload config from the settings manager.
    pub fn reload(&mut self, sm: &SettingsManager) -> Result<(), anyhow::Error> {
        *self = Self::load(sm)?;
        Ok(())
    }
}

/// "true"/"false", anything else falls back to the key's default.
fn parse_bool(s: &str, key: &str) -> bool {
    match s {
        "true" => true,
        "false" => false,
        _ => get_default(key) == Some("true"),
    }
}
