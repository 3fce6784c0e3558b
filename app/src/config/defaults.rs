//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (
        "PROFILE_NAME",
        "",
        "Display name shown on the profile screen",
    ),
    (
        "PROFILE_EMAIL",
        "",
        "Contact e-mail shown on the profile screen",
    ),
    (
        "FILTER_BY_INTERESTS",
        "true",
        "Show ads matching your interests first in the All category",
    ),
    (
        "NOTIFICATIONS_ENABLED",
        "true",
        "Receive notifications about new ads and rewards",
    ),
    (
        "EMAIL_UPDATES",
        "false",
        "Receive offers and updates by e-mail",
    ),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
