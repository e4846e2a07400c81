//! Settings state and validation rules
//!
//! Holds the in-memory mirror of the persisted fields, the load-time
//! coercion of stored numbers and the enabled state of dependent controls.
//! Nothing here touches the UI.

use crate::constants::{
    AUTO_LOCK_DEFAULT_MINUTES, AUTO_LOCK_ENABLED_KEY, AUTO_LOCK_MAX_MINUTES,
    AUTO_LOCK_MIN_MINUTES, AUTO_LOCK_MINUTES_KEY, LOGIN_ENABLED_KEY, LOGIN_PASSWORD_KEY,
    LOGIN_SECTION, PREFERENCES_SECTION, REFRESH_DEFAULT_SECONDS, REFRESH_LOAD_MIN_SECONDS,
    REFRESH_MAX_SECONDS, REFRESH_MIN_SECONDS, REFRESH_SECONDS_KEY,
};
use crate::store::SettingsStore;
use serde::Serialize;
use std::ops::RangeInclusive;

/// Values the auto-lock spin control can produce
pub const AUTO_LOCK_MINUTES_RANGE: RangeInclusive<u32> =
    AUTO_LOCK_MIN_MINUTES..=AUTO_LOCK_MAX_MINUTES;

/// Values the refresh spin control can produce
pub const REFRESH_SECONDS_RANGE: RangeInclusive<u32> =
    REFRESH_MIN_SECONDS..=REFRESH_MAX_SECONDS;

/// Values accepted when loading a stored refresh interval
pub const REFRESH_LOAD_RANGE: RangeInclusive<u32> =
    REFRESH_LOAD_MIN_SECONDS..=REFRESH_MAX_SECONDS;

/// A persisted settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LoginEnabled,
    LoginPassword,
    AutoLockEnabled,
    AutoLockMinutes,
    RefreshSeconds,
}

impl Field {
    pub const fn key(self) -> &'static str {
        match self {
            Field::LoginEnabled => LOGIN_ENABLED_KEY,
            Field::LoginPassword => LOGIN_PASSWORD_KEY,
            Field::AutoLockEnabled => AUTO_LOCK_ENABLED_KEY,
            Field::AutoLockMinutes => AUTO_LOCK_MINUTES_KEY,
            Field::RefreshSeconds => REFRESH_SECONDS_KEY,
        }
    }

    pub const fn section(self) -> &'static str {
        match self {
            Field::LoginEnabled | Field::LoginPassword => LOGIN_SECTION,
            Field::AutoLockEnabled | Field::AutoLockMinutes | Field::RefreshSeconds => {
                PREFERENCES_SECTION
            }
        }
    }
}

/// In-memory mirror of every settings field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsState {
    /// Whether password protection is on
    pub login_enabled: bool,
    /// Stored password hash (empty = no password set)
    #[serde(skip)]
    pub password_hash: String,
    /// Whether auto-lock is on
    pub auto_lock_enabled: bool,
    /// Auto-lock delay in minutes, always within AUTO_LOCK_MINUTES_RANGE
    pub auto_lock_minutes: u32,
    /// Code refresh interval in seconds
    pub refresh_seconds: u32,
}

/// Enabled state of the controls that depend on a boolean field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub password_entry_sensitive: bool,
    pub auto_lock_time_sensitive: bool,
}

impl SettingsState {
    /// Read every field from the store, coercing out-of-range numbers
    ///
    /// Coerced values stay in memory only; the store keeps the stored value until
    /// the user changes the field.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let stored_minutes = store.read_int(
            Field::AutoLockMinutes.key(),
            Field::AutoLockMinutes.section(),
        );
        let stored_refresh = store.read_int(
            Field::RefreshSeconds.key(),
            Field::RefreshSeconds.section(),
        );

        Self {
            login_enabled: store.read_bool(
                Field::LoginEnabled.key(),
                Field::LoginEnabled.section(),
            ),
            password_hash: store.read_string(
                Field::LoginPassword.key(),
                Field::LoginPassword.section(),
            ),
            auto_lock_enabled: store.read_bool(
                Field::AutoLockEnabled.key(),
                Field::AutoLockEnabled.section(),
            ),
            auto_lock_minutes: clamp_auto_lock_minutes(stored_minutes),
            refresh_seconds: clamp_refresh_seconds(stored_refresh),
        }
    }

    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }

    pub fn affordances(&self) -> Affordances {
        Affordances {
            password_entry_sensitive: self.login_enabled,
            auto_lock_time_sensitive: self.auto_lock_enabled,
        }
    }
}

/// Stored auto-lock minutes, or AUTO_LOCK_DEFAULT_MINUTES when outside 1-10
pub fn clamp_auto_lock_minutes(stored: i64) -> u32 {
    in_range_or(stored, &AUTO_LOCK_MINUTES_RANGE, AUTO_LOCK_DEFAULT_MINUTES)
}

/// Stored refresh seconds, or REFRESH_DEFAULT_SECONDS when outside 30-120
pub fn clamp_refresh_seconds(stored: i64) -> u32 {
    in_range_or(stored, &REFRESH_LOAD_RANGE, REFRESH_DEFAULT_SECONDS)
}

/// Pin a spin-control value for the auto-lock delay into 1-10
pub fn adjust_auto_lock_minutes(value: u32) -> u32 {
    value.clamp(*AUTO_LOCK_MINUTES_RANGE.start(), *AUTO_LOCK_MINUTES_RANGE.end())
}

/// Pin a spin-control value for the refresh interval into 10-120
pub fn adjust_refresh_seconds(value: u32) -> u32 {
    value.clamp(*REFRESH_SECONDS_RANGE.start(), *REFRESH_SECONDS_RANGE.end())
}

fn in_range_or(stored: i64, range: &RangeInclusive<u32>, default: u32) -> u32 {
    match u32::try_from(stored) {
        Ok(value) if range.contains(&value) => value,
        _ => {
            log::debug!(
                "Stored value {} outside {}-{}, using {}",
                stored,
                range.start(),
                range.end(),
                default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_clamp_auto_lock_minutes_boundaries() {
        assert_eq!(clamp_auto_lock_minutes(0), 3);
        assert_eq!(clamp_auto_lock_minutes(1), 1);
        assert_eq!(clamp_auto_lock_minutes(10), 10);
        assert_eq!(clamp_auto_lock_minutes(11), 3);
        assert_eq!(clamp_auto_lock_minutes(-5), 3);
        assert_eq!(clamp_auto_lock_minutes(i64::MAX), 3);
    }

    #[test]
    fn test_clamp_refresh_seconds_uses_load_range() {
        assert_eq!(clamp_refresh_seconds(15), 30, "10-29 is adjustable but not loadable");
        assert_eq!(clamp_refresh_seconds(29), 30);
        assert_eq!(clamp_refresh_seconds(30), 30);
        assert_eq!(clamp_refresh_seconds(60), 60);
        assert_eq!(clamp_refresh_seconds(120), 120);
        assert_eq!(clamp_refresh_seconds(121), 30);
        assert_eq!(clamp_refresh_seconds(0), 30);
    }

    #[test]
    fn test_adjust_pins_to_control_domain() {
        assert_eq!(adjust_auto_lock_minutes(0), 1);
        assert_eq!(adjust_auto_lock_minutes(5), 5);
        assert_eq!(adjust_auto_lock_minutes(99), 10);
        assert_eq!(adjust_refresh_seconds(5), 10);
        assert_eq!(adjust_refresh_seconds(15), 15, "10-29 is a valid pick");
        assert_eq!(adjust_refresh_seconds(5000), 120);
    }

    #[test]
    fn test_refresh_domains_differ() {
        // 15 can be picked in the panel but does not survive a reload
        assert!(REFRESH_SECONDS_RANGE.contains(&15));
        assert!(!REFRESH_LOAD_RANGE.contains(&15));
        assert_eq!(REFRESH_SECONDS_RANGE.end(), REFRESH_LOAD_RANGE.end());
    }

    #[test]
    fn test_load_from_empty_store() {
        let state = SettingsState::load(&MemoryStore::new());
        assert!(!state.login_enabled);
        assert!(!state.has_password());
        assert!(!state.auto_lock_enabled);
        assert_eq!(state.auto_lock_minutes, 3);
        assert_eq!(state.refresh_seconds, 30);
    }

    #[test]
    fn test_load_keeps_valid_values() {
        let store = MemoryStore::new()
            .with(LOGIN_ENABLED_KEY, true, LOGIN_SECTION)
            .with(LOGIN_PASSWORD_KEY, "deadbeef", LOGIN_SECTION)
            .with(AUTO_LOCK_ENABLED_KEY, true, PREFERENCES_SECTION)
            .with(AUTO_LOCK_MINUTES_KEY, 7u32, PREFERENCES_SECTION)
            .with(REFRESH_SECONDS_KEY, 60u32, PREFERENCES_SECTION);

        let state = SettingsState::load(&store);
        assert_eq!(
            state,
            SettingsState {
                login_enabled: true,
                password_hash: "deadbeef".to_string(),
                auto_lock_enabled: true,
                auto_lock_minutes: 7,
                refresh_seconds: 60,
            }
        );
    }

    #[test]
    fn test_affordances_follow_boolean_fields() {
        let mut state = SettingsState::load(&MemoryStore::new());
        assert_eq!(
            state.affordances(),
            Affordances {
                password_entry_sensitive: false,
                auto_lock_time_sensitive: false,
            }
        );

        state.auto_lock_enabled = true;
        assert!(state.affordances().auto_lock_time_sensitive);
        assert!(!state.affordances().password_entry_sensitive);
    }

    #[test]
    fn test_field_locations() {
        assert_eq!(Field::LoginEnabled.section(), "login");
        assert_eq!(Field::LoginPassword.key(), "password");
        assert_eq!(Field::RefreshSeconds.section(), "preferences");
    }

    #[test]
    fn test_serialized_state_omits_password_hash() {
        let store = MemoryStore::new().with(LOGIN_PASSWORD_KEY, "secret-hash", LOGIN_SECTION);
        let rendered = toml::to_string(&SettingsState::load(&store)).unwrap();
        assert!(!rendered.contains("secret-hash"));
        assert!(rendered.contains("refresh_seconds = 30"));
    }
}
