//! Centralized constants for the settings panel
//!
//! This module contains the persisted section/key names, the numeric domains
//! of the adjustable fields and their load-time defaults. Each constant
//! includes documentation on its purpose, unit, and range.

// ============================================================================
// SECTIONS & KEYS
// ============================================================================

/// Section holding password protection state.
pub const LOGIN_SECTION: &str = "login";

/// Section holding behaviour preferences.
pub const PREFERENCES_SECTION: &str = "preferences";

/// Whether password protection is enabled (bool, section: login).
pub const LOGIN_ENABLED_KEY: &str = "enabled";

/// Hex-encoded SHA-256 hash of the password (string, section: login).
/// An empty string means no password has been set yet.
pub const LOGIN_PASSWORD_KEY: &str = "password";

/// Whether the application auto-locks (bool, section: preferences).
pub const AUTO_LOCK_ENABLED_KEY: &str = "auto_lock_enabled";

/// Auto-lock delay (int, section: preferences).
pub const AUTO_LOCK_MINUTES_KEY: &str = "auto_lock_minutes";

/// Code refresh interval (int, section: preferences).
pub const REFRESH_SECONDS_KEY: &str = "refresh_seconds";

// ============================================================================
// AUTO-LOCK CONFIGURATION
// ============================================================================

/// Minimum auto-lock delay accepted by the spin control and on load.
/// Unit: minutes
pub const AUTO_LOCK_MIN_MINUTES: u32 = 1;

/// Maximum auto-lock delay accepted by the spin control and on load.
/// Unit: minutes
pub const AUTO_LOCK_MAX_MINUTES: u32 = 10;

/// Value used when the stored auto-lock delay is out of range.
/// Unit: minutes
pub const AUTO_LOCK_DEFAULT_MINUTES: u32 = 3;

// ============================================================================
// CODE REFRESH CONFIGURATION
// ============================================================================

/// Minimum refresh interval the spin control lets the user pick.
/// Unit: seconds
pub const REFRESH_MIN_SECONDS: u32 = 10;

/// Maximum refresh interval, shared by the spin control and the load check.
/// Unit: seconds
pub const REFRESH_MAX_SECONDS: u32 = 120;

/// Lower bound applied when loading a stored refresh interval.
/// Unit: seconds
/// Note: higher than REFRESH_MIN_SECONDS, so values in 10-29 picked in the
/// panel come back as REFRESH_DEFAULT_SECONDS on the next load.
pub const REFRESH_LOAD_MIN_SECONDS: u32 = 30;

/// Value used when the stored refresh interval is outside the load range.
/// Unit: seconds
pub const REFRESH_DEFAULT_SECONDS: u32 = 30;

// ============================================================================
// FILES
// ============================================================================

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "twofactor-settings";

/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "settings.toml";

/// Settings file permissions (user read/write only, the file holds the password hash).
/// Unit: Unix permission bits (octal)
pub const CONFIG_FILE_PERMISSIONS: u32 = 0o600;

/// Permission mask to check for group/other access.
/// Unit: Unix permission bits (octal)
pub const CONFIG_PERMISSION_MASK_GROUP_OTHER: u32 = 0o077;
