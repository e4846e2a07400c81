//! Settings file management
//!
//! This module handles loading and saving the settings file, a TOML document
//! with one table per section. The file holds the password hash, so it is
//! kept user read/write only.

use super::{SettingsStore, Value};
use crate::constants::{
    AUTO_LOCK_DEFAULT_MINUTES, AUTO_LOCK_ENABLED_KEY, AUTO_LOCK_MINUTES_KEY, CONFIG_DIR_NAME,
    CONFIG_FILE_NAME, CONFIG_FILE_PERMISSIONS, CONFIG_PERMISSION_MASK_GROUP_OTHER,
    LOGIN_ENABLED_KEY, LOGIN_PASSWORD_KEY, LOGIN_SECTION, PREFERENCES_SECTION,
    REFRESH_DEFAULT_SECONDS, REFRESH_SECONDS_KEY,
};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use toml::Table;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// TOML-backed settings store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    document: Mutex<Table>,
}

impl FileStore {
    /// Get the standard settings file path
    ///
    /// - macOS: `~/Library/Application Support/twofactor-settings/settings.toml`
    /// - Linux: `~/.config/twofactor-settings/settings.toml`
    /// - Windows: `%APPDATA%\twofactor-settings\settings.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Open the settings file at `path`, creating it with defaults if missing
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read or parsed
    /// - A missing file cannot be created
    pub fn open(path: &Path) -> Result<Self> {
        let document = if path.exists() {
            let mut document = Self::load_from_path(path)?;
            let filled = backfill_defaults(&mut document);
            if filled > 0 {
                log::debug!("Back-filled {} missing settings with defaults", filled);
            }
            document
        } else {
            log::info!("No settings file at {}, creating one", path.display());
            let document = default_document();
            write_document(path, &document)?;
            document
        };

        Ok(Self {
            path: path.to_path_buf(),
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the TOML document at `path`
    ///
    /// Warns (without failing) when the file is readable by group or others.
    pub fn load_from_path(path: &Path) -> Result<Table> {
        #[cfg(unix)]
        {
            let metadata = fs::metadata(path).context("Failed to read settings file metadata")?;
            let mode = metadata.permissions().mode();
            if mode & CONFIG_PERMISSION_MASK_GROUP_OTHER != 0 {
                log::warn!(
                    "Settings file has permissive permissions: {:o}. Should be {:o} (user read/write only).",
                    mode & 0o777,
                    CONFIG_FILE_PERMISSIONS
                );
            }
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        contents
            .parse::<Table>()
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Persist a single value, reporting I/O failures
    pub fn try_update(&self, key: &str, value: Value, section: &str) -> Result<()> {
        let mut document = self.document.lock();

        let entry = document
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(Table::new()));
        if !entry.is_table() {
            log::warn!("Replacing non-table entry for section [{}]", section);
            *entry = toml::Value::Table(Table::new());
        }
        if let toml::Value::Table(table) = entry {
            table.insert(key.to_string(), value.into_toml());
        }

        write_document(&self.path, &document)
    }
}

impl SettingsStore for FileStore {
    fn read(&self, key: &str, section: &str) -> Option<Value> {
        self.document
            .lock()
            .get(section)
            .and_then(|s| s.as_table())
            .and_then(|table| table.get(key))
            .and_then(Value::from_toml)
    }

    fn update(&self, key: &str, value: Value, section: &str) {
        log::debug!("[{}] {} = {}", section, key, value);
        if let Err(e) = self.try_update(key, value, section) {
            log::warn!("Failed to persist [{}] {}: {:#}", section, key, e);
        }
    }
}

/// Settings written to a fresh file
fn default_entries() -> [(&'static str, &'static str, Value); 5] {
    [
        (LOGIN_SECTION, LOGIN_ENABLED_KEY, Value::Bool(false)),
        (LOGIN_SECTION, LOGIN_PASSWORD_KEY, Value::Str(String::new())),
        (PREFERENCES_SECTION, AUTO_LOCK_ENABLED_KEY, Value::Bool(false)),
        (
            PREFERENCES_SECTION,
            AUTO_LOCK_MINUTES_KEY,
            Value::from(AUTO_LOCK_DEFAULT_MINUTES),
        ),
        (
            PREFERENCES_SECTION,
            REFRESH_SECONDS_KEY,
            Value::from(REFRESH_DEFAULT_SECONDS),
        ),
    ]
}

fn default_document() -> Table {
    let mut document = Table::new();
    backfill_defaults(&mut document);
    document
}

/// Insert defaults for missing keys only, returns how many were added.
/// Existing values are left alone even when out of range.
fn backfill_defaults(document: &mut Table) -> usize {
    let mut filled = 0;
    for (section, key, value) in default_entries() {
        let entry = document
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(Table::new()));
        if let toml::Value::Table(table) = entry {
            if !table.contains_key(key) {
                table.insert(key.to_string(), value.into_toml());
                filled += 1;
            }
        }
    }
    filled
}

/// Write the document, creating parent directories and restricting permissions
fn write_document(path: &Path, document: &Table) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create settings directory")?;
    }

    let contents = toml::to_string_pretty(document).context("Failed to serialize settings")?;

    fs::write(path, contents)
        .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

    #[cfg(unix)]
    {
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_mode(CONFIG_FILE_PERMISSIONS);
        fs::set_permissions(path, permissions)
            .context("Failed to set settings file permissions")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path() -> PathBuf {
        // Unique per call so parallel tests never share a file
        use std::thread;
        use std::time::{SystemTime, UNIX_EPOCH};

        let mut base = std::env::temp_dir();
        base.push("twofactor_settings_tests");
        base.push("file_store");

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tid = format!("{:?}", thread::current().id());
        base.push(format!("t_{nanos}_{tid}"));

        let _ = fs::create_dir_all(&base);

        base.join("settings.toml")
    }

    #[test]
    fn test_open_creates_file_with_defaults() {
        let path = temp_settings_path();
        let _ = fs::remove_file(&path);

        let store = FileStore::open(&path).expect("Failed to open store");

        assert!(path.exists(), "Settings file should be created");
        assert!(!store.read_bool(LOGIN_ENABLED_KEY, LOGIN_SECTION));
        assert_eq!(store.read_string(LOGIN_PASSWORD_KEY, LOGIN_SECTION), "");
        assert_eq!(
            store.read_int(AUTO_LOCK_MINUTES_KEY, PREFERENCES_SECTION),
            3
        );
        assert_eq!(
            store.read_int(REFRESH_SECONDS_KEY, PREFERENCES_SECTION),
            30
        );

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_update_survives_reopen() {
        let path = temp_settings_path();

        let store = FileStore::open(&path).expect("Failed to open store");
        store.update(REFRESH_SECONDS_KEY, Value::Int(90), PREFERENCES_SECTION);
        store.update(LOGIN_ENABLED_KEY, Value::Bool(true), LOGIN_SECTION);
        drop(store);

        let reopened = FileStore::open(&path).expect("Failed to reopen store");
        assert_eq!(
            reopened.read_int(REFRESH_SECONDS_KEY, PREFERENCES_SECTION),
            90
        );
        assert!(reopened.read_bool(LOGIN_ENABLED_KEY, LOGIN_SECTION));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_out_of_range_values_are_kept_on_disk() {
        let path = temp_settings_path();
        fs::write(
            &path,
            "[preferences]\nauto_lock_minutes = 0\nrefresh_seconds = 15\n",
        )
        .unwrap();

        let store = FileStore::open(&path).expect("Failed to open store");
        assert_eq!(store.read_int(AUTO_LOCK_MINUTES_KEY, PREFERENCES_SECTION), 0);
        assert_eq!(store.read_int(REFRESH_SECONDS_KEY, PREFERENCES_SECTION), 15);

        // Missing keys are filled in memory but the file is untouched
        assert!(!store.read_bool(AUTO_LOCK_ENABLED_KEY, PREFERENCES_SECTION));
        let on_disk = fs::read_to_string(&path).unwrap();
        assert!(!on_disk.contains("auto_lock_enabled"));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_float_numbers_load_as_integers() {
        let path = temp_settings_path();
        fs::write(
            &path,
            "[preferences]\nauto_lock_minutes = 5.0\nrefresh_seconds = 60.0\n",
        )
        .unwrap();

        let store = FileStore::open(&path).expect("Failed to open store");
        assert_eq!(store.read_int(AUTO_LOCK_MINUTES_KEY, PREFERENCES_SECTION), 5);
        assert_eq!(store.read_int(REFRESH_SECONDS_KEY, PREFERENCES_SECTION), 60);

        let state = crate::SettingsState::load(&store);
        assert_eq!(state.auto_lock_minutes, 5);
        assert_eq!(state.refresh_seconds, 60);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_toml_fails_to_open() {
        let path = temp_settings_path();
        fs::write(&path, "this is = = not toml").unwrap();

        assert!(FileStore::open(&path).is_err());

        fs::remove_file(path).ok();
    }

    #[test]
    #[cfg(unix)]
    fn test_settings_file_permissions() {
        let path = temp_settings_path();
        let store = FileStore::open(&path).expect("Failed to open store");
        store.update(LOGIN_PASSWORD_KEY, Value::from("abc"), LOGIN_SECTION);

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600, "Permissions should be 600");

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_update_replaces_non_table_section() {
        let path = temp_settings_path();
        fs::write(&path, "login = 5\n").unwrap();

        // Back-fill skips the scalar, update replaces it with a table
        let store = FileStore::open(&path).expect("Failed to open store");
        store
            .try_update(LOGIN_ENABLED_KEY, Value::Bool(true), LOGIN_SECTION)
            .expect("Update should succeed");
        assert!(store.read_bool(LOGIN_ENABLED_KEY, LOGIN_SECTION));

        fs::remove_file(path).ok();
    }
}
