//! Terminal password entry

use crate::auth;
use crate::controller::CredentialWindow;
use crate::settings_state::Field;
use crate::store::{SettingsStore, Value};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Asks for a new password on the terminal and stores its hash
///
/// Replacing an existing password requires the current one first.
pub struct PromptCredentialWindow {
    store: Arc<dyn SettingsStore>,
}

impl PromptCredentialWindow {
    /// Create the window and prompt right away
    pub fn open(store: Arc<dyn SettingsStore>) -> Self {
        let mut window = Self { store };
        window.show();
        window
    }

    fn prompt(&self) -> Result<()> {
        let stored_hash = self.store.read_string(
            Field::LoginPassword.key(),
            Field::LoginPassword.section(),
        );
        let current = if stored_hash.is_empty() {
            None
        } else {
            Some(
                rpassword::prompt_password("Current password: ")
                    .context("Failed to read current password")?,
            )
        };

        let password =
            rpassword::prompt_password("New password: ").context("Failed to read password")?;
        let confirm = rpassword::prompt_password("Confirm password: ")
            .context("Failed to read confirmation")?;

        let hash = accept_password(&stored_hash, current.as_deref(), &password, &confirm)?;
        self.store.update(
            Field::LoginPassword.key(),
            Value::Str(hash),
            Field::LoginPassword.section(),
        );
        log::info!("Password updated");
        Ok(())
    }
}

impl CredentialWindow for PromptCredentialWindow {
    fn show(&mut self) {
        if let Err(e) = self.prompt() {
            log::warn!("Password not changed: {:#}", e);
        }
    }
}

/// Validate a password change, returning the hash to store
///
/// `stored_hash` is the hash currently on file (empty when none is set). When
/// one is set, `current` must match it.
pub fn accept_password(
    stored_hash: &str,
    current: Option<&str>,
    password: &str,
    confirm: &str,
) -> Result<String> {
    if !stored_hash.is_empty() {
        let current = current.unwrap_or_default();
        if !auth::verify_password(current, stored_hash) {
            anyhow::bail!("Current password is incorrect");
        }
    }
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }
    Ok(auth::hash_password(password))
}
