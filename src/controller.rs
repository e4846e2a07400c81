//! Settings panel controller
//!
//! Mediates between the settings store, the presentation adapter and the
//! credential-entry window. Every operation is synchronous and completes
//! before returning.

use crate::settings_state::{
    adjust_auto_lock_minutes, adjust_refresh_seconds, Affordances, Field, SettingsState,
};
use crate::store::{SettingsStore, Value};
use global_hotkey::hotkey::Code;
use log::{debug, info};
use std::sync::Arc;

/// Presentation adapter bound to the concrete controls
pub trait SettingsView {
    /// Display the panel with the given values
    fn present(&mut self, state: &SettingsState);
    fn set_password_entry_sensitive(&mut self, sensitive: bool);
    fn set_auto_lock_time_sensitive(&mut self, sensitive: bool);
    /// Hide the panel without discarding it
    fn hide(&mut self);
}

/// The window that owns the settings panel
pub trait ParentContext {
    /// Re-read settings that affect the parent window
    fn refresh_window(&mut self);
}

/// Password entry window
pub trait CredentialWindow {
    /// Re-surface a window that was already opened
    fn show(&mut self);
}

/// Opens credential windows on demand
///
/// Creating a window also opens it.
pub trait CredentialWindowFactory {
    fn create(&mut self, store: Arc<dyn SettingsStore>) -> Box<dyn CredentialWindow>;
}

impl<F> CredentialWindowFactory for F
where
    F: FnMut(Arc<dyn SettingsStore>) -> Box<dyn CredentialWindow>,
{
    fn create(&mut self, store: Arc<dyn SettingsStore>) -> Box<dyn CredentialWindow> {
        self(store)
    }
}

pub struct SettingsController {
    store: Arc<dyn SettingsStore>,
    parent: Box<dyn ParentContext>,
    view: Box<dyn SettingsView>,
    credential_factory: Box<dyn CredentialWindowFactory>,
    /// Created on first request, then reused
    credential_window: Option<Box<dyn CredentialWindow>>,
    state: SettingsState,
    visible: bool,
}

impl SettingsController {
    /// Load the current settings and present the panel
    ///
    /// Out-of-range numbers are coerced in memory only, nothing is written.
    pub fn new(
        parent: Box<dyn ParentContext>,
        store: Arc<dyn SettingsStore>,
        mut view: Box<dyn SettingsView>,
        credential_factory: Box<dyn CredentialWindowFactory>,
    ) -> Self {
        let state = SettingsState::load(store.as_ref());
        let affordances = state.affordances();

        view.set_password_entry_sensitive(affordances.password_entry_sensitive);
        view.set_auto_lock_time_sensitive(affordances.auto_lock_time_sensitive);
        view.present(&state);
        debug!("Settings panel initialized: {:?}", state);

        Self {
            store,
            parent,
            view,
            credential_factory,
            credential_window: None,
            state,
            visible: true,
        }
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    pub fn affordances(&self) -> Affordances {
        self.state.affordances()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_credential_window(&self) -> bool {
        self.credential_window.is_some()
    }

    /// Toggle password protection
    ///
    /// Enabling it without a stored password opens the credential window.
    /// The parent is refreshed either way.
    pub fn set_login_enabled(&mut self, enabled: bool) {
        self.view.set_password_entry_sensitive(enabled);
        self.persist(Field::LoginEnabled, Value::Bool(enabled));
        self.state.login_enabled = enabled;
        info!(
            "Password protection {}",
            if enabled { "enabled" } else { "disabled" }
        );

        if enabled {
            // The credential window writes the password through the store
            self.reload_password();
            if !self.state.has_password() {
                debug!("No password stored, asking for one");
                self.request_credential_entry();
            }
        }

        self.parent.refresh_window();
    }

    pub fn set_auto_lock_enabled(&mut self, enabled: bool) {
        self.view.set_auto_lock_time_sensitive(enabled);
        self.persist(Field::AutoLockEnabled, Value::Bool(enabled));
        self.state.auto_lock_enabled = enabled;
    }

    /// Store a new auto-lock delay, pinned into 1-10 like the spin control
    pub fn set_auto_lock_minutes(&mut self, minutes: u32) {
        let minutes = adjust_auto_lock_minutes(minutes);
        self.persist(Field::AutoLockMinutes, Value::from(minutes));
        self.state.auto_lock_minutes = minutes;
    }

    /// Store a new refresh interval, pinned into 10-120 like the spin control
    pub fn set_refresh_seconds(&mut self, seconds: u32) {
        let seconds = adjust_refresh_seconds(seconds);
        self.persist(Field::RefreshSeconds, Value::from(seconds));
        self.state.refresh_seconds = seconds;
    }

    /// Open the credential window, or bring back the one already opened
    pub fn request_credential_entry(&mut self) {
        match self.credential_window.as_mut() {
            Some(window) => window.show(),
            None => {
                let window = self.credential_factory.create(Arc::clone(&self.store));
                self.credential_window = Some(window);
            }
        }
        self.reload_password();
    }

    /// Password button handler
    ///
    /// The button is only sensitive while password protection is on; returns
    /// whether the credential window was requested.
    pub fn change_password(&mut self) -> bool {
        if !self.affordances().password_entry_sensitive {
            info!("Password entry is disabled while password protection is off");
            return false;
        }
        self.request_credential_entry();
        true
    }

    /// Hide the panel, keeping it around for a later `show`
    ///
    /// Always returns `true` so the caller suppresses the default destroy.
    pub fn close(&mut self) -> bool {
        if self.visible {
            self.view.hide();
            self.visible = false;
            debug!("Settings panel hidden");
        }
        true
    }

    /// Re-surface a hidden panel with the values already in memory
    pub fn show(&mut self) {
        if !self.visible {
            self.view.present(&self.state);
            self.visible = true;
        }
    }

    /// Keyboard handler, returns whether the key was handled
    pub fn on_key_press(&mut self, code: Code) -> bool {
        match code {
            Code::Escape => self.close(),
            _ => false,
        }
    }

    fn persist(&self, field: Field, value: Value) {
        self.store.update(field.key(), value, field.section());
    }

    fn reload_password(&mut self) {
        self.state.password_hash = self.store.read_string(
            Field::LoginPassword.key(),
            Field::LoginPassword.section(),
        );
    }
}
