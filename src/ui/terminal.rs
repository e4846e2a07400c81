//! Terminal rendering of the settings panel

use crate::controller::{ParentContext, SettingsView};
use crate::settings_state::{Affordances, Field, SettingsState};
use crate::store::SettingsStore;
use std::sync::Arc;

/// Prints the panel to stdout
#[derive(Debug)]
pub struct TerminalView {
    affordances: Affordances,
    /// Number of times the panel has been printed
    presented: usize,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            affordances: Affordances {
                password_entry_sensitive: false,
                auto_lock_time_sensitive: false,
            },
            presented: 0,
        }
    }

    /// Title line of the next print, marked as updated after the first
    pub fn heading(&self) -> &'static str {
        if self.presented == 0 {
            "== Settings =="
        } else {
            "== Settings (updated) =="
        }
    }

    /// Render both pages, greying out insensitive controls with `-`
    pub fn render(&self, state: &SettingsState) -> String {
        let auto_lock_time = if self.affordances.auto_lock_time_sensitive {
            state.auto_lock_minutes.to_string()
        } else {
            format!("-{}-", state.auto_lock_minutes)
        };
        let password = match (
            self.affordances.password_entry_sensitive,
            state.has_password(),
        ) {
            (true, true) => "******",
            (true, false) => "(not set)",
            (false, _) => "-",
        };

        let mut out = String::new();
        out.push_str("Behavior\n");
        out.push_str(&format!(
            "  {} Auto-lock the application (m): {}\n",
            checkbox(state.auto_lock_enabled),
            auto_lock_time
        ));
        out.push_str(&format!(
            "      Secret code generation time (s): {}\n",
            state.refresh_seconds
        ));
        out.push_str("Account\n");
        out.push_str(&format!(
            "  {} Password protection: {}\n",
            checkbox(state.login_enabled),
            password
        ));
        out
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

impl SettingsView for TerminalView {
    fn present(&mut self, state: &SettingsState) {
        println!("{}", self.heading());
        print!("{}", self.render(state));
        self.presented += 1;
    }

    fn set_password_entry_sensitive(&mut self, sensitive: bool) {
        log::debug!("Password entry sensitive: {}", sensitive);
        self.affordances.password_entry_sensitive = sensitive;
    }

    fn set_auto_lock_time_sensitive(&mut self, sensitive: bool) {
        log::debug!("Auto-lock time sensitive: {}", sensitive);
        self.affordances.auto_lock_time_sensitive = sensitive;
    }

    fn hide(&mut self) {
        log::debug!("Settings panel closed");
    }
}

/// Main window stand-in: reports the lock state it would switch to
pub struct TerminalParent {
    store: Arc<dyn SettingsStore>,
}

impl TerminalParent {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }
}

impl ParentContext for TerminalParent {
    fn refresh_window(&mut self) {
        let locked = self
            .store
            .read_bool(Field::LoginEnabled.key(), Field::LoginEnabled.section());
        let has_password = !self
            .store
            .read_string(Field::LoginPassword.key(), Field::LoginPassword.section())
            .is_empty();

        if locked && has_password {
            log::info!("Main window will ask for the password on next start");
        } else if locked {
            log::warn!("Password protection is on but no password is stored");
        } else {
            log::info!("Main window opens without a password");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn state() -> SettingsState {
        SettingsState::load(&MemoryStore::new())
    }

    #[test]
    fn test_render_insensitive_controls() {
        let view = TerminalView::new();
        let out = view.render(&state());

        assert!(out.contains("[ ] Auto-lock the application (m): -3-"));
        assert!(out.contains("Secret code generation time (s): 30"));
        assert!(out.contains("[ ] Password protection: -"));
    }

    #[test]
    fn test_render_follows_sensitivity() {
        let mut view = TerminalView::new();
        view.set_password_entry_sensitive(true);
        view.set_auto_lock_time_sensitive(true);

        let mut state = state();
        state.login_enabled = true;
        state.auto_lock_enabled = true;
        let out = view.render(&state);
        assert!(out.contains("[x] Auto-lock the application (m): 3"));
        assert!(out.contains("[x] Password protection: (not set)"));

        state.password_hash = "abc".to_string();
        assert!(view.render(&state).contains("Password protection: ******"));
    }

    #[test]
    fn test_reshown_panel_is_labelled_updated() {
        let mut view = TerminalView::new();
        assert_eq!(view.heading(), "== Settings ==");

        view.present(&state());
        assert_eq!(view.heading(), "== Settings (updated) ==");

        view.hide();
        view.present(&state());
        assert_eq!(view.heading(), "== Settings (updated) ==");
    }
}
