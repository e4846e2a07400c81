// Library interface for the two-factor settings panel
// This allows tests and the CLI to access the crate's functionality

pub mod auth;
pub mod config;
pub mod constants;
pub mod controller;
pub mod settings_state;
pub mod store;
pub mod ui;

pub use controller::{
    CredentialWindow, CredentialWindowFactory, ParentContext, SettingsController, SettingsView,
};
pub use settings_state::{Affordances, Field, SettingsState};
pub use store::{FileStore, MemoryStore, SettingsStore, Value};

use std::sync::Arc;

/// Build a settings panel wired to the terminal adapters
pub fn open_terminal_panel(store: Arc<dyn SettingsStore>) -> SettingsController {
    let factory = |store: Arc<dyn SettingsStore>| -> Box<dyn CredentialWindow> {
        Box::new(ui::PromptCredentialWindow::open(store))
    };

    SettingsController::new(
        Box::new(ui::TerminalParent::new(Arc::clone(&store))),
        store,
        Box::new(ui::TerminalView::new()),
        Box::new(factory),
    )
}
