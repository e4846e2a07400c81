pub mod credential_prompt;
pub mod terminal;

pub use credential_prompt::PromptCredentialWindow;
pub use terminal::{TerminalParent, TerminalView};
