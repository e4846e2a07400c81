// twofactor-settings - command-line front-end for the settings panel
// Each invocation opens the panel, applies one change and shows the result

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use twofactor_settings::constants::{
    AUTO_LOCK_MAX_MINUTES, AUTO_LOCK_MIN_MINUTES, REFRESH_MAX_SECONDS, REFRESH_MIN_SECONDS,
};
use twofactor_settings::{config, FileStore};

/// Settings panel of the two-factor authenticator
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Settings panel of the two-factor authenticator",
    long_about = "Settings panel of the two-factor authenticator.

Behavior:
  auto-lock            Lock the application after a period of inactivity
  auto-lock-minutes    Inactivity period before locking (1-10 minutes)
  refresh-seconds      Secret code generation time (10-120 seconds)

Account:
  login                Protect the application with a password
  password             Set or change the password

Settings are stored at:
  ~/.config/twofactor-settings/settings.toml (Linux)
  ~/Library/Application Support/twofactor-settings/settings.toml (macOS)

Override with --config or the TWOFACTOR_SETTINGS_CONFIG environment variable."
)]
struct Args {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current settings (default)
    Show {
        /// Print as TOML instead of the panel layout
        #[arg(long)]
        toml: bool,
    },
    /// Turn password protection on or off
    Login { state: Toggle },
    /// Turn auto-lock on or off
    AutoLock { state: Toggle },
    /// Set the auto-lock delay in minutes
    AutoLockMinutes {
        #[arg(value_parser = clap::value_parser!(u32)
            .range(i64::from(AUTO_LOCK_MIN_MINUTES)..=i64::from(AUTO_LOCK_MAX_MINUTES)))]
        minutes: u32,
    },
    /// Set the secret code generation time in seconds
    RefreshSeconds {
        #[arg(value_parser = clap::value_parser!(u32)
            .range(i64::from(REFRESH_MIN_SECONDS)..=i64::from(REFRESH_MAX_SECONDS)))]
        seconds: u32,
    },
    /// Set or change the password
    Password,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn enabled(self) -> bool {
        matches!(self, Toggle::On)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let path = config::resolve_config_path(args.config)?;
    let store = FileStore::open(&path)
        .with_context(|| format!("Failed to open settings at {}", path.display()))?;
    info!("Settings loaded from: {}", store.path().display());

    let command = args.command.unwrap_or(Command::Show { toml: false });
    if let Command::Show { toml: true } = command {
        let state = twofactor_settings::SettingsState::load(&store);
        print!(
            "{}",
            toml::to_string_pretty(&state).context("Failed to serialize settings")?
        );
        return Ok(());
    }

    let mut panel = twofactor_settings::open_terminal_panel(Arc::new(store));

    match command {
        Command::Show { .. } => return Ok(()),
        Command::Login { state } => panel.set_login_enabled(state.enabled()),
        Command::AutoLock { state } => panel.set_auto_lock_enabled(state.enabled()),
        Command::AutoLockMinutes { minutes } => panel.set_auto_lock_minutes(minutes),
        Command::RefreshSeconds { seconds } => panel.set_refresh_seconds(seconds),
        Command::Password => {
            if !panel.change_password() {
                anyhow::bail!(
                    "Password protection is off; run 'twofactor-settings login on' first"
                );
            }
        }
    }

    // Hide and re-surface so the panel reflects the change
    panel.close();
    println!();
    panel.show();

    Ok(())
}
