//! montog: entry point.
//!
//! Switches between named multi-monitor arrangements with one command.
//!
//! # Usage
//!
//! ```text
//! montog [OPTIONS] <COMMAND>
//!
//! Commands:
//!   list                      Print the arrangement names, in menu order
//!   switch <NAME> [--dry-run] Switch to an arrangement
//!   probe [--json]            Print the connected monitors
//!   about                     Print monitors and the active configuration
//!   init [--force]            Write the generated configuration to disk
//!   autostart <on|off|status> Manage the login autostart entry
//!   install <on|off|status>   Manage the application menu entry
//!
//! Options:
//!   --config <PATH>        Configuration file tried before the defaults
//!   --timeout-secs <SECS>  Upper bound on each xrandr call [default: 10]
//!   --xrandr <PROGRAM>     xrandr executable [default: xrandr]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Default  | Description                      |
//! |-----------------------|----------|----------------------------------|
//! | `MONTOG_CONFIG`       | (unset)  | Configuration file path          |
//! | `MONTOG_TIMEOUT_SECS` | `10`     | xrandr timeout (secs)            |
//! | `MONTOG_XRANDR`       | `xrandr` | xrandr executable                |
//! | `RUST_LOG`            | `info`   | Log filter (logs go to stderr)   |
//!
//! # Architecture overview
//!
//! ```text
//! montog (this binary)
//!   application/     switch use case, load-or-synthesize policy
//!   infrastructure/
//!     xrandr/        process runner + topology probe + display controller
//!     storage/       TOML document search path, init
//!     desktop/       autostart and menu entries
//!       ↓
//! montog-core        topology, configuration, resolver, xrandr codec
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use montog_core::synthesize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use montog::application::about::{AboutReport, MonitorTable};
use montog::application::switch_arrangement::SwitchArrangementUseCase;
use montog::application::topology::{probe_or_empty, TopologyProbe};
use montog::infrastructure::desktop::{DesktopEntry, EntryKind};
use montog::infrastructure::settings::{AppSettings, DEFAULT_XRANDR_PROGRAM};
use montog::infrastructure::storage::config::{
    render_document, search_paths, write_document, FileConfigStore,
};
use montog::infrastructure::xrandr::{ProcessRunner, Xrandr};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Monitor Toggle: quickly switch active monitor arrangement.
#[derive(Debug, Parser)]
#[command(name = "montog", version, about)]
struct Cli {
    /// Configuration file to try before the default locations.
    #[arg(long, global = true, env = "MONTOG_CONFIG")]
    config: Option<PathBuf>,

    /// Upper bound, in seconds, on each xrandr invocation. Must be at least 1.
    #[arg(
        long,
        global = true,
        default_value_t = 10,
        env = "MONTOG_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Name or path of the xrandr executable.
    #[arg(long, global = true, default_value = DEFAULT_XRANDR_PROGRAM, env = "MONTOG_XRANDR")]
    xrandr: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Print the arrangement names, one per line, in menu order.
    List,

    /// Switch to the named arrangement.
    Switch {
        /// Arrangement name as printed by `list`.
        name: String,

        /// Print the xrandr command instead of running it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the monitors xrandr reports.
    Probe {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the detected monitors and the active configuration.
    About,

    /// Write the configuration generated from the connected monitors to the
    /// first configuration path, ready for editing.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Start montog when the desktop session starts.
    Autostart {
        #[arg(value_enum)]
        action: Toggle,
    },

    /// Add montog to the application menu.
    Install {
        #[arg(value_enum)]
        action: Toggle,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Toggle {
    On,
    Off,
    Status,
}

impl Cli {
    /// Converts the global options into [`AppSettings`].
    fn settings(&self) -> AppSettings {
        AppSettings {
            search_paths: search_paths(self.config.clone()),
            timeout: Duration::from_secs(self.timeout_secs),
            xrandr_program: self.xrandr.clone(),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// Each invocation performs one action on a current-thread runtime; every
/// xrandr call is awaited before the next one starts.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries command output only, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings();
    run(cli.command, settings).await
}

async fn run(command: Command, settings: AppSettings) -> anyhow::Result<()> {
    let runner = Arc::new(ProcessRunner::new(settings.timeout));
    let xrandr = Arc::new(Xrandr::new(settings.xrandr_program, runner));
    let store = Arc::new(FileConfigStore::new(settings.search_paths));
    let use_case = SwitchArrangementUseCase::new(store.clone(), xrandr.clone(), xrandr.clone());

    match command {
        Command::List => {
            for name in use_case.arrangement_names().await {
                println!("{name}");
            }
        }

        Command::Switch { name, dry_run: true } => {
            let line = use_case
                .preview(&name)
                .await
                .with_context(|| format!("cannot switch to arrangement '{name}'"))?;
            println!("{line}");
        }

        Command::Switch { name, dry_run: false } => {
            use_case
                .switch(&name)
                .await
                .with_context(|| format!("cannot switch to arrangement '{name}'"))?;
            info!(arrangement = %name, "arrangement applied");
        }

        Command::Probe { json } => {
            let topology = xrandr
                .probe()
                .await
                .context("cannot query the display topology")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&topology)?);
            } else {
                print!("{}", MonitorTable(&topology));
            }
        }

        Command::About => {
            let config = use_case.configuration().await;
            let topology = probe_or_empty(xrandr.as_ref()).await;
            let document =
                render_document(&config).context("cannot render the configuration")?;
            print!("{}", AboutReport::new(topology, config.source, document));
        }

        Command::Init { force } => {
            let topology = xrandr
                .probe()
                .await
                .context("cannot query the display topology")?;
            let config = synthesize(&topology);
            let path = store.preferred_path()?;
            write_document(path, &config, force)?;
            println!("{}", path.display());
        }

        Command::Autostart { action } => toggle_entry(EntryKind::Autostart, action)?,

        Command::Install { action } => toggle_entry(EntryKind::Launcher, action)?,
    }

    Ok(())
}

/// Enables, disables or reports one desktop entry.
fn toggle_entry(kind: EntryKind, action: Toggle) -> anyhow::Result<()> {
    let exec = std::env::current_exe().context("cannot determine the montog executable path")?;
    let entry = DesktopEntry::for_kind(kind, &exec)?;
    let label = kind.label();
    let path = entry.path().display();

    match action {
        Toggle::On => {
            if entry.enable()? {
                println!("{label} enabled: {path}");
            } else {
                println!("{label} already enabled: {path}");
            }
        }
        Toggle::Off => {
            if entry.disable()? {
                println!("{label} disabled: {path}");
            } else {
                println!("{label} already disabled");
            }
        }
        Toggle::Status => {
            let state = if entry.is_present() { "enabled" } else { "disabled" };
            println!("{label}: {state} ({path})");
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    /// Declared default of the argument `id`, unaffected by `MONTOG_*`
    /// variables in the test environment.
    fn declared_default(id: &str) -> Option<String> {
        let command = Cli::command();
        let arg = command.get_arguments().find(|a| a.get_id().as_str() == id)?;
        arg.get_default_values()
            .first()
            .map(|v| v.to_string_lossy().into_owned())
    }

    #[test]
    fn test_cli_list_command() {
        let cli = Cli::parse_from(["montog", "list"]);
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn test_cli_switch_takes_name_with_spaces() {
        // Arrange / Act
        let cli = Cli::parse_from(["montog", "switch", "Desk and laptop"]);

        // Assert
        assert_eq!(
            cli.command,
            Command::Switch {
                name: "Desk and laptop".to_string(),
                dry_run: false
            }
        );
    }

    #[test]
    fn test_cli_switch_dry_run_flag() {
        let cli = Cli::parse_from(["montog", "switch", "--dry-run", "Desk"]);
        assert_eq!(
            cli.command,
            Command::Switch {
                name: "Desk".to_string(),
                dry_run: true
            }
        );
    }

    #[test]
    fn test_cli_switch_requires_name() {
        assert!(Cli::try_parse_from(["montog", "switch"]).is_err());
    }

    #[test]
    fn test_cli_probe_json_flag() {
        let cli = Cli::parse_from(["montog", "probe", "--json"]);
        assert_eq!(cli.command, Command::Probe { json: true });
    }

    #[test]
    fn test_cli_toggle_values() {
        let cli = Cli::parse_from(["montog", "autostart", "on"]);
        assert_eq!(cli.command, Command::Autostart { action: Toggle::On });

        let cli = Cli::parse_from(["montog", "install", "status"]);
        assert_eq!(cli.command, Command::Install { action: Toggle::Status });

        assert!(Cli::try_parse_from(["montog", "install", "maybe"]).is_err());
    }

    #[test]
    fn test_cli_defaults_produce_default_timeout() {
        // Arrange / Act
        let timeout = declared_default("timeout_secs");
        let xrandr = declared_default("xrandr");

        // Assert
        assert_eq!(timeout.as_deref(), Some("10"));
        assert_eq!(xrandr.as_deref(), Some(DEFAULT_XRANDR_PROGRAM));
        assert_eq!(AppSettings::default().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        // Arrange / Act
        let zero = Cli::try_parse_from(["montog", "--timeout-secs", "0", "list"]);
        let one = Cli::try_parse_from(["montog", "--timeout-secs", "1", "list"]);

        // Assert
        assert!(zero.is_err());
        assert_eq!(one.unwrap().settings().timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        // Arrange / Act
        let cli = Cli::parse_from([
            "montog",
            "switch",
            "Desk",
            "--config",
            "/tmp/m.toml",
            "--timeout-secs",
            "3",
        ]);
        let settings = cli.settings();

        // Assert
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.search_paths[0], PathBuf::from("/tmp/m.toml"));
    }

    #[test]
    fn test_settings_without_config_use_default_search_path() {
        // Arrange
        let cli = Cli {
            config: None,
            timeout_secs: 10,
            xrandr: DEFAULT_XRANDR_PROGRAM.to_string(),
            command: Command::List,
        };

        // Act
        let settings = cli.settings();

        // Assert
        assert_eq!(settings.search_paths, AppSettings::default().search_paths);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.xrandr_program, DEFAULT_XRANDR_PROGRAM);
    }
}
