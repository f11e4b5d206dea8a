//! whatsnew - demo host for the changelog window

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use whatsnew::store::{Settings, SettingsStore};
use whatsnew::{App, Changelog, release_notes};

/// Demo host for the changelog window
#[derive(Parser)]
#[command(name = "whatsnew")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file holding the last acknowledged version
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Show the changelog even if everything has been read
    #[arg(long)]
    force: bool,

    /// Forget the acknowledged version before starting
    #[arg(long)]
    fresh: bool,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_rate: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Forget the acknowledged version so the next launch acts like a fresh install
    Reset,
    /// Print release notes as chat-friendly markdown
    Export {
        /// Version index to export (0 = oldest); all versions if omitted
        #[arg(long)]
        version: Option<usize>,
    },
}

fn main() -> Result<()> {
    let log_path = std::env::temp_dir().join("whatsnew.log");
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    // Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), "whatsnew.log");
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let settings_path = cli.settings.clone().unwrap_or_else(Settings::default_path);
    let mut store = SettingsStore::open(settings_path);

    match cli.command {
        Some(Commands::Reset) => cmd_reset(&mut store),
        Some(Commands::Export { version }) => cmd_export(store, version),
        None => {
            if cli.fresh {
                store
                    .reset()
                    .with_context(|| format!("Failed to reset {}", store.path().display()))?;
            }

            let mut changelog = build_changelog(store)?;
            changelog.set_force_open(cli.force);

            whatsnew::tui::run(App::new(changelog), cli.tick_rate)
        }
    }
}

fn build_changelog(store: SettingsStore) -> Result<Changelog> {
    let config = store.settings().config.clone();
    let mut changelog = Changelog::new(config.label.clone(), store).with_config(&config);

    #[cfg(debug_assertions)]
    {
        changelog = changelog.with_export_hook(whatsnew::clipboard::stdout_hook());
    }

    release_notes::register(&mut changelog).context("Failed to register release notes")?;
    Ok(changelog)
}

fn cmd_reset(store: &mut SettingsStore) -> Result<()> {
    store
        .reset()
        .with_context(|| format!("Failed to reset {}", store.path().display()))?;
    println!("Reset complete. The next launch behaves like a fresh install.");
    Ok(())
}

fn cmd_export(store: SettingsStore, version: Option<usize>) -> Result<()> {
    let changelog = build_changelog(store)?;
    let timestamp = chrono::Utc::now().timestamp();

    match version {
        Some(index) => {
            let Some(section) = changelog.sections().get(index) else {
                bail!(
                    "No release notes for version index {index} ({} available)",
                    changelog.section_count()
                );
            };
            print!("{}", section.to_markdown(timestamp));
        }
        None => {
            for (_, section) in changelog.sections_newest_first() {
                println!("{}", section.to_markdown(timestamp));
            }
        }
    }

    Ok(())
}
