//! whatsnew - changelog window for terminal applications
//!
//! Shows versioned release notes inside a ratatui host, remembers the last
//! version the user acknowledged through a host-supplied store, and opens by
//! itself when there is something new to read.

pub mod app;
pub mod changelog;
pub mod clipboard;
pub mod config;
pub mod release_notes;
pub mod store;
pub mod tui;
pub mod view;

pub use app::App;
pub use changelog::{Changelog, ChangelogError, Entry, Section};
pub use config::Config;
pub use store::{FRESH_INSTALL_VERSION, FnStore, MemoryStore, SettingsStore, VersionStore};
