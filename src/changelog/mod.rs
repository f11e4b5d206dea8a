//! The changelog window model.
//!
//! A [`Changelog`] owns an append-only list of [`Section`]s (oldest first, so
//! a section's position is its version index) and decides whether the window
//! should be open by comparing the section count against the last version the
//! user acknowledged. The acknowledged version itself lives in a host-supplied
//! [`VersionStore`].
//!
//! ```
//! use whatsnew::changelog::Changelog;
//! use whatsnew::store::MemoryStore;
//!
//! # fn main() -> Result<(), whatsnew::changelog::ChangelogError> {
//! let mut changelog = Changelog::new("Changelog", MemoryStore::with_version(0));
//! changelog
//!     .start_section("1.0.0")
//!     .add_highlight("First release.", 0)?
//!     .add_entry("Everything is new.", 1)?;
//!
//! assert!(changelog.evaluate_open_state());
//! changelog.acknowledge();
//! assert!(!changelog.evaluate_open_state());
//! # Ok(())
//! # }
//! ```

mod entry;
mod error;

pub use entry::{Entry, Section};
pub use error::{ChangelogError, ExportError};

use crate::config::{Config, DEFAULT_HEADER_COLOR, DEFAULT_HIGHLIGHT_COLOR};
use crate::store::{FRESH_INSTALL_VERSION, FnStore, VersionStore};
use ratatui::style::Color;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Callback receiving exported section text.
pub type ExportHook = Box<dyn FnMut(&str) -> Result<(), ExportError>>;

/// Release notes window state.
pub struct Changelog {
    label: String,
    sections: Vec<Section>,
    header_color: Color,
    highlight_color: Color,
    force_open: bool,
    open: bool,
    last_version: usize,
    expanded_overrides: BTreeMap<usize, bool>,
    store: Box<dyn VersionStore>,
    export_hook: Option<ExportHook>,
}

impl Changelog {
    /// Create an empty changelog window backed by `store`.
    #[must_use]
    pub fn new(label: impl Into<String>, store: impl VersionStore + 'static) -> Self {
        Self {
            label: label.into(),
            sections: Vec::new(),
            header_color: DEFAULT_HEADER_COLOR,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            force_open: false,
            open: false,
            last_version: FRESH_INSTALL_VERSION,
            expanded_overrides: BTreeMap::new(),
            store: Box::new(store),
            export_hook: None,
        }
    }

    /// Create a changelog window from a getter/setter pair owned by the host.
    #[must_use]
    pub fn from_fns<G, S>(label: impl Into<String>, get: G, set: S) -> Self
    where
        G: Fn() -> usize + 'static,
        S: FnMut(usize) + 'static,
    {
        Self::new(label, FnStore::new(get, set))
    }

    /// Apply presentation settings.
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        self.label.clone_from(&config.label);
        self.header_color = config.header_color;
        self.highlight_color = config.highlight_color;
        self
    }

    /// Install a hook that receives exported section text.
    #[must_use]
    pub fn with_export_hook(mut self, hook: ExportHook) -> Self {
        self.export_hook = Some(hook);
        self
    }

    /// Start a new, empty section. Entries added afterwards belong to it.
    pub fn start_section(&mut self, title: impl Into<String>) -> &mut Self {
        self.sections.push(Section::new(title));
        self
    }

    /// Add an entry drawn in the configured highlight color.
    ///
    /// # Errors
    ///
    /// Returns [`ChangelogError::NoSection`] if no section has been started.
    pub fn add_highlight(
        &mut self,
        text: impl Into<String>,
        level: u16,
    ) -> Result<&mut Self, ChangelogError> {
        let color = self.highlight_color;
        self.push_entry(Entry::colored(text, level, color))
    }

    /// Add an entry drawn in an explicit color.
    ///
    /// # Errors
    ///
    /// Returns [`ChangelogError::NoSection`] if no section has been started.
    pub fn add_highlight_with(
        &mut self,
        text: impl Into<String>,
        level: u16,
        color: Color,
    ) -> Result<&mut Self, ChangelogError> {
        self.push_entry(Entry::colored(text, level, color))
    }

    /// Add an entry drawn in the ambient text color.
    ///
    /// # Errors
    ///
    /// Returns [`ChangelogError::NoSection`] if no section has been started.
    pub fn add_entry(
        &mut self,
        text: impl Into<String>,
        level: u16,
    ) -> Result<&mut Self, ChangelogError> {
        self.push_entry(Entry::plain(text, level))
    }

    fn push_entry(&mut self, entry: Entry) -> Result<&mut Self, ChangelogError> {
        let Some(section) = self.sections.last_mut() else {
            return Err(ChangelogError::NoSection { text: entry.text });
        };
        section.entries.push(entry);
        Ok(self)
    }

    /// Read the acknowledged version and decide whether the window is open.
    ///
    /// A fresh install is treated as having seen every section: the window
    /// stays closed and the current section count is recorded. Must run
    /// before [`Self::is_section_expanded`] is consulted for a frame.
    pub fn evaluate_open_state(&mut self) -> bool {
        let count = self.sections.len();
        self.last_version = self.store.last_version();

        if self.last_version == FRESH_INSTALL_VERSION {
            info!(count, "Fresh install, marking all changelog sections as seen");
            self.open = false;
            self.store.set_last_version(count);
            self.last_version = count;
        } else {
            self.open = self.force_open || self.last_version < count;
        }

        self.open
    }

    /// Mark every section as read and close the window.
    pub fn acknowledge(&mut self) {
        let count = self.sections.len();
        if self.last_version != count {
            debug!(from = self.last_version, to = count, "Acknowledging changelog");
            self.store.set_last_version(count);
            self.last_version = count;
        }
        self.force_open = false;
        self.open = false;
    }

    /// Whether a section's header opens by default: it is unseen or the newest.
    ///
    /// Indices past the last section are never forced.
    #[must_use]
    pub const fn is_section_forced(&self, index: usize) -> bool {
        let count = self.sections.len();
        index < count && (index >= self.last_version || index.saturating_add(1) == count)
    }

    /// Whether a section's entries are currently shown.
    #[must_use]
    pub fn is_section_expanded(&self, index: usize) -> bool {
        self.expanded_overrides
            .get(&index)
            .copied()
            .unwrap_or_else(|| self.is_section_forced(index))
    }

    /// Flip a section header between expanded and collapsed.
    pub fn toggle_section(&mut self, index: usize) {
        if index >= self.sections.len() {
            return;
        }
        let expanded = !self.is_section_expanded(index);
        self.expanded_overrides.insert(index, expanded);
    }

    /// Sections paired with their version index, newest first.
    pub fn sections_newest_first(&self) -> impl Iterator<Item = (usize, &Section)> + '_ {
        self.sections.iter().enumerate().rev()
    }

    /// Hand a section's markdown to the export hook.
    ///
    /// Failures (unknown section, missing hook, hook error) are discarded.
    pub fn export_section(&mut self, index: usize) {
        let Some(hook) = self.export_hook.as_mut() else {
            return;
        };
        let Some(section) = self.sections.get(index) else {
            return;
        };

        let text = section.to_markdown(chrono::Utc::now().timestamp());
        if let Err(e) = hook(&text) {
            debug!("Ignoring changelog export failure: {}", e);
        }
    }

    /// Window title.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Registered sections, oldest first.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of registered sections.
    #[must_use]
    pub const fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Whether the last evaluation (or acknowledgement) left the window open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Version read by the last evaluation.
    #[must_use]
    pub const fn last_version(&self) -> usize {
        self.last_version
    }

    /// Whether the host asked for the window to be shown regardless of version.
    #[must_use]
    pub const fn force_open(&self) -> bool {
        self.force_open
    }

    /// Ask for the window to be shown on the next evaluation.
    pub const fn set_force_open(&mut self, force_open: bool) {
        self.force_open = force_open;
    }

    /// Color of section headers.
    #[must_use]
    pub const fn header_color(&self) -> Color {
        self.header_color
    }

    /// Change the color of section headers.
    pub const fn set_header_color(&mut self, color: Color) {
        self.header_color = color;
    }

    /// Color applied by [`Self::add_highlight`].
    #[must_use]
    pub const fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    /// Change the color applied by subsequent [`Self::add_highlight`] calls.
    pub const fn set_highlight_color(&mut self, color: Color) {
        self.highlight_color = color;
    }
}

impl fmt::Debug for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Changelog")
            .field("label", &self.label)
            .field("sections", &self.sections)
            .field("header_color", &self.header_color)
            .field("highlight_color", &self.highlight_color)
            .field("force_open", &self.force_open)
            .field("open", &self.open)
            .field("last_version", &self.last_version)
            .field("expanded_overrides", &self.expanded_overrides)
            .field("export_hook", &self.export_hook.is_some())
            .finish_non_exhaustive()
    }
}
