//! Embedded release notes derived from `CHANGELOG.md`.
//!
//! A build script extracts per-version sections from `CHANGELOG.md` and
//! embeds them in the binary, oldest first, so each section's position is its
//! version index.

use crate::changelog::{Changelog, ChangelogError};

/// A single release note bullet extracted from `CHANGELOG.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseNoteEntry {
    /// Bullet text with markdown emphasis removed.
    pub text: &'static str,
    /// Nesting depth of the bullet.
    pub level: u16,
    /// Whether the bullet was bold (or a `###` heading).
    pub highlight: bool,
}

/// A version section extracted from `CHANGELOG.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseNoteSection {
    /// Version string (for example, `0.3.0`).
    pub version: &'static str,
    /// Optional release date string (for example, `2026-10-12`).
    pub date: Option<&'static str>,
    /// Bullets in document order.
    pub entries: &'static [ReleaseNoteEntry],
}

impl ReleaseNoteSection {
    /// Header title shown in the changelog window.
    #[must_use]
    pub fn title(&self) -> String {
        self.date.map_or_else(
            || format!("Version {}", self.version),
            |date| format!("Version {} ({date})", self.version),
        )
    }
}

include!(concat!(env!("OUT_DIR"), "/release_notes.rs"));

/// Embedded sections, oldest first.
#[must_use]
pub const fn sections() -> &'static [ReleaseNoteSection] {
    RELEASE_NOTES
}

/// Register `sections` with `changelog`, in order.
///
/// # Errors
///
/// Never fails in practice: every entry is added after its section is
/// started. The error is propagated rather than unwrapped.
pub fn register_sections(
    changelog: &mut Changelog,
    sections: &[ReleaseNoteSection],
) -> Result<(), ChangelogError> {
    for section in sections {
        changelog.start_section(section.title());
        for entry in section.entries {
            if entry.highlight {
                changelog.add_highlight(entry.text, entry.level)?;
            } else {
                changelog.add_entry(entry.text, entry.level)?;
            }
        }
    }
    Ok(())
}

/// Register every embedded section with `changelog`.
///
/// # Errors
///
/// See [`register_sections`].
pub fn register(changelog: &mut Changelog) -> Result<(), ChangelogError> {
    register_sections(changelog, sections())
}
