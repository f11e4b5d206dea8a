//! Error types for the changelog model.

use thiserror::Error;

/// Errors raised while registering release notes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangelogError {
    /// An entry was added before any section was started.
    #[error("cannot add entry {text:?}: no section has been started")]
    NoSection {
        /// Text of the rejected entry.
        text: String,
    },
}

/// Errors raised by an export hook.
///
/// These never escape [`Changelog::export_section`](super::Changelog::export_section);
/// they exist so hooks can use `?` internally.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing to the terminal failed.
    #[error("failed to write clipboard sequence: {0}")]
    Io(#[from] std::io::Error),
    /// The payload could not be handed to the clipboard.
    #[error("clipboard rejected the payload: {0}")]
    Rejected(String),
}
