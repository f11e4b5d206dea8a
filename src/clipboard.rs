//! Clipboard export through the terminal's OSC 52 escape sequence.
//!
//! Works over SSH and inside tmux (with `set-clipboard on`) without linking a
//! platform clipboard library.

use crate::changelog::{ExportError, ExportHook};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::io::Write;

/// Largest payload terminals reliably accept in one OSC 52 sequence.
pub const MAX_PAYLOAD_BYTES: usize = 74_994;

/// Build the OSC 52 sequence that copies `text` to the system clipboard.
///
/// # Errors
///
/// Returns [`ExportError::Rejected`] if the encoded payload is too large.
pub fn osc52_sequence(text: &str) -> Result<String, ExportError> {
    let encoded = BASE64.encode(text.as_bytes());
    if encoded.len() > MAX_PAYLOAD_BYTES {
        return Err(ExportError::Rejected(format!(
            "payload of {} bytes exceeds {MAX_PAYLOAD_BYTES}",
            encoded.len()
        )));
    }
    Ok(format!("\x1b]52;c;{encoded}\x07"))
}

/// Write the copy sequence for `text` to `out`.
///
/// # Errors
///
/// Returns an error if the payload is too large or the write fails.
pub fn copy_to<W: Write>(out: &mut W, text: &str) -> Result<(), ExportError> {
    let sequence = osc52_sequence(text)?;
    out.write_all(sequence.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Export hook that copies to the clipboard via stdout.
#[must_use]
pub fn stdout_hook() -> ExportHook {
    Box::new(|text: &str| copy_to(&mut std::io::stdout().lock(), text))
}
