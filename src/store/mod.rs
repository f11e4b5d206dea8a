//! Persistence seam for the last acknowledged version.
//!
//! The changelog never owns its persisted state. Hosts hand it a
//! [`VersionStore`], either one of the stores here or a pair of closures via
//! [`FnStore`].

mod settings;

pub use settings::{SETTINGS_PATH_ENV, Settings, SettingsStore};

use std::fmt;

/// Sentinel meaning "no version has ever been recorded".
pub const FRESH_INSTALL_VERSION: usize = usize::MAX;

/// Read/write access to the number of sections the user has acknowledged.
pub trait VersionStore {
    /// Current last acknowledged version, or [`FRESH_INSTALL_VERSION`].
    fn last_version(&self) -> usize;

    /// Persist a new last acknowledged version.
    fn set_last_version(&mut self, version: usize);
}

/// Store backed by a getter and a setter closure supplied by the host.
pub struct FnStore<G, S> {
    get: G,
    set: S,
}

impl<G, S> FnStore<G, S>
where
    G: Fn() -> usize,
    S: FnMut(usize),
{
    /// Wrap an accessor pair.
    #[must_use]
    pub const fn new(get: G, set: S) -> Self {
        Self { get, set }
    }
}

impl<G, S> VersionStore for FnStore<G, S>
where
    G: Fn() -> usize,
    S: FnMut(usize),
{
    fn last_version(&self) -> usize {
        (self.get)()
    }

    fn set_last_version(&mut self, version: usize) {
        (self.set)(version);
    }
}

impl<G, S> fmt::Debug for FnStore<G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStore").finish_non_exhaustive()
    }
}

/// Process-local store, mostly useful for tests and previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStore {
    version: usize,
}

impl MemoryStore {
    /// Start from a fresh install.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            version: FRESH_INSTALL_VERSION,
        }
    }

    /// Start from a known version.
    #[must_use]
    pub const fn with_version(version: usize) -> Self {
        Self { version }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionStore for MemoryStore {
    fn last_version(&self) -> usize {
        self.version
    }

    fn set_last_version(&mut self, version: usize) {
        self.version = version;
    }
}
