//! Shared host-bundle model for runtime composition.

use std::rc::Rc;

use crate::{PaletteSink, PrefsStore};

/// Stable host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed `localStorage` and document-style adapters.
    Browser,
    /// No-op adapters for headless builds and tests.
    Stub,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Stub => "stub",
        }
    }
}

/// Runtime-selected host service bundle injected into the preference runtime.
///
/// Environment-specific adapter selection happens before this bundle reaches
/// `prefs_runtime`, so the runtime never names a concrete storage or document backend.
#[derive(Clone)]
pub struct PreferencesHost {
    /// Durable key/value preference storage.
    pub prefs: Rc<dyn PrefsStore>,
    /// Document-level palette writer.
    pub palette: Rc<dyn PaletteSink>,
    /// Strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl PreferencesHost {
    /// Builds a bundle from explicit adapters.
    pub fn new(
        prefs: Rc<dyn PrefsStore>,
        palette: Rc<dyn PaletteSink>,
        host_strategy: HostStrategy,
    ) -> Self {
        Self {
            prefs,
            palette,
            host_strategy,
        }
    }
}

impl std::fmt::Debug for PreferencesHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferencesHost")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
