//! Typed host-domain contracts shared by the preference runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services used by the preference store:
//! durable key/value preference storage, document-level palette application, and time helpers.
//! Concrete browser adapters live in `prefs_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod palette;
pub mod storage;
pub mod time;

pub use host::{HostStrategy, PreferencesHost};
pub use palette::{
    MemoryPaletteSink, NoopPaletteSink, PaletteSink, PaletteSinkError, ThemePalette,
    PALETTE_VARIABLE_NAMES,
};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
    PrefsStoreError,
};
pub use time::unix_time_ms_now;
