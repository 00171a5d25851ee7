//! Browser (`wasm32`) implementations of [`prefs_host`] service contracts.
//!
//! `storage` persists preference records in `window.localStorage`; `palette` writes theme
//! variables onto the document element's inline style. Off `wasm32` both adapters degrade to
//! empty reads and successful no-op writes so native tests can link against them.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod palette;
pub mod storage;

pub use adapters::{
    build_preferences_host, host_strategy_name, palette_sink, prefs_store,
    selected_host_strategy, PaletteSinkAdapter, PrefsStoreAdapter,
};
pub use palette::document_style::WebPaletteSink;
pub use storage::local_prefs::WebPrefsStore;
