//! Durable preference storage contracts and adapters.

pub mod prefs;
