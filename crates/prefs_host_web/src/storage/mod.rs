//! Browser preference storage adapters.

pub mod local_prefs;
