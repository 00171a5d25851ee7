//! Browser palette adapters.

pub mod document_style;
