//! Theme palette model and the document-level presentation port.
//!
//! A palette always maps onto the same fixed set of presentation variables. Sinks must set every
//! variable in that set on each call, so applying a palette fully overwrites the previous one.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Presentation variable names written by every [`PaletteSink::apply_palette`] call, in order.
pub const PALETTE_VARIABLE_NAMES: [&str; 5] = [
    "--background-color",
    "--main-color",
    "--secondary-color",
    "--border-color",
    "--card-color",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Color values for one named theme.
pub struct ThemePalette {
    /// Page background.
    pub background_color: String,
    /// Primary text and accent color.
    pub main_color: String,
    /// Secondary text color.
    pub secondary_color: String,
    /// Border and divider color.
    pub border_color: String,
    /// Raised card surface color.
    pub card_color: String,
}

impl ThemePalette {
    /// Returns every presentation variable paired with its value, in [`PALETTE_VARIABLE_NAMES`]
    /// order.
    pub fn variables(&self) -> [(&'static str, &str); 5] {
        [
            (PALETTE_VARIABLE_NAMES[0], self.background_color.as_str()),
            (PALETTE_VARIABLE_NAMES[1], self.main_color.as_str()),
            (PALETTE_VARIABLE_NAMES[2], self.secondary_color.as_str()),
            (PALETTE_VARIABLE_NAMES[3], self.border_color.as_str()),
            (PALETTE_VARIABLE_NAMES[4], self.card_color.as_str()),
        ]
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported while writing presentation variables.
pub enum PaletteSinkError {
    /// No document scope is reachable on the active host.
    #[error("document scope unavailable")]
    Unavailable,
    /// The host rejected one variable write.
    #[error("setting {variable} failed: {message}")]
    Rejected {
        /// Variable that could not be written.
        variable: &'static str,
        /// Host-provided detail.
        message: String,
    },
}

/// Host service that writes a palette into global presentation state.
pub trait PaletteSink {
    /// Sets every variable of [`PALETTE_VARIABLE_NAMES`] from `palette`.
    ///
    /// # Errors
    ///
    /// Returns an error when the document scope is unavailable or a write is rejected.
    fn apply_palette(&self, palette: &ThemePalette) -> Result<(), PaletteSinkError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op palette sink for hosts without a document.
pub struct NoopPaletteSink;

impl PaletteSink for NoopPaletteSink {
    fn apply_palette(&self, _palette: &ThemePalette) -> Result<(), PaletteSinkError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory palette sink that records the current variable values.
pub struct MemoryPaletteSink {
    variables: Rc<RefCell<BTreeMap<String, String>>>,
    applied: Rc<RefCell<usize>>,
}

impl MemoryPaletteSink {
    /// Returns the current value of a presentation variable.
    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables.borrow().get(name).cloned()
    }

    /// Returns a copy of every variable currently set.
    pub fn variables(&self) -> BTreeMap<String, String> {
        self.variables.borrow().clone()
    }

    /// Returns how many palettes have been applied.
    pub fn applied_count(&self) -> usize {
        *self.applied.borrow()
    }
}

impl PaletteSink for MemoryPaletteSink {
    fn apply_palette(&self, palette: &ThemePalette) -> Result<(), PaletteSinkError> {
        let mut variables = self.variables.borrow_mut();
        for (name, value) in palette.variables() {
            variables.insert(name.to_string(), value.to_string());
        }
        *self.applied.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn palette(seed: &str) -> ThemePalette {
        ThemePalette {
            background_color: format!("{seed}-bg"),
            main_color: format!("{seed}-main"),
            secondary_color: format!("{seed}-secondary"),
            border_color: format!("{seed}-border"),
            card_color: format!("{seed}-card"),
        }
    }

    #[test]
    fn variables_cover_the_fixed_name_set_in_order() {
        let names: Vec<&str> = palette("a").variables().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, PALETTE_VARIABLE_NAMES.to_vec());
    }

    #[test]
    fn memory_sink_overwrites_every_variable() {
        let sink = MemoryPaletteSink::default();
        sink.apply_palette(&palette("a")).expect("apply a");
        sink.apply_palette(&palette("b")).expect("apply b");

        let variables = sink.variables();
        assert_eq!(variables.len(), PALETTE_VARIABLE_NAMES.len());
        assert!(variables.values().all(|value| value.starts_with("b-")));
        assert_eq!(sink.variable("--card-color"), Some("b-card".to_string()));
        assert_eq!(sink.applied_count(), 2);
    }

    #[test]
    fn palette_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(palette("x")).expect("serialize");
        assert_eq!(value["backgroundColor"], "x-bg");
        assert_eq!(value["cardColor"], "x-card");
    }
}
