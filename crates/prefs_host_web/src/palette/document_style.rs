//! Palette sink that writes CSS custom properties on `document.documentElement`.

use prefs_host::{PaletteSink, PaletteSinkError, ThemePalette};

#[derive(Debug, Clone, Copy, Default)]
/// Browser palette sink targeting the root element's inline style.
pub struct WebPaletteSink;

impl PaletteSink for WebPaletteSink {
    fn apply_palette(&self, palette: &ThemePalette) -> Result<(), PaletteSinkError> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;

            let root = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element())
                .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
                .ok_or(PaletteSinkError::Unavailable)?;
            let style = root.style();
            for (variable, value) in palette.variables() {
                style
                    .set_property(variable, value)
                    .map_err(|e| PaletteSinkError::Rejected {
                        variable,
                        message: format!("{e:?}"),
                    })?;
            }
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = palette;
            Ok(())
        }
    }
}
