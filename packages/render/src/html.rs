//! Standalone HTML output for [`MapDocument`]s.
//!
//! The page loads Leaflet and its heat and fullscreen plugins from a CDN and
//! draws the document, which is embedded as JSON, with a small script.

use std::path::Path;

use crate::RenderError;
use crate::document::MapDocument;

const TEMPLATE: &str = include_str!("../assets/map.html");
const TITLE_PLACEHOLDER: &str = "{{TITLE}}";
const DOCUMENT_PLACEHOLDER: &str = "{{DOCUMENT}}";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keeps embedded JSON from closing the surrounding script element.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

impl MapDocument {
    /// Renders the document as a self-contained HTML page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if the document fails to serialize.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let json = escape_script(&self.to_json()?);
        Ok(TEMPLATE
            .replace(TITLE_PLACEHOLDER, &escape_html(&self.title))
            .replace(DOCUMENT_PLACEHOLDER, &json))
    }

    /// Writes the HTML page to `path`.
    ///
    /// # Errors
    ///
    /// * If the document fails to serialize
    /// * If the file cannot be written
    pub fn write_html(&self, path: &Path) -> Result<(), RenderError> {
        let html = self.to_html()?;
        std::fs::write(path, html)?;
        log::info!("Wrote map to {}", path.display());
        Ok(())
    }
}
