use serde::{Deserialize, Serialize};

/// System font stack used when no theme font is available.
pub const DEFAULT_FONT_FAMILY: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

/// Fully populated palette and font set for one frame.
///
/// Every field always holds a usable CSS value. Partial JSON input is filled
/// from [`Styles::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Styles {
    pub header_background: String,
    pub cell_background: String,
    pub selected_background: String,
    pub border_color: String,
    pub header_text_color: String,
    pub cell_text_color: String,
    /// CSS font shorthand for header labels
    pub header_font: String,
    /// CSS font shorthand for body cells
    pub cell_font: String,
}

impl Styles {
    pub fn header_font_for(family: &str) -> String {
        format!("600 13px {family}")
    }

    pub fn cell_font_for(family: &str) -> String {
        format!("13px {family}")
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header_background: "#F3F3F3".to_string(),
            cell_background: "#FFFFFF".to_string(),
            selected_background: "#CFD8E8".to_string(),
            border_color: "#CCCCCC".to_string(),
            header_text_color: "#595959".to_string(),
            cell_text_color: "#1F1F1F".to_string(),
            header_font: Self::header_font_for(DEFAULT_FONT_FAMILY),
            cell_font: Self::cell_font_for(DEFAULT_FONT_FAMILY),
        }
    }
}
