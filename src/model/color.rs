//! Task bar colors.
//!
//! A color is kept as the text the user chose (a CSS color name, a hex string
//! or a functional CSS color) together with the resolved value used for
//! painting, so the file format round-trips exactly what was entered.

use egui::Color32;

use crate::error::ValidationError;

/// Preset colors offered in the form's dropdown.
pub const PRESET_COLORS: &[&str] = &[
    "skyblue",
    "lightgreen",
    "lightcoral",
    "lightyellow",
    "plum",
    "lightsalmon",
];

/// A validated task color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskColor {
    text: String,
    rgb: Color32,
}

impl TaskColor {
    /// Parse any CSS color: a name (case-insensitive), `#rgb`, `#rrggbb`, or
    /// an `rgb()`/`hsl()` form. The text is kept as typed, minus surrounding
    /// whitespace.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::UnknownColor(input.to_string()));
        }
        let parsed = trimmed
            .parse::<css_color_parser2::Color>()
            .map_err(|_| ValidationError::UnknownColor(input.to_string()))?;
        let alpha = (parsed.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        Ok(Self {
            text: trimmed.to_string(),
            rgb: Color32::from_rgba_unmultiplied(parsed.r, parsed.g, parsed.b, alpha),
        })
    }

    /// A custom color picked from the color chooser, stored as `#rrggbb`.
    pub fn from_rgb(rgb: Color32) -> Self {
        let [r, g, b, _] = rgb.to_array();
        Self {
            text: format!("#{:02x}{:02x}{:02x}", r, g, b),
            rgb: Color32::from_rgb(r, g, b),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn rgb(&self) -> Color32 {
        self.rgb
    }

    /// Pick black or white text for a label drawn over this color.
    pub fn contrast_text(&self) -> Color32 {
        let [r, g, b, _] = self.rgb.to_array();
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        if luma > 150.0 {
            Color32::from_rgb(20, 20, 28)
        } else {
            Color32::WHITE
        }
    }
}

impl Default for TaskColor {
    fn default() -> Self {
        Self {
            text: PRESET_COLORS[0].to_string(),
            rgb: Color32::from_rgb(135, 206, 235),
        }
    }
}
