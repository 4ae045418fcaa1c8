use std::path::Path;

use anyhow::Context;

use crate::{
    assets::color::parse_color,
    foundation::{
        core::Rgba8,
        error::{BadgeError, BadgeResult},
    },
};

/// Side length of the square badge surface.
pub const DEFAULT_SURFACE_SIZE: u32 = 512;
/// Status text shown before the user types anything.
pub const DEFAULT_TEXT: &str = "#HIRING";
/// Accent color shown before the user picks one.
pub const DEFAULT_COLOR: &str = "#8b5cf6";
/// File name used when exporting the badge.
pub const DOWNLOAD_FILENAME: &str = "linkedin-badge.png";

/// Tunable constants of the badge layout.
///
/// Defaults reproduce the reference look. Text is measured at `measure_font_px`
/// but painted at the smaller `draw_font_px`, which leaves visible room between
/// glyphs; keep the two apart unless that look is meant to change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BadgeStyle {
    /// Gap between the surface edge and the avatar circle.
    pub inset_px: f64,
    /// Stroke width of the arc.
    pub arc_line_width: f64,
    pub measure_font_px: f32,
    pub draw_font_px: f32,
    /// Inter-character gap as a fraction of `measure_font_px`.
    pub letter_spacing_em: f64,
    /// Arc length reserved on each side of the glyph run.
    pub side_padding_px: f64,
    /// Extra arc length between the padding and the fade zone, per side.
    pub fade_padding_px: f64,
    /// Angular length of each fade zone.
    pub fade_length_rad: f64,
    /// Number of sub-segments per fade zone.
    pub fade_steps: u32,
    pub text_color: String,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            inset_px: 8.0,
            arc_line_width: 40.0,
            measure_font_px: 32.0,
            draw_font_px: 28.0,
            letter_spacing_em: 0.02,
            side_padding_px: 100.0,
            fade_padding_px: 30.0,
            fade_length_rad: 0.12,
            fade_steps: 60,
            text_color: "white".to_owned(),
        }
    }
}

impl BadgeStyle {
    pub fn from_json_str(json: &str) -> BadgeResult<Self> {
        let style: Self = serde_json::from_str(json)
            .map_err(|e| BadgeError::validation(format!("badge style JSON: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    pub fn from_path(path: &Path) -> BadgeResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read badge style '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> BadgeResult<()> {
        fn finite_non_negative(name: &str, v: f64) -> BadgeResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(BadgeError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }

        finite_non_negative("inset_px", self.inset_px)?;
        finite_non_negative("letter_spacing_em", self.letter_spacing_em)?;
        finite_non_negative("side_padding_px", self.side_padding_px)?;
        finite_non_negative("fade_padding_px", self.fade_padding_px)?;
        finite_non_negative("fade_length_rad", self.fade_length_rad)?;

        if !self.arc_line_width.is_finite() || self.arc_line_width <= 0.0 {
            return Err(BadgeError::validation(
                "arc_line_width must be finite and > 0",
            ));
        }
        for (name, px) in [
            ("measure_font_px", self.measure_font_px),
            ("draw_font_px", self.draw_font_px),
        ] {
            if !px.is_finite() || px <= 0.0 {
                return Err(BadgeError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.fade_steps < 2 {
            return Err(BadgeError::validation("fade_steps must be >= 2"));
        }
        parse_color(&self.text_color)?;
        Ok(())
    }

    /// Gap inserted between consecutive measured characters.
    pub fn spacing_px(&self) -> f64 {
        f64::from(self.measure_font_px) * self.letter_spacing_em
    }

    /// Arc length reserved around the text: both paddings on both sides.
    pub fn reserved_arc_length_px(&self) -> f64 {
        2.0 * (self.side_padding_px + self.fade_padding_px)
    }

    pub fn text_rgba(&self) -> BadgeResult<Rgba8> {
        parse_color(&self.text_color)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/badge/style.rs"]
mod tests;
