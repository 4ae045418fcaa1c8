use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::Shape as _;

use crate::{
    badge::style::BadgeStyle,
    foundation::{
        core::{Affine, BezPath, Point, Vec2},
        error::{BadgeError, BadgeResult},
    },
};

/// Flattening tolerance for circles and arcs, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Circle layout of a square badge surface.
///
/// Angles everywhere follow the raster convention: 0 points along +x and
/// angles grow toward +y, so `π/2` is the bottom of the circle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BadgeGeometry {
    pub size: f64,
    pub radius: f64,
    pub center: Point,
    /// Radius of the circular avatar crop.
    pub clip_radius: f64,
    /// Radius of the arc's center line.
    pub arc_radius: f64,
    pub arc_line_width: f64,
}

impl BadgeGeometry {
    pub fn new(size: u32, style: &BadgeStyle) -> BadgeResult<Self> {
        let size = f64::from(size);
        let radius = size / 2.0;
        let clip_radius = radius - style.inset_px;
        let arc_radius = clip_radius - style.arc_line_width / 2.0;
        if clip_radius <= 0.0 || arc_radius <= 0.0 {
            return Err(BadgeError::validation(format!(
                "surface size {size} leaves no room for the arc (arc radius {arc_radius})"
            )));
        }

        Ok(Self {
            size,
            radius,
            center: Point::new(radius, radius),
            clip_radius,
            arc_radius,
            arc_line_width: style.arc_line_width,
        })
    }

    pub fn point_at(&self, angle: f64, radius: f64) -> Point {
        self.center + Vec2::from_angle(angle) * radius
    }

    pub fn clip_path(&self) -> BezPath {
        kurbo::Circle::new(self.center, self.clip_radius).to_path(PATH_TOLERANCE)
    }

    /// Open arc along the arc center line, swept clockwise from `from` to `to`.
    pub fn arc_path(&self, from: f64, to: f64) -> BezPath {
        kurbo::Arc {
            center: self.center,
            radii: Vec2::new(self.arc_radius, self.arc_radius),
            start_angle: from,
            sweep_angle: clockwise_sweep(from, to),
            x_rotation: 0.0,
        }
        .to_path(PATH_TOLERANCE)
    }
}

/// Sweep of a clockwise arc from `from` to `to`.
///
/// A reversed range wraps around the circle and anything of a full turn or
/// more is clamped to exactly one turn.
pub fn clockwise_sweep(from: f64, to: f64) -> f64 {
    let d = to - from;
    if d >= TAU {
        TAU
    } else if d < 0.0 {
        d.rem_euclid(TAU)
    } else {
        d
    }
}

/// Angular extent of the decorated arc, centered on the bottom of the circle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArcSpan {
    /// Measured advances plus inter-character spacing.
    pub text_length_px: f64,
    /// Text length plus both paddings on both sides.
    pub total_length_px: f64,
    /// `total_length_px / arc_radius`.
    pub span: f64,
    pub start: f64,
    pub end: f64,
    pub fade_length: f64,
}

impl ArcSpan {
    /// Build from per-character advances measured at the measuring font size.
    pub fn from_advances(advances: &[f64], geometry: &BadgeGeometry, style: &BadgeStyle) -> Self {
        let gaps = advances.len().saturating_sub(1) as f64;
        let text_length_px = advances.iter().sum::<f64>() + gaps * style.spacing_px();
        let total_length_px = text_length_px + style.reserved_arc_length_px();
        let span = total_length_px / geometry.arc_radius;

        Self {
            text_length_px,
            total_length_px,
            span,
            start: FRAC_PI_2 - span / 2.0,
            end: FRAC_PI_2 + span / 2.0,
            fade_length: style.fade_length_rad,
        }
    }

    pub fn solid_start(&self) -> f64 {
        self.start + self.fade_length
    }

    pub fn solid_end(&self) -> f64 {
        self.end - self.fade_length
    }

    /// Angle of the `index`-th of `count` glyphs; reading order runs from `end`
    /// back toward `start`. `None` for an empty run.
    pub fn char_angle(&self, index: usize, count: usize) -> Option<f64> {
        if count == 0 {
            return None;
        }
        let per_char = self.span / count as f64;
        Some(self.end - (index as f64 + 0.5) * per_char)
    }
}

/// Where one glyph sits on the arc.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GlyphPlacement {
    pub index: usize,
    pub ch: String,
    pub angle: f64,
    pub position: Point,
    /// Rotation applied around `position` so the glyph's up points away from the center.
    pub rotation: f64,
}

impl GlyphPlacement {
    pub fn transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2()) * Affine::rotate(self.rotation)
    }
}

pub fn place_glyphs(
    chars: &[String],
    geometry: &BadgeGeometry,
    span: &ArcSpan,
) -> Vec<GlyphPlacement> {
    let count = chars.len();
    chars
        .iter()
        .enumerate()
        .filter_map(|(index, ch)| {
            let angle = span.char_angle(index, count)?;
            Some(GlyphPlacement {
                index,
                ch: ch.clone(),
                angle,
                position: geometry.point_at(angle, geometry.arc_radius),
                rotation: angle - FRAC_PI_2,
            })
        })
        .collect()
}

/// Uppercase `text` and split it into one string per character.
///
/// A character is a Unicode scalar value, so an astral-plane symbol such as an
/// emoji is one glyph rather than two UTF-16 code units.
pub fn badge_chars(text: &str) -> Vec<String> {
    text.to_uppercase().chars().map(String::from).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/badge/geometry.rs"]
mod tests;
