//! arcbadge renders profile photo badges: a circular crop of an avatar with a
//! colored, softly faded arc along the bottom carrying a short status text.
//!
//! # Pipeline overview
//!
//! 1. **Inputs**: decode the avatar ([`decode_image`]), parse the accent color
//!    ([`parse_color`]) and resolve a bold sans-serif font ([`BadgeFont`]).
//! 2. **Layout**: measure the uppercased text and derive the arc span and glyph
//!    placements ([`layout_badge`]).
//! 3. **Render**: draw crop, arc, fades and glyphs into a [`BadgeSurface`]
//!    ([`render_badge`]) and export it as PNG.
//!
//! [`BadgeEditor`] wraps the three inputs and re-renders whenever one changes.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs give identical pixels.
//! - **No IO in the renderer**: files are read and written only at the edges.
#![forbid(unsafe_code)]

mod assets;
mod badge;
mod editor;
mod foundation;
mod render;

pub use assets::color::parse_color;
pub use assets::decode::{SourceImage, decode_image, load_image};
pub use assets::font::{BadgeFont, TextBrushRgba8};
pub use badge::fade::{FadeRamp, FadeSegment, cosine_ease};
pub use badge::geometry::{
    ArcSpan, BadgeGeometry, GlyphPlacement, badge_chars, clockwise_sweep, place_glyphs,
};
pub use badge::glyphs::GlyphSource;
pub use badge::render::{BadgeInput, BadgeLayout, layout_badge, render_badge};
pub use badge::style::{
    BadgeStyle, DEFAULT_COLOR, DEFAULT_SURFACE_SIZE, DEFAULT_TEXT, DOWNLOAD_FILENAME,
};
pub use editor::BadgeEditor;
pub use foundation::core::{Affine, BezPath, Point, Rgba8, Vec2};
pub use foundation::error::{BadgeError, BadgeResult};
pub use render::surface::BadgeSurface;

/// Raster backend, re-exported for [`GlyphSource`] implementors.
pub use vello_cpu;
