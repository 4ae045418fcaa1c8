//! The badge renderer: geometry, arc fades and curved glyph placement.

pub mod fade;
pub mod geometry;
pub mod glyphs;
pub mod render;
pub mod style;
