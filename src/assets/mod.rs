//! Inputs the renderer consumes: decoded images, parsed colors and a resolved font.

pub mod color;
pub mod decode;
pub mod font;
