use crate::foundation::{
    core::{Affine, Rgba8},
    error::BadgeResult,
};

/// Measures and paints single characters for the curved text run.
///
/// [`crate::BadgeFont`] is the real implementation. `advance` must be a pure
/// function of its arguments for renders to be repeatable.
pub trait GlyphSource {
    /// Horizontal advance of `ch` at `size_px`.
    fn advance(&mut self, ch: &str, size_px: f32) -> BadgeResult<f64>;

    /// Paint `ch` centered on the origin of `transform`.
    fn fill_glyph(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        ch: &str,
        size_px: f32,
        transform: Affine,
        color: Rgba8,
    ) -> BadgeResult<()>;
}
