use std::sync::Arc;

use crate::{
    assets::decode::SourceImage,
    badge::{
        fade::FadeRamp,
        geometry::{ArcSpan, BadgeGeometry, GlyphPlacement, badge_chars, place_glyphs},
        glyphs::GlyphSource,
        style::BadgeStyle,
    },
    foundation::{
        core::{Affine, Rgba8},
        error::{BadgeError, BadgeResult},
    },
    render::{
        convert::{affine_to_cpu, bezpath_to_cpu, color_to_cpu},
        surface::BadgeSurface,
    },
};

/// The three user inputs of a badge.
#[derive(Clone, Copy, Debug)]
pub struct BadgeInput<'a> {
    pub image: &'a SourceImage,
    pub text: &'a str,
    pub color: Rgba8,
}

/// Everything derived while laying out a badge, in surface coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BadgeLayout {
    pub geometry: BadgeGeometry,
    pub span: ArcSpan,
    /// One entry per uppercased character, whitespace included.
    pub glyphs: Vec<GlyphPlacement>,
    pub fade_steps: u32,
}

/// Measure `text` and derive the arc span and glyph placements without drawing.
pub fn layout_badge(
    size: u32,
    text: &str,
    style: &BadgeStyle,
    glyphs: &mut dyn GlyphSource,
) -> BadgeResult<BadgeLayout> {
    style.validate()?;
    let geometry = BadgeGeometry::new(size, style)?;

    let chars = badge_chars(text);
    let advances = chars
        .iter()
        .map(|ch| glyphs.advance(ch, style.measure_font_px))
        .collect::<BadgeResult<Vec<_>>>()?;
    let span = ArcSpan::from_advances(&advances, &geometry, style);
    tracing::debug!(
        chars = chars.len(),
        text_length_px = span.text_length_px,
        span_rad = span.span,
        "badge arc span"
    );

    Ok(BadgeLayout {
        glyphs: place_glyphs(&chars, &geometry, &span),
        geometry,
        span,
        fade_steps: style.fade_steps,
    })
}

/// Redraw the whole badge into `surface`.
///
/// Phases run in a fixed order: clear, circular image crop, solid arc, the two
/// fade zones, then one glyph per character along the arc. Nothing is cached
/// between calls, so identical inputs give identical pixels.
#[tracing::instrument(skip_all, fields(size = surface.size()))]
pub fn render_badge(
    surface: &mut BadgeSurface,
    input: &BadgeInput<'_>,
    style: &BadgeStyle,
    glyphs: &mut dyn GlyphSource,
) -> BadgeResult<BadgeLayout> {
    let layout = layout_badge(surface.size(), input.text, style, glyphs)?;
    let text_color = style.text_rgba()?;

    surface.clear();
    let side = surface.side_u16();
    let mut ctx = vello_cpu::RenderContext::new(side, side);

    draw_clipped_image(&mut ctx, &layout.geometry, input.image)?;
    draw_arc(&mut ctx, &layout, input.color);
    draw_glyphs(&mut ctx, &layout, style.draw_font_px, text_color, glyphs)?;

    ctx.flush();
    ctx.render_to_pixmap(surface.pixmap_mut());
    Ok(layout)
}

fn draw_clipped_image(
    ctx: &mut vello_cpu::RenderContext,
    geometry: &BadgeGeometry,
    image: &SourceImage,
) -> BadgeResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.push_clip_layer(&bezpath_to_cpu(&geometry.clip_path()));

    // Stretch to the full surface box; the clip trims it to the circle.
    let (w, h) = (f64::from(image.width), f64::from(image.height));
    ctx.set_transform(affine_to_cpu(Affine::scale_non_uniform(
        geometry.size / w,
        geometry.size / h,
    )));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(image_paint(image)?);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

    ctx.pop_layer();
    Ok(())
}

fn draw_arc(ctx: &mut vello_cpu::RenderContext, layout: &BadgeLayout, color: Rgba8) {
    let geometry = &layout.geometry;
    let span = &layout.span;

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_stroke(
        vello_cpu::kurbo::Stroke::new(geometry.arc_line_width)
            .with_caps(vello_cpu::kurbo::Cap::Butt),
    );
    ctx.set_paint(color_to_cpu(color));

    let solid = geometry.arc_path(span.solid_start(), span.solid_end());
    ctx.stroke_path(&bezpath_to_cpu(&solid));

    let ramps = [
        FadeRamp::rising(span.start, span.solid_start(), layout.fade_steps),
        FadeRamp::falling(span.solid_end(), span.end, layout.fade_steps),
    ];
    for ramp in &ramps {
        for seg in ramp.segments() {
            if seg.alpha <= 0.0 {
                continue;
            }
            let path = bezpath_to_cpu(&geometry.arc_path(seg.start_angle, seg.end_angle));
            if seg.alpha < 1.0 {
                ctx.push_opacity_layer(seg.alpha);
            }
            ctx.stroke_path(&path);
            if seg.alpha < 1.0 {
                ctx.pop_layer();
            }
        }
    }
}

fn draw_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    layout: &BadgeLayout,
    size_px: f32,
    color: Rgba8,
    glyphs: &mut dyn GlyphSource,
) -> BadgeResult<()> {
    for placement in &layout.glyphs {
        glyphs.fill_glyph(ctx, &placement.ch, size_px, placement.transform(), color)?;
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

fn image_paint(image: &SourceImage) -> BadgeResult<vello_cpu::Image> {
    let w: u16 = image
        .width
        .try_into()
        .map_err(|_| BadgeError::validation("image width exceeds u16"))?;
    let h: u16 = image
        .height
        .try_into()
        .map_err(|_| BadgeError::validation("image height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(image.width as usize * image.height as usize);
    for px in image.rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/badge/render.rs"]
mod tests;
