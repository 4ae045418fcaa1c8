use std::{borrow::Cow, path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    badge::glyphs::GlyphSource,
    foundation::{
        core::{Affine, Rgba8},
        error::{BadgeError, BadgeResult},
    },
    render::convert::affine_to_cpu,
};

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Generic families tried when the database has no `sans-serif` alias configured.
const SANS_FALLBACK_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Arial",
];

/// A single font face used for both measuring and painting badge glyphs.
///
/// Text is shaped with Parley against this face's family, always at bold weight;
/// glyph outlines are painted through `vello_cpu` glyph runs.
pub struct BadgeFont {
    font_bytes: Arc<Vec<u8>>,
    family_name: String,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl std::fmt::Debug for BadgeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeFont")
            .field("family_name", &self.family_name)
            .field("font_bytes_len", &self.font_bytes.len())
            .finish()
    }
}

impl BadgeFont {
    /// Use a font file (TTF/OTF, first face of a collection).
    pub fn from_bytes(font_bytes: Vec<u8>) -> BadgeResult<Self> {
        Self::from_face(font_bytes, 0, None)
    }

    pub fn from_path(path: &Path) -> BadgeResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Resolve a bold sans-serif face from the fonts installed on this machine.
    pub fn system_sans_bold() -> BadgeResult<Self> {
        use usvg::fontdb;

        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        if db.is_empty() {
            return Err(BadgeError::font("no system fonts available"));
        }

        let query_for = |families: &[fontdb::Family<'_>], weight: fontdb::Weight| {
            db.query(&fontdb::Query {
                families,
                weight,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            })
        };

        let mut candidates = vec![fontdb::Family::SansSerif];
        candidates.extend(SANS_FALLBACK_FAMILIES.iter().copied().map(fontdb::Family::Name));

        let id = query_for(&candidates, fontdb::Weight::BOLD)
            .or_else(|| {
                db.faces()
                    .find(|f| f.weight == fontdb::Weight::BOLD)
                    .map(|f| f.id)
            })
            .or_else(|| query_for(&candidates, fontdb::Weight::NORMAL))
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| BadgeError::font("no usable system font face"))?;

        let family = db
            .face(id)
            .and_then(|f| f.families.first())
            .map(|(name, _)| name.clone());
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| BadgeError::font("system font face data unavailable"))?;

        tracing::debug!(family = ?family, index, "resolved system font");
        Self::from_face(bytes, index, family)
    }

    fn from_face(font_bytes: Vec<u8>, index: u32, family_hint: Option<String>) -> BadgeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        if families.is_empty() {
            return Err(BadgeError::font("no font families registered from font bytes"));
        }

        let names: Vec<String> = families
            .iter()
            .filter_map(|(id, _)| font_ctx.collection.family_name(*id).map(str::to_owned))
            .collect();
        // Shaping resolves by family, so prefer the family owning the chosen face.
        let face_family = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == index))
            .and_then(|(id, _)| font_ctx.collection.family_name(*id).map(str::to_owned));
        let family_name = family_hint
            .filter(|hint| names.iter().any(|n| n == hint))
            .or(face_family)
            .or_else(|| names.first().cloned())
            .ok_or_else(|| BadgeError::font("registered font family has no name"))?;

        Ok(Self {
            font_bytes: Arc::new(font_bytes),
            family_name,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn font_bytes(&self) -> &[u8] {
        self.font_bytes.as_slice()
    }

    /// Shape `text` as one unwrapped bold line.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> BadgeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BadgeError::validation(
                "font size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl GlyphSource for BadgeFont {
    fn advance(&mut self, ch: &str, size_px: f32) -> BadgeResult<f64> {
        let layout = self.layout_line(ch, size_px, TextBrushRgba8::default())?;
        // Full width keeps trailing whitespace, so a lone space still advances.
        Ok(f64::from(layout.full_width()))
    }

    fn fill_glyph(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        ch: &str,
        size_px: f32,
        transform: Affine,
        color: Rgba8,
    ) -> BadgeResult<()> {
        let layout = self.layout_line(ch, size_px, color.into())?;
        let Some(line) = layout.lines().next() else {
            return Ok(());
        };

        // Align center, baseline middle: the anchor sits halfway between ascent
        // and descent around the line's baseline.
        let m = line.metrics();
        let w = f64::from(layout.full_width());
        let middle = f64::from(m.baseline) - f64::from(m.ascent - m.descent) / 2.0;
        let local = transform * Affine::translate((-w / 2.0, -middle));
        ctx.set_transform(affine_to_cpu(local));

        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            // Paint with the face Parley shaped against; glyph ids are only
            // meaningful for that face.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(run.run().font())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
