use std::path::{Path, PathBuf};

use crate::{
    assets::{color::parse_color, decode::SourceImage},
    badge::{
        glyphs::GlyphSource,
        render::{BadgeInput, BadgeLayout, render_badge},
        style::{BadgeStyle, DEFAULT_COLOR, DEFAULT_SURFACE_SIZE, DEFAULT_TEXT, DOWNLOAD_FILENAME},
    },
    foundation::{core::Rgba8, error::BadgeResult},
    render::surface::BadgeSurface,
};

/// Input state of the badge editor.
///
/// Every setter re-renders once an image is present, mirroring a form that
/// redraws on each change. Without an image the surface stays blank.
pub struct BadgeEditor<G: GlyphSource> {
    style: BadgeStyle,
    surface: BadgeSurface,
    glyphs: G,
    image: Option<SourceImage>,
    text: String,
    color_css: String,
    color: Rgba8,
    layout: Option<BadgeLayout>,
    renders: u64,
}

impl<G: GlyphSource> BadgeEditor<G> {
    /// Editor with the default surface size, text and color.
    pub fn new(glyphs: G) -> BadgeResult<Self> {
        Self::with_style(glyphs, DEFAULT_SURFACE_SIZE, BadgeStyle::default())
    }

    pub fn with_style(glyphs: G, size: u32, style: BadgeStyle) -> BadgeResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            surface: BadgeSurface::new(size)?,
            glyphs,
            image: None,
            text: DEFAULT_TEXT.to_owned(),
            color_css: DEFAULT_COLOR.to_owned(),
            color: parse_color(DEFAULT_COLOR)?,
            layout: None,
            renders: 0,
        })
    }

    pub fn set_image(&mut self, image: SourceImage) -> BadgeResult<()> {
        self.image = Some(image);
        self.rerender()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> BadgeResult<()> {
        self.text = text.into();
        self.rerender()
    }

    /// Rejected colors leave the current one in place.
    pub fn set_color(&mut self, css: &str) -> BadgeResult<()> {
        self.color = parse_color(css)?;
        self.color_css = css.to_owned();
        self.rerender()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color_css(&self) -> &str {
        &self.color_css
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn surface(&self) -> &BadgeSurface {
        &self.surface
    }

    /// Layout of the last render, if any.
    pub fn layout(&self) -> Option<&BadgeLayout> {
        self.layout.as_ref()
    }

    /// Number of renders performed so far.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn export_png(&self) -> BadgeResult<Vec<u8>> {
        self.surface.encode_png()
    }

    /// Write the current surface to `dir` under the default download name.
    pub fn download(&self, dir: &Path) -> BadgeResult<PathBuf> {
        let path = dir.join(DOWNLOAD_FILENAME);
        self.surface.save_png(&path)?;
        tracing::info!(path = %path.display(), "badge exported");
        Ok(path)
    }

    fn rerender(&mut self) -> BadgeResult<()> {
        let Some(image) = self.image.as_ref() else {
            return Ok(());
        };
        let input = BadgeInput {
            image,
            text: &self.text,
            color: self.color,
        };
        let layout = render_badge(&mut self.surface, &input, &self.style, &mut self.glyphs)?;
        self.layout = Some(layout);
        self.renders += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor.rs"]
mod tests;
