use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::foundation::{
    core::unpremul_rgba8,
    error::{BadgeError, BadgeResult},
};

/// Square premultiplied RGBA8 drawing target owned by the caller.
///
/// Renders take it by `&mut`, so one surface never sees two renders at once.
pub struct BadgeSurface {
    side: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for BadgeSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeSurface")
            .field("side", &self.side)
            .finish_non_exhaustive()
    }
}

impl BadgeSurface {
    pub fn new(size: u32) -> BadgeResult<Self> {
        let side: u16 = size
            .try_into()
            .map_err(|_| BadgeError::validation("surface size exceeds u16"))?;
        if side == 0 {
            return Err(BadgeError::validation("surface size must be > 0"));
        }
        Ok(Self {
            side,
            pixmap: vello_cpu::Pixmap::new(side, side),
        })
    }

    pub fn size(&self) -> u32 {
        u32::from(self.side)
    }

    pub(crate) fn side_u16(&self) -> u16 {
        self.side
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }

    pub fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    /// Raw premultiplied pixels, row-major.
    pub fn data_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Straight-alpha pixel at `(x, y)`; `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let side = self.size();
        if x >= side || y >= side {
            return None;
        }
        let i = (y as usize * side as usize + x as usize) * 4;
        let px = self.data_premul().get(i..i + 4)?;
        Some(unpremul_rgba8([px[0], px[1], px[2], px[3]]))
    }

    /// Straight-alpha copy of the whole surface.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data_premul().len());
        for px in self.data_premul().chunks_exact(4) {
            out.extend_from_slice(&unpremul_rgba8([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    pub fn encode_png(&self) -> BadgeResult<Vec<u8>> {
        let side = self.size();
        let img = image::RgbaImage::from_raw(side, side, self.to_rgba8_straight())
            .ok_or_else(|| BadgeError::encode("surface buffer does not match its size"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| BadgeError::encode(e.to_string()))?;
        Ok(buf)
    }

    /// Encode and write to `path`, creating parent directories.
    pub fn save_png(&self, path: &Path) -> BadgeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
