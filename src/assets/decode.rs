use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::premul_rgba8,
    error::{BadgeError, BadgeResult},
};

/// Decoded raster image in premultiplied RGBA8 form.
///
/// Construction always goes through a decode or an explicit pixel buffer, so a
/// `SourceImage` is loaded by the time the renderer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Build from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8_straight(width: u32, height: u32, mut rgba: Vec<u8>) -> BadgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(BadgeError::decode("image has zero width or height"));
        }
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(BadgeError::decode(format!(
                "rgba8 buffer length {} does not match {width}x{height}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Single-color image, mostly useful for previews and tests.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> BadgeResult<Self> {
        let px = width as usize * height as usize;
        Self::from_rgba8_straight(width, height, rgba.repeat(px))
    }
}

/// Decode any format supported by the `image` crate.
pub fn decode_image(bytes: &[u8]) -> BadgeResult<SourceImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| BadgeError::decode(e.to_string()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8_straight(width, height, rgba.into_raw())
}

pub fn load_image(path: &Path) -> BadgeResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        if px[3] == 255 {
            continue;
        }
        let out = premul_rgba8(px[0], px[1], px[2], px[3]);
        px.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
