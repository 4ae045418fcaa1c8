use crate::foundation::{
    core::Rgba8,
    error::{BadgeError, BadgeResult},
};

/// Parse a CSS color string (hex, `rgb()`, `hsl()`, named colors, ...) into straight RGBA8.
pub fn parse_color(s: &str) -> BadgeResult<Rgba8> {
    let parsed = csscolorparser::parse(s.trim())
        .map_err(|e| BadgeError::color(format!("\"{s}\": {e}")))?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Rgba8::new(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
