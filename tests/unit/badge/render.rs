use std::f64::consts::FRAC_PI_2;

use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const VIOLET: Rgba8 = Rgba8::new(0x8b, 0x5c, 0xf6, 255);

/// Fixed-advance glyphs that paint a square, so pixels can be checked without fonts.
#[derive(Default)]
struct BoxGlyphs {
    measured: Vec<(String, f32)>,
    painted: Vec<(String, f32)>,
}

impl GlyphSource for BoxGlyphs {
    fn advance(&mut self, ch: &str, size_px: f32) -> BadgeResult<f64> {
        self.measured.push((ch.to_owned(), size_px));
        Ok(20.0)
    }

    fn fill_glyph(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        ch: &str,
        size_px: f32,
        transform: Affine,
        color: Rgba8,
    ) -> BadgeResult<()> {
        self.painted.push((ch.to_owned(), size_px));
        if ch.trim().is_empty() {
            return Ok(());
        }
        let half = f64::from(size_px) / 4.0;
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(color_to_cpu(color));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(-half, -half, half, half));
        Ok(())
    }
}

struct FailingGlyphs;

impl GlyphSource for FailingGlyphs {
    fn advance(&mut self, _ch: &str, _size_px: f32) -> BadgeResult<f64> {
        Err(BadgeError::font("shaping failed"))
    }

    fn fill_glyph(
        &mut self,
        _ctx: &mut vello_cpu::RenderContext,
        _ch: &str,
        _size_px: f32,
        _transform: Affine,
        _color: Rgba8,
    ) -> BadgeResult<()> {
        unreachable!("layout fails first")
    }
}

fn red_image() -> SourceImage {
    SourceImage::solid(4, 4, RED).unwrap()
}

fn render(text: &str, glyphs: &mut BoxGlyphs) -> (BadgeSurface, BadgeLayout) {
    let image = red_image();
    let mut surface = BadgeSurface::new(512).unwrap();
    let input = BadgeInput {
        image: &image,
        text,
        color: VIOLET,
    };
    let layout = render_badge(&mut surface, &input, &BadgeStyle::default(), glyphs).unwrap();
    (surface, layout)
}

fn pixel_at_angle(surface: &BadgeSurface, layout: &BadgeLayout, angle: f64) -> [u8; 4] {
    let p = layout
        .geometry
        .point_at(angle, layout.geometry.arc_radius);
    surface.pixel(p.x.floor() as u32, p.y.floor() as u32).unwrap()
}

fn assert_close(actual: [u8; 4], expected: [u8; 4], tol: u8) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.abs_diff(e) <= tol, "{actual:?} vs {expected:?}");
    }
}

#[test]
fn empty_text_draws_image_and_bare_arc() {
    let mut glyphs = BoxGlyphs::default();
    let (surface, layout) = render("", &mut glyphs);

    assert!(layout.glyphs.is_empty());
    assert!(glyphs.measured.is_empty());
    assert!(glyphs.painted.is_empty());
    assert!((layout.span.span - 260.0 / 228.0).abs() < 1e-12);

    assert_close(surface.pixel(256, 256).unwrap(), RED, 1);
    assert_close(surface.pixel(256, 484).unwrap(), VIOLET.to_array(), 1);
    assert_eq!(surface.pixel(2, 2).unwrap()[3], 0);
    assert_eq!(surface.pixel(509, 509).unwrap()[3], 0);
}

#[test]
fn hiring_scenario_places_seven_glyphs() {
    let mut glyphs = BoxGlyphs::default();
    let (surface, layout) = render("#hiring", &mut glyphs);

    let measured: Vec<_> = glyphs.measured.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(measured, ["#", "H", "I", "R", "I", "N", "G"]);
    assert!(glyphs.measured.iter().all(|(_, px)| *px == 32.0));
    assert_eq!(glyphs.painted.len(), 7);
    assert!(glyphs.painted.iter().all(|(_, px)| *px == 28.0));

    let expected_len = 7.0 * 20.0 + 6.0 * 0.64 + 260.0;
    assert!((layout.span.total_length_px - expected_len).abs() < 1e-9);

    for g in &layout.glyphs {
        let px = surface
            .pixel(g.position.x.floor() as u32, g.position.y.floor() as u32)
            .unwrap();
        assert_close(px, [255, 255, 255, 255], 1);
    }
}

#[test]
fn whitespace_is_measured_and_drawn_as_blank() {
    let mut glyphs = BoxGlyphs::default();
    let (_, layout) = render("a b", &mut glyphs);
    assert_eq!(layout.glyphs.len(), 3);
    assert_eq!(glyphs.measured.len(), 3);
    assert_eq!(glyphs.painted.len(), 3);
    assert_eq!(glyphs.painted[1].0, " ");
}

#[test]
fn rendering_twice_is_pixel_identical() {
    let mut glyphs = BoxGlyphs::default();
    let (first, _) = render("#HIRING", &mut glyphs);

    let image = red_image();
    let mut surface = BadgeSurface::new(512).unwrap();
    let input = BadgeInput {
        image: &image,
        text: "#HIRING",
        color: VIOLET,
    };
    let style = BadgeStyle::default();
    render_badge(&mut surface, &input, &style, &mut glyphs).unwrap();
    render_badge(&mut surface, &input, &style, &mut glyphs).unwrap();

    assert_eq!(first.data_premul(), surface.data_premul());
}

#[test]
fn fade_zones_ramp_from_image_to_accent() {
    let mut glyphs = BoxGlyphs::default();
    let (surface, layout) = render("", &mut glyphs);
    let span = layout.span;

    // Beyond the arc the avatar shows through untouched.
    assert_close(pixel_at_angle(&surface, &layout, span.start - 0.05), RED, 1);
    assert_close(pixel_at_angle(&surface, &layout, span.end + 0.05), RED, 1);

    // Fade ends are nearly transparent.
    assert_close(pixel_at_angle(&surface, &layout, span.start + 0.001), RED, 3);
    assert_close(pixel_at_angle(&surface, &layout, span.end - 0.001), RED, 3);

    // Halfway through each fade the accent is about half blended in.
    for angle in [span.start + 0.06, span.end - 0.06] {
        let px = pixel_at_angle(&surface, &layout, angle);
        assert!(px[1] > 25 && px[1] < 70, "green {px:?}");
        assert!(px[2] > 95 && px[2] < 150, "blue {px:?}");
    }

    // Solid part and the bottom of the circle get the full accent.
    assert_close(
        pixel_at_angle(&surface, &layout, span.solid_start() + 0.02),
        VIOLET.to_array(),
        1,
    );
    assert_close(
        pixel_at_angle(&surface, &layout, FRAC_PI_2),
        VIOLET.to_array(),
        1,
    );
}

#[test]
fn translucent_accent_blends_over_the_image() {
    let image = red_image();
    let mut surface = BadgeSurface::new(512).unwrap();
    let input = BadgeInput {
        image: &image,
        text: "",
        color: Rgba8::new(0, 0, 255, 128),
    };
    render_badge(
        &mut surface,
        &input,
        &BadgeStyle::default(),
        &mut BoxGlyphs::default(),
    )
    .unwrap();

    let px = surface.pixel(256, 484).unwrap();
    assert_eq!(px[3], 255);
    assert!(px[0] > 100 && px[0] < 150, "{px:?}");
    assert!(px[2] > 100 && px[2] < 150, "{px:?}");
}

#[test]
fn layout_without_drawing_matches_render() {
    let mut glyphs = BoxGlyphs::default();
    let (_, rendered) = render("Open to work", &mut glyphs);
    let laid_out = layout_badge(
        512,
        "Open to work",
        &BadgeStyle::default(),
        &mut BoxGlyphs::default(),
    )
    .unwrap();
    assert_eq!(rendered, laid_out);
}

#[test]
fn invalid_style_and_glyph_errors_propagate() {
    let image = red_image();
    let mut surface = BadgeSurface::new(512).unwrap();
    let input = BadgeInput {
        image: &image,
        text: "x",
        color: VIOLET,
    };

    let style = BadgeStyle {
        fade_steps: 0,
        ..BadgeStyle::default()
    };
    let err = render_badge(&mut surface, &input, &style, &mut BoxGlyphs::default()).unwrap_err();
    assert!(matches!(err, BadgeError::Validation(_)));

    let err =
        render_badge(&mut surface, &input, &BadgeStyle::default(), &mut FailingGlyphs).unwrap_err();
    assert!(matches!(err, BadgeError::Font(_)));
}

#[test]
fn image_paint_rejects_oversize_images() {
    let image = SourceImage {
        width: 70_000,
        height: 1,
        rgba8_premul: Arc::new(vec![0; 70_000 * 4]),
    };
    assert!(image_paint(&image).is_err());
}
