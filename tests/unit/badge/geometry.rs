use std::f64::consts::PI;

use super::*;

fn reference() -> (BadgeGeometry, BadgeStyle) {
    let style = BadgeStyle::default();
    (BadgeGeometry::new(512, &style).unwrap(), style)
}

#[test]
fn reference_geometry_values() {
    let (g, _) = reference();
    assert_eq!(g.radius, 256.0);
    assert_eq!(g.center, Point::new(256.0, 256.0));
    assert_eq!(g.clip_radius, 248.0);
    assert_eq!(g.arc_radius, 228.0);
}

#[test]
fn tiny_surfaces_are_rejected() {
    let style = BadgeStyle::default();
    assert!(BadgeGeometry::new(56, &style).is_err());
    assert!(BadgeGeometry::new(0, &style).is_err());
    assert!(BadgeGeometry::new(57, &style).is_ok());
}

#[test]
fn empty_text_reserves_padding_only() {
    let (g, style) = reference();
    let span = ArcSpan::from_advances(&[], &g, &style);
    assert_eq!(span.text_length_px, 0.0);
    assert!((span.span - 260.0 / 228.0).abs() < 1e-12);
    assert_eq!(span.char_angle(0, 0), None);
}

#[test]
fn span_is_symmetric_about_bottom() {
    let (g, style) = reference();
    for advances in [vec![], vec![20.0], vec![18.5, 22.0, 9.0, 30.25]] {
        let span = ArcSpan::from_advances(&advances, &g, &style);
        let left = PI / 2.0 - span.start;
        let right = span.end - PI / 2.0;
        assert!((left - right).abs() < 1e-12);
        assert!((span.end - span.start - span.span).abs() < 1e-12);
    }
}

#[test]
fn spacing_counts_gaps_between_characters() {
    let (g, style) = reference();
    let span = ArcSpan::from_advances(&[10.0, 10.0, 10.0], &g, &style);
    assert!((span.text_length_px - (30.0 + 2.0 * 0.64)).abs() < 1e-12);
    assert!((span.total_length_px - (span.text_length_px + 260.0)).abs() < 1e-12);
}

#[test]
fn longer_text_gives_larger_span() {
    let (g, style) = reference();
    let a = ArcSpan::from_advances(&[20.0, 21.0], &g, &style);
    let b = ArcSpan::from_advances(&[20.0, 21.0, 0.5], &g, &style);
    assert!(b.span > a.span);
}

#[test]
fn solid_range_is_inset_by_fade_length() {
    let (g, style) = reference();
    let span = ArcSpan::from_advances(&[20.0], &g, &style);
    assert!((span.solid_start() - (span.start + 0.12)).abs() < 1e-12);
    assert!((span.solid_end() - (span.end - 0.12)).abs() < 1e-12);
}

#[test]
fn glyphs_are_evenly_spaced_from_the_end_angle() {
    let (g, style) = reference();
    let chars = badge_chars("#hiring");
    assert_eq!(chars.concat(), "#HIRING");

    let span = ArcSpan::from_advances(&vec![20.0; chars.len()], &g, &style);
    let placed = place_glyphs(&chars, &g, &span);
    assert_eq!(placed.len(), 7);

    let step = span.span / 7.0;
    assert!((placed[0].angle - (span.end - step / 2.0)).abs() < 1e-12);
    for pair in placed.windows(2) {
        assert!((pair[0].angle - pair[1].angle - step).abs() < 1e-12);
    }

    // Middle glyph 'R' sits at the bottom of the circle, upright.
    let mid = &placed[3];
    assert_eq!(mid.ch, "R");
    assert!((mid.angle - PI / 2.0).abs() < 1e-12);
    assert!((mid.position.x - 256.0).abs() < 1e-9);
    assert!((mid.position.y - (256.0 + 228.0)).abs() < 1e-9);
    assert!(mid.rotation.abs() < 1e-12);
}

#[test]
fn glyph_transform_maps_origin_to_position() {
    let (g, style) = reference();
    let chars = badge_chars("ab");
    let span = ArcSpan::from_advances(&[10.0, 10.0], &g, &style);
    for p in place_glyphs(&chars, &g, &span) {
        let at = p.transform() * Point::ORIGIN;
        assert!((at - p.position).hypot() < 1e-9);
        let dist = (p.position - g.center).hypot();
        assert!((dist - g.arc_radius).abs() < 1e-9);
    }
}

#[test]
fn uppercase_mapping_can_change_length() {
    // German sharp s uppercases to "SS".
    assert_eq!(badge_chars("straße").len(), 7);
    assert!(badge_chars("").is_empty());
    assert_eq!(badge_chars("a b"), vec!["A", " ", "B"]);
    assert_eq!(badge_chars("hi \u{1F600}"), vec!["H", "I", " ", "\u{1F600}"]);
}

#[test]
fn clockwise_sweep_matches_raster_arc_rules() {
    assert!((clockwise_sweep(0.5, 1.5) - 1.0).abs() < 1e-12);
    assert_eq!(clockwise_sweep(0.0, 10.0), TAU);
    assert!((clockwise_sweep(1.0, 0.5) - (TAU - 0.5)).abs() < 1e-12);
}

#[test]
fn arc_path_starts_at_the_from_angle() {
    let (g, _) = reference();
    let path = g.arc_path(PI / 4.0, PI / 2.0);
    let first = match path.elements().first() {
        Some(kurbo::PathEl::MoveTo(p)) => *p,
        other => panic!("expected move_to, got {other:?}"),
    };
    let expected = g.point_at(PI / 4.0, g.arc_radius);
    assert!((first - expected).hypot() < 1e-9);
}
