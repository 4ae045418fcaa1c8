use std::f64::consts::PI;

/// S-curve from 0 to 1: `0.5 - 0.5·cos(πt)`.
pub fn cosine_ease(t: f64) -> f64 {
    0.5 - 0.5 * (PI * t).cos()
}

/// One stroked piece of a fade zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeSegment {
    pub start_angle: f64,
    pub end_angle: f64,
    pub alpha: f32,
}

/// Alpha ramp over an angular range, drawn as `steps` short strokes.
///
/// Sample `i` sits at `t = i / (steps - 1)`, so the first and last segments carry
/// exactly `start_alpha` and `end_alpha`. Each segment starts at `t` along the
/// range and is `1 / steps` of the range long, which makes the last one poke
/// slightly past `to_angle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeRamp {
    pub from_angle: f64,
    pub to_angle: f64,
    pub start_alpha: f64,
    pub end_alpha: f64,
    pub steps: u32,
}

impl FadeRamp {
    /// Transparent at `from_angle`, opaque at `to_angle`.
    pub fn rising(from_angle: f64, to_angle: f64, steps: u32) -> Self {
        Self {
            from_angle,
            to_angle,
            start_alpha: 0.0,
            end_alpha: 1.0,
            steps,
        }
    }

    /// Opaque at `from_angle`, transparent at `to_angle`.
    pub fn falling(from_angle: f64, to_angle: f64, steps: u32) -> Self {
        Self {
            from_angle,
            to_angle,
            start_alpha: 1.0,
            end_alpha: 0.0,
            steps,
        }
    }

    pub fn alpha_at(&self, t: f64) -> f64 {
        self.start_alpha + (self.end_alpha - self.start_alpha) * cosine_ease(t)
    }

    pub fn segments(&self) -> impl Iterator<Item = FadeSegment> + '_ {
        let steps = self.steps.max(1);
        let last = f64::from(steps.saturating_sub(1).max(1));
        let range = self.to_angle - self.from_angle;
        let step_t = 1.0 / f64::from(steps);

        (0..steps).map(move |i| {
            let t = f64::from(i) / last;
            FadeSegment {
                start_angle: self.from_angle + t * range,
                end_angle: self.from_angle + (t + step_t) * range,
                alpha: self.alpha_at(t).clamp(0.0, 1.0) as f32,
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/badge/fade.rs"]
mod tests;
