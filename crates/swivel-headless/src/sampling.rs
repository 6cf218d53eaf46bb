//! Playback math: easing evaluation and track sampling.
//!
//! The engine treats easing curves and keyframe tracks as opaque data; a host
//! that actually plays animations has to evaluate them. This module gives the
//! headless host that ability: CSS-compatible timing curves (Newton-Raphson
//! bezier solve) and piecewise sampling over a property track's value list.

use swivel_core::keyframes::PropertyTrack;
use swivel_core::style::StyleValue;
use swivel_core::timing::EasingFunction;

/// Evaluate an easing curve at linear progress `t` in [0, 1].
pub fn eased_progress(easing: EasingFunction, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        EasingFunction::Linear => t,
        EasingFunction::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
        EasingFunction::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
        EasingFunction::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
        EasingFunction::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        EasingFunction::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
    }
}

/// Sample a track's current value at eased progress `t`.
///
/// Sampled tracks interpolate piecewise over equally spaced offsets: numeric
/// neighbors lerp, while a pair with a textual side switches discretely at
/// the midpoint of its segment. A one-element track holds its value for the
/// whole duration. Fixed tracks are applied at the end of the animation, not
/// sampled, so they yield nothing here.
pub fn sample_track(track: &PropertyTrack, t: f32) -> Option<StyleValue> {
    let values = match track {
        PropertyTrack::Fixed(_) => return None,
        PropertyTrack::Sampled(values) => values,
    };

    match values.len() {
        0 => None,
        1 => Some(values[0].clone()),
        len => {
            let t = t.clamp(0.0, 1.0);
            let position = t * (len - 1) as f32;
            let segment = (position.floor() as usize).min(len - 2);
            let local = position - segment as f32;
            Some(sample_pair(&values[segment], &values[segment + 1], local))
        }
    }
}

fn sample_pair(from: &StyleValue, to: &StyleValue, local: f32) -> StyleValue {
    match (from.as_number(), to.as_number()) {
        (Some(a), Some(b)) => StyleValue::Number(lerp(a, b, local)),
        // Discrete values switch halfway through the segment.
        _ => {
            if local < 0.5 {
                from.clone()
            } else {
                to.clone()
            }
        }
    }
}

#[inline]
fn lerp(from: f64, to: f64, t: f32) -> f64 {
    from + (to - from) * t as f64
}

/// Evaluate a cubic bezier timing curve at progress `t`.
///
/// Newton-Raphson iteration finds the curve parameter whose x coordinate
/// matches the input progress, then the y coordinate at that parameter is the
/// eased progress.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_axis(y1, y2, t)
}

fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_axis(x1, x2, t) - target_x;
        if x.abs() < 1e-6 {
            break;
        }

        let dx = bezier_x_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t -= x / dx;
        t = t.clamp(0.0, 1.0);
    }

    t
}

/// One bezier coordinate at parameter t, control points (p1, p2), endpoints
/// pinned to 0 and 1: 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³.
#[inline]
fn bezier_axis(p1: f32, p2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

#[inline]
fn bezier_x_derivative(x1: f32, x2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}
