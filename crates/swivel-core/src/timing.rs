//! Timing options forwarded to the host animation runtime.
//!
//! [`TimingOptions`] is a partial record: every field is optional, and a
//! request's options are merged per key over the process-wide defaults with
//! the request winning. The engine never interprets these values (easing
//! curves, fill behavior and iteration handling are the host runtime's job);
//! it only carries them into the start call and into the fingerprint.

use serde::{Deserialize, Serialize};

/// Easing curve for animation timing, in CSS terms.
///
/// Pure data here: evaluation lives with whichever host runtime plays the
/// animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear progress (no easing).
    Linear,
    /// CSS `ease`. Equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,
    /// CSS `ease-in`. Equivalent to `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`. Equivalent to `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`. Equivalent to `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Custom cubic bezier control points (x1, y1, x2, y2).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl EasingFunction {
    /// Parse the CSS keyword form (`"ease-out"` etc.), as it appears in
    /// configuration files. Returns `None` for unknown keywords; the
    /// `cubic-bezier(..)` function form is not accepted here.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "linear" => Some(Self::Linear),
            "ease" => Some(Self::Ease),
            "ease-in" => Some(Self::EaseIn),
            "ease-out" => Some(Self::EaseOut),
            "ease-in-out" => Some(Self::EaseInOut),
            _ => None,
        }
    }
}

/// What values the host applies outside the animation's active interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// No values applied outside the animation.
    #[default]
    None,
    /// Retain the final keyframe values after the animation ends.
    Forwards,
    /// Apply the first keyframe values during the delay period.
    Backwards,
    /// Both forwards and backwards behavior.
    Both,
}

impl FillMode {
    /// Parse the CSS keyword form, as it appears in configuration files.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(Self::None),
            "forwards" => Some(Self::Forwards),
            "backwards" => Some(Self::Backwards),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Direction of playback across iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackDirection {
    /// Play forward each iteration.
    #[default]
    Normal,
    /// Play backward each iteration.
    Reverse,
    /// Alternate between forward and backward.
    Alternate,
    /// Alternate, starting backward.
    AlternateReverse,
}

/// How many times the host repeats the animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IterationCount {
    /// A specific number of iterations (can be fractional).
    Count { count: f32 },
    /// Repeat indefinitely.
    Infinite,
}

impl Default for IterationCount {
    fn default() -> Self {
        Self::Count { count: 1.0 }
    }
}

/// Partial timing record for one animation start.
///
/// Unset fields fall back to the defaults the controller was built with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingOptions {
    /// Duration of one iteration in milliseconds.
    pub duration_ms: Option<f64>,
    /// Delay before the animation starts in milliseconds.
    pub delay_ms: Option<f64>,
    /// Easing curve.
    pub easing: Option<EasingFunction>,
    /// Fill mode.
    pub fill: Option<FillMode>,
    /// Playback direction.
    pub direction: Option<PlaybackDirection>,
    /// Iteration count.
    pub iterations: Option<IterationCount>,
}

impl TimingOptions {
    /// Create an all-unset record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The library's stock defaults: 150 ms, ease-out.
    pub fn standard() -> Self {
        Self::new().duration_ms(150.0).easing(EasingFunction::EaseOut)
    }

    /// Set the duration.
    pub fn duration_ms(mut self, duration: f64) -> Self {
        self.duration_ms = Some(duration);
        self
    }

    /// Set the start delay.
    pub fn delay_ms(mut self, delay: f64) -> Self {
        self.delay_ms = Some(delay);
        self
    }

    /// Set the easing curve.
    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Set the fill mode.
    pub fn fill(mut self, fill: FillMode) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Set the playback direction.
    pub fn direction(mut self, direction: PlaybackDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Set the iteration count.
    pub fn iterations(mut self, iterations: IterationCount) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Merge per key over `defaults`: a key set on `overrides` wins, an unset
    /// key falls back to the default.
    pub fn merge(defaults: &TimingOptions, overrides: &TimingOptions) -> TimingOptions {
        TimingOptions {
            duration_ms: overrides.duration_ms.or(defaults.duration_ms),
            delay_ms: overrides.delay_ms.or(defaults.delay_ms),
            easing: overrides.easing.or(defaults.easing),
            fill: overrides.fill.or(defaults.fill),
            direction: overrides.direction.or(defaults.direction),
            iterations: overrides.iterations.or(defaults.iterations),
        }
    }
}
