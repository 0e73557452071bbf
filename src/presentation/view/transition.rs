//! Slide transition vocabulary, offset math, and timing.

use std::fmt;
use std::time::Duration;

use ratatui::layout::Size;

use super::element::Offset;

/// Fixed transition duration.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Short delay before a transition starts, so the starting transform is
/// committed to the screen before the first animated frame (anti-jank).
pub const TRANSITION_DEFER: Duration = Duration::from_millis(10);

/// Vertical travel of a drawer panel, in rows.
const PANEL_VERTICAL_ROWS: i32 = 6;
/// Strip of the covered screen left exposed by a leftward panel reveal.
const PANEL_LEFT_MARGIN: i32 = 12;
/// Strip of the covered screen left exposed by a rightward panel reveal.
const PANEL_RIGHT_MARGIN: i32 = 14;

/// Slide transition directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    /// Content travels upward.
    Up,
    /// Content travels downward.
    Down,
    /// Content travels leftward.
    Left,
    /// Content travels rightward.
    Right,
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "slide-up"),
            Self::Down => write!(f, "slide-down"),
            Self::Left => write!(f, "slide-left"),
            Self::Right => write!(f, "slide-right"),
        }
    }
}

/// Starting offset of a screen entering via `show`; it animates to zero.
#[must_use]
pub fn entrance_offset(slide: Slide, viewport: Size) -> Offset {
    let w = i32::from(viewport.width);
    let h = i32::from(viewport.height);
    match slide {
        Slide::Up => Offset::new(0, h),
        Slide::Down => Offset::new(0, -h),
        Slide::Left => Offset::new(-w, 0),
        Slide::Right => Offset::new(w, 0),
    }
}

/// Target offset of the outgoing screen during a `reveal`; it animates from
/// zero.
#[must_use]
pub fn exit_offset(slide: Slide, viewport: Size) -> Offset {
    let w = i32::from(viewport.width);
    let h = i32::from(viewport.height);
    match slide {
        Slide::Up => Offset::new(0, -h),
        Slide::Down => Offset::new(0, h),
        Slide::Left => Offset::new(-w, 0),
        Slide::Right => Offset::new(w, 0),
    }
}

/// Target offset of the covered screen during a panel reveal. Panels expose
/// the screen beneath by a fixed amount rather than the full viewport.
#[must_use]
pub fn panel_offset(slide: Slide, viewport: Size) -> Offset {
    let w = i32::from(viewport.width);
    match slide {
        Slide::Up => Offset::new(0, -PANEL_VERTICAL_ROWS),
        Slide::Down => Offset::new(0, PANEL_VERTICAL_ROWS),
        Slide::Left => Offset::new((w - PANEL_LEFT_MARGIN).max(0), 0),
        Slide::Right => Offset::new(-(w - PANEL_RIGHT_MARGIN).max(0), 0),
    }
}

/// CSS `ease` timing function, cubic-bezier(0.25, 0.1, 0.25, 1.0).
#[must_use]
pub fn ease(progress: f32) -> f32 {
    cubic_bezier(0.25, 0.1, 0.25, 1.0, progress.clamp(0.0, 1.0))
}

fn bezier_axis(c1: f32, c2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * c1 + 3.0 * u * t * t * c2 + t * t * t
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Invert x(t) by bisection; the curve is monotonic in t.
    let mut lo = 0.0_f32;
    let mut hi = 1.0_f32;
    let mut t = x;
    for _ in 0..24 {
        let xt = bezier_axis(x1, x2, t);
        if (xt - x).abs() < 1e-4 {
            break;
        }
        if xt < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, t)
}

/// Interpolates between two offsets at the given eased alpha.
#[must_use]
pub fn lerp_offset(from: Offset, to: Offset, alpha: f32) -> Offset {
    let blend = |a: i32, b: i32| -> i32 {
        let v = (a as f32) + ((b - a) as f32) * alpha;
        v.round() as i32
    };
    Offset::new(blend(from.dx, to.dx), blend(from.dy, to.dy))
}

/// Tracks one transition's defer phase and animated phase.
#[derive(Debug, Clone)]
pub struct TransitionClock {
    defer_remaining: Duration,
    elapsed: Duration,
}

impl TransitionClock {
    /// Creates a clock with the standard defer and duration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            defer_remaining: TRANSITION_DEFER,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances the clock, consuming the defer phase first.
    pub fn advance(&mut self, dt: Duration) {
        let dt = if self.defer_remaining.is_zero() {
            dt
        } else if dt >= self.defer_remaining {
            let rest = dt - self.defer_remaining;
            self.defer_remaining = Duration::ZERO;
            rest
        } else {
            self.defer_remaining -= dt;
            return;
        };
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Returns the eased animation alpha in `0.0..=1.0`.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        let progress =
            self.elapsed.as_secs_f32() / TRANSITION_DURATION.as_secs_f32();
        ease(progress)
    }

    /// Returns whether the defer phase has passed and frames are animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.defer_remaining.is_zero()
    }

    /// Returns whether the animated phase has run to completion.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.defer_remaining.is_zero() && self.elapsed >= TRANSITION_DURATION
    }
}

impl Default for TransitionClock {
    fn default() -> Self {
        Self::new()
    }
}
