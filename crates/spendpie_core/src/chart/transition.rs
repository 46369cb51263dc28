//! Time-driven tweens.
//!
//! Time is an explicit `Duration` since an arbitrary epoch chosen by the
//! caller, which keeps sampling deterministic.

use crate::chart::color::Rgb;
use crate::chart::pie::Span;
use std::time::Duration;

/// Values that can be blended linearly.
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for Span {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for Rgb {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

/// Symmetric cubic easing, slow at both ends.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// One eased transition from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub started_at: Duration,
    pub duration: Duration,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, started_at: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// A tween that is already at rest on `value`.
    pub fn settled(value: T, now: Duration) -> Self {
        Self::new(value, value, now, Duration::ZERO)
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Duration) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.interpolate(self.to, ease_cubic_in_out(t))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Starts a new tween toward `to` from wherever this one is at `now`.
    pub fn retarget(&self, to: T, now: Duration, duration: Duration) -> Self {
        Self::new(self.sample(now), to, now, duration)
    }
}
