//! Numeric tweens
//!
//! A `Tween` interpolates a single `f32` from a start value to an end value over
//! a fixed duration, shaped by an [`Ease`] curve. With `yoyo` enabled the tween
//! plays forward and then back to its start value, taking twice the duration.
//!
//! Tweens are advanced explicitly with [`Tween::tick`], so they can be owned by
//! plain state (an attacker phase, the boss death sequence) and stepped from any
//! system with the frame delta.

use bevy::math::curve::easing::{EaseFunction, EasingCurve};
use bevy::math::curve::Curve;
use serde::{Deserialize, Serialize};

/// Easing curves used by the arena choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
}

impl Ease {
    pub fn function(self) -> EaseFunction {
        match self {
            Ease::Linear => EaseFunction::Linear,
            Ease::QuadIn => EaseFunction::QuadraticIn,
            Ease::QuadOut => EaseFunction::QuadraticOut,
            Ease::QuadInOut => EaseFunction::QuadraticInOut,
        }
    }

    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        EasingCurve::new(0.0, 1.0, self.function()).sample_clamped(t)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    ease: Ease,
    yoyo: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
            yoyo: false,
        }
    }

    /// Play forward, then back to the start value.
    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Total running time including the return leg of a yoyo.
    pub fn total_duration(&self) -> f32 {
        if self.yoyo {
            self.duration * 2.0
        } else {
            self.duration
        }
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.total_duration());
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.yoyo { self.from } else { self.to };
        }

        let leg = if self.yoyo && self.elapsed > self.duration {
            // Return leg retraces the forward curve
            2.0 * self.duration - self.elapsed
        } else {
            self.elapsed
        };

        let t = self.ease.apply(leg / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    /// Time left before the tween settles, in seconds.
    pub fn remaining(&self) -> f32 {
        (self.total_duration() - self.elapsed).max(0.0)
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}
