//!
//! Entry animation for the last digit.
//!
//! When a digit is appended at the end, it rises from the baseline
//! to its final position and fades in. Only one animation runs at a
//! time, appends during an animation don't restart it.
//!
//! The animation is driven from the outside. The host calls
//! [TailAnimation::tick] with the current time and redraws as long
//! as it returns true.
//!

use std::f32::consts::PI;
use std::time::{Duration, Instant};

/// Default duration.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(200);

/// Animation state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    Animating {
        /// Start time.
        start: Instant,
    },
}

/// Interpolated values for the animated tail glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailFrame {
    /// 0.0..=1.0 after easing.
    pub progress: f32,
    /// Offset from the baseline, 0.0..=line_spacing.
    pub offset: f32,
    /// 0..=255
    pub alpha: u8,
}

impl TailFrame {
    /// Resting position.
    pub fn idle(line_spacing: f32) -> Self {
        Self {
            progress: 1.0,
            offset: line_spacing,
            alpha: 255,
        }
    }

    /// Frame for the eased progress.
    pub fn at(progress: f32, line_spacing: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            progress,
            offset: progress * line_spacing,
            alpha: (progress * 255.0).round() as u8,
        }
    }
}

/// Tail animation.
#[derive(Debug, Clone, Copy)]
pub struct TailAnimation {
    state: AnimationState,
    duration: Duration,
}

impl Default for TailAnimation {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            duration: ANIMATION_DURATION,
        }
    }
}

impl TailAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animation with a different duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Is an animation running at the given time.
    ///
    /// An animation whose duration has elapsed is not running,
    /// even if [TailAnimation::tick] hasn't been called yet.
    #[inline]
    pub fn is_animating(&self, now: Instant) -> bool {
        match self.state {
            AnimationState::Idle => false,
            AnimationState::Animating { start } => !self.is_expired(start, now),
        }
    }

    #[inline]
    fn is_expired(&self, start: Instant, now: Instant) -> bool {
        now.saturating_duration_since(start) >= self.duration
    }

    /// A digit has been appended at the tail.
    ///
    /// Starts the animation if none is running.
    /// Returns true if a new animation started.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_animating(now) {
            return false;
        }
        self.state = AnimationState::Animating { start: now };
        true
    }

    /// Stop any running animation.
    pub fn stop(&mut self) {
        self.state = AnimationState::Idle;
    }

    /// Advance the animation.
    ///
    /// Switches back to Idle when the duration has elapsed.
    /// Returns true while the animation is still running and
    /// a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            AnimationState::Idle => false,
            AnimationState::Animating { start } => {
                if self.is_expired(start, now) {
                    self.state = AnimationState::Idle;
                }
                // one more redraw for the final frame.
                true
            }
        }
    }

    /// Current frame for the tail glyph.
    pub fn frame(&self, now: Instant, line_spacing: f32) -> TailFrame {
        match self.state {
            AnimationState::Animating { start } if !self.is_expired(start, now) => {
                let elapsed = now.saturating_duration_since(start);
                let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
                TailFrame::at(ease_in_out(t), line_spacing)
            }
            _ => TailFrame::idle(line_spacing),
        }
    }
}

/// Accelerate at the start, decelerate at the end.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease() {
        assert!(ease_in_out(0.0).abs() < 1e-6);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out(1.0) - 1.0).abs() < 1e-6);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_cycle() {
        let t0 = Instant::now();
        let mut a = TailAnimation::new();
        assert!(a.start(t0));
        assert!(!a.start(t0 + Duration::from_millis(50)));
        assert_eq!(a.state(), AnimationState::Animating { start: t0 });

        let f = a.frame(t0 + Duration::from_millis(100), 10.0);
        assert!((f.offset - 5.0).abs() < 1e-3);
        assert!(f.alpha == 127 || f.alpha == 128);

        assert!(a.tick(t0 + Duration::from_millis(100)));
        assert!(a.is_animating(t0 + Duration::from_millis(100)));
        assert!(a.tick(t0 + Duration::from_millis(200)));
        assert!(!a.is_animating(t0 + Duration::from_millis(200)));
        assert!(!a.tick(t0 + Duration::from_millis(250)));
        assert_eq!(a.frame(t0, 10.0), TailFrame::idle(10.0));
    }

    #[test]
    fn test_expire_without_tick() {
        let t0 = Instant::now();
        let mut a = TailAnimation::new();
        assert!(a.start(t0));
        assert!(a.is_animating(t0 + Duration::from_millis(199)));
        assert!(!a.is_animating(t0 + Duration::from_millis(500)));
        assert_eq!(
            a.frame(t0 + Duration::from_millis(500), 10.0),
            TailFrame::idle(10.0)
        );

        let t1 = t0 + Duration::from_millis(500);
        assert!(a.start(t1));
        assert_eq!(a.state(), AnimationState::Animating { start: t1 });
    }
}
