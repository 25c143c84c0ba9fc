//! Simulated video player clock
//!
//! The terminal cannot decode video, so playback is modelled as a clock that
//! advances while playing. It reports the played fraction the same way an
//! embedded player's progress callback would.

use std::time::Duration;

/// Slowest supported playback rate
pub const MIN_RATE: f32 = 0.25;

/// Fastest supported playback rate
pub const MAX_RATE: f32 = 16.0;

/// Bring a configured rate into `MIN_RATE..=MAX_RATE`; unusable values become 1.0
pub fn clamp_rate(rate: f32) -> f32 {
    if rate.is_finite() && rate > 0.0 { rate.clamp(MIN_RATE, MAX_RATE) } else { 1.0 }
}

/// Playback position for the current chapter's video
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    duration: Duration,
    position: Duration,
    playing: bool,
    rate: f32,
}

impl Playback {
    /// Create a paused player at the start of a video
    pub fn new(duration_seconds: u32, rate: f32) -> Self {
        Self {
            duration: Duration::from_secs(u64::from(duration_seconds)),
            position: Duration::ZERO,
            playing: false,
            rate: clamp_rate(rate),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Toggle between playing and paused; a finished video restarts
    pub fn toggle(&mut self) {
        if self.playing {
            self.playing = false;
        } else {
            if self.is_finished() {
                self.position = Duration::ZERO;
            }
            self.playing = !self.duration.is_zero();
        }
    }

    /// Whether the position has reached the end
    pub fn is_finished(&self) -> bool {
        self.position >= self.duration
    }

    /// Fraction of the video played, in [0, 1]
    pub fn played(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Advance the clock by wall-clock `elapsed`.
    ///
    /// Returns the new played fraction when the position moved.
    pub fn advance(&mut self, elapsed: Duration) -> Option<f64> {
        if !self.playing {
            return None;
        }
        let step = Duration::try_from_secs_f64(elapsed.as_secs_f64() * f64::from(self.rate))
            .unwrap_or(self.duration);
        self.position = self.position.saturating_add(step).min(self.duration);
        if self.is_finished() {
            self.playing = false;
        }
        Some(self.played())
    }

    /// Jump forwards or backwards by `seconds`, returns the new played fraction
    pub fn seek_by(&mut self, seconds: i64) -> f64 {
        let step = Duration::from_secs(seconds.unsigned_abs());
        self.position = if seconds >= 0 {
            (self.position + step).min(self.duration)
        } else {
            self.position.saturating_sub(step)
        };
        if self.is_finished() {
            self.playing = false;
        }
        self.played()
    }

    /// "mm:ss / mm:ss" label for the player bar
    pub fn time_label(&self) -> String {
        format!("{} / {}", format_clock(self.position), format_clock(self.duration))
    }
}

fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
