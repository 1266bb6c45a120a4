//! Counter animation frames.
//!
//! The displayed number climbs linearly from 0 to the target. Each tick adds
//! `target / (duration / tick)` to an accumulator and shows its floor; once the
//! accumulator reaches the target the exact target is shown and the animation
//! is over. The web layer drives one frame per interval tick.

use std::time::Duration;

use crate::constants::{COUNTER_DURATION, COUNTER_TICK};

/// A one-shot counter animation.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    /// Animate to `target` over `duration` with the default tick.
    pub fn new(target: i64, duration: Duration) -> Self {
        Self::with_tick(target, duration, COUNTER_TICK)
    }

    /// Animate to `target` over the default duration.
    pub fn to(target: i64) -> Self {
        Self::new(target, COUNTER_DURATION)
    }

    /// Animate with an explicit tick length.
    pub fn with_tick(target: i64, duration: Duration, tick: Duration) -> Self {
        let ticks = duration.as_secs_f64() / tick.as_secs_f64().max(f64::EPSILON);
        // Zero or sub-tick durations jump straight to the target
        let increment = if ticks >= 1.0 {
            target as f64 / ticks
        } else {
            f64::INFINITY
        };
        Self {
            target,
            increment,
            current: 0.0,
            finished: false,
        }
    }

    /// The value the animation ends on.
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Whether the final frame has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one tick and return the value to display.
    ///
    /// Returns `None` once the target has been shown.
    pub fn tick(&mut self) -> Option<i64> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        // Non-positive targets and reached targets end here
        if self.current >= self.target as f64 || self.target <= 0 {
            self.finished = true;
            return Some(self.target);
        }
        Some(self.current.floor() as i64)
    }
}

impl Iterator for CounterAnimation {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.tick()
    }
}

/// Parse the text of a counter element the way the page does: leading
/// whitespace, optional sign, then digits. Anything after the digits is
/// ignored (`"42 alerts"` is 42); no digits means no counter.
pub fn parse_counter_text(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}
