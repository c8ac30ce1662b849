//! Trailing time-window statistics over one account's ordered events.
//!
//! Both window boundaries only ever move forward, so a stream of `n` events
//! is processed in O(n): every event enters each window once and leaves it
//! at most once.

use crate::config::FeaturesConfig;
use crate::events::TransactionEvent;
use chrono::{DateTime, Duration, Utc};

/// Window outputs for one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub time_since_last_minutes: Option<f64>,
    /// Events strictly before this one with timestamp in `(t - W_freq, t]`
    pub frequency: u32,
    /// Mean amount over `(t - W_stats, t]`, this event included
    pub mean: f64,
    /// Sample standard deviation over the same window; `None` below two events
    pub std_dev: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct WindowEngine {
    frequency: Duration,
    stats: Duration,
}

impl WindowEngine {
    pub fn new(config: &FeaturesConfig) -> Self {
        Self::with_windows(config.frequency_window(), config.stats_window())
    }

    pub fn with_windows(frequency: Duration, stats: Duration) -> Self {
        Self { frequency, stats }
    }

    /// `events` must be one account's stream in `(timestamp, id)` order.
    pub fn compute(&self, events: &[TransactionEvent]) -> Vec<WindowStats> {
        let mut out = Vec::with_capacity(events.len());
        let mut window = SlidingMoments::default();
        let mut lo_freq = 0usize;
        let mut lo_stats = 0usize;

        for (i, ev) in events.iter().enumerate() {
            let t = ev.timestamp;

            let time_since_last_minutes = i
                .checked_sub(1)
                .map(|p| minutes_between(events[p].timestamp, t));

            if let Some(cutoff) = t.checked_sub_signed(self.frequency) {
                while lo_freq < i && events[lo_freq].timestamp <= cutoff {
                    lo_freq += 1;
                }
            }

            if let Some(cutoff) = t.checked_sub_signed(self.stats) {
                while lo_stats < i && events[lo_stats].timestamp <= cutoff {
                    window.pop_oldest();
                    lo_stats += 1;
                }
            }
            window.push(ev.amount);

            let moments = window.total();
            out.push(WindowStats {
                time_since_last_minutes,
                frequency: (i - lo_freq) as u32,
                mean: moments.mean,
                std_dev: moments.sample_std_dev(),
            });
        }
        out
    }
}

fn minutes_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 60_000.0
}

/// Count, mean and sum of squared deviations of a set of amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Moments {
    n: usize,
    mean: f64,
    m2: f64,
}

impl Moments {
    fn of(x: f64) -> Self {
        Self { n: 1, mean: x, m2: 0.0 }
    }

    /// Moments of the union of two disjoint sets (Chan et al. pairwise update).
    fn merge(self, other: Self) -> Self {
        if self.n == 0 {
            return other;
        }
        if other.n == 0 {
            return self;
        }
        let n = self.n + other.n;
        let (na, nb) = (self.n as f64, other.n as f64);
        let delta = other.mean - self.mean;
        Self {
            n,
            mean: self.mean + delta * (nb / n as f64),
            m2: self.m2 + other.m2 + delta * delta * (na * nb / n as f64),
        }
    }

    fn sample_std_dev(&self) -> Option<f64> {
        if self.n < 2 {
            return None;
        }
        Some((self.m2 / (self.n - 1) as f64).sqrt())
    }
}

/// FIFO of amounts whose moments are kept as a two-stack aggregate.
///
/// Newer amounts go on `back` with a running aggregate; `front` holds the
/// oldest amounts, each entry carrying the moments of itself and every newer
/// entry below it. Evicting pops `front`, refilling it from `back` when empty.
/// Moments are only ever merged, never subtracted, so an evicted amount leaves
/// nothing behind in the aggregate of what remains. Amortized O(1) per amount.
#[derive(Debug, Default)]
struct SlidingMoments {
    front: Vec<Moments>,
    back: Vec<f64>,
    back_total: Moments,
}

impl SlidingMoments {
    fn push(&mut self, x: f64) {
        self.back.push(x);
        self.back_total = self.back_total.merge(Moments::of(x));
    }

    fn pop_oldest(&mut self) {
        if self.front.is_empty() {
            while let Some(x) = self.back.pop() {
                let below = self.front.last().copied().unwrap_or_default();
                self.front.push(Moments::of(x).merge(below));
            }
            self.back_total = Moments::default();
        }
        self.front.pop();
    }

    fn total(&self) -> Moments {
        self.front
            .last()
            .copied()
            .unwrap_or_default()
            .merge(self.back_total)
    }
}
