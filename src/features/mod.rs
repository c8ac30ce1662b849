//! Rolling per-account features over trailing time windows.

mod deviation;
mod grouping;
mod pipeline;
mod sanitize;
mod window;

pub use deviation::deviation_score;
pub use grouping::{group_by_account, AccountStreams};
pub use pipeline::{EnrichmentReport, FeaturePipeline};
pub use sanitize::{non_finite_fields, sanitize};
pub use window::{WindowEngine, WindowStats};

use crate::events::TransactionEvent;
use serde::{Deserialize, Serialize};

/// A transaction plus its derived features. `None` is the missing marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub event: TransactionEvent,
    /// Minutes since the account's previous event; missing for its first
    pub time_since_last_minutes: Option<f64>,
    /// Earlier events of the account within the frequency window, excluding this one
    pub frequency_last_24h: u32,
    /// Mean amount over the stats window, this event included
    pub avg_amount_last_30d: Option<f64>,
    /// `(amount - mean) / sample std dev`; missing when the std dev is missing or zero
    pub amount_deviation_score: Option<f64>,
}

impl EnrichedEvent {
    pub(crate) fn from_window(event: TransactionEvent, stats: WindowStats) -> Self {
        let amount_deviation_score = deviation_score(event.amount, stats.mean, stats.std_dev);
        Self {
            event,
            time_since_last_minutes: stats.time_since_last_minutes,
            frequency_last_24h: stats.frequency,
            avg_amount_last_30d: Some(stats.mean),
            amount_deviation_score,
        }
    }

    pub fn id(&self) -> u64 {
        self.event.id
    }
}
