//! Raw feed records and their validation into [`TransactionEvent`]s.

use super::{AccountId, TransactionEvent};
use crate::error::{MalformedReason, MalformedRecord};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Record as supplied by the feed. Nothing is trusted yet.
///
/// Time is given either as an absolute `timestamp` or as an integer `step`
/// counting whole days from the configured epoch; `timestamp` wins when both
/// are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub account_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub step: Option<i64>,
    pub amount: Option<f64>,
    pub fraud_label: Option<bool>,
}

impl RawTransaction {
    pub fn at(account_id: impl Into<String>, timestamp: DateTime<Utc>, amount: f64) -> Self {
        Self {
            account_id: Some(account_id.into()),
            timestamp: Some(timestamp),
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn at_step(account_id: impl Into<String>, step: i64, amount: f64) -> Self {
        Self {
            account_id: Some(account_id.into()),
            step: Some(step),
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, fraud: bool) -> Self {
        self.fraud_label = Some(fraud);
        self
    }

    /// Validate into an event carrying `id`.
    pub fn validate(self, id: u64, epoch: DateTime<Utc>) -> Result<TransactionEvent, MalformedRecord> {
        let reject = |reason| MalformedRecord { id, reason };

        let account_id = match self.account_id {
            Some(a) if !a.is_empty() => AccountId::new(a),
            _ => return Err(reject(MalformedReason::MissingField("account_id"))),
        };

        let timestamp = match (self.timestamp, self.step) {
            (Some(ts), _) => ts,
            (None, Some(step)) => step_to_timestamp(epoch, step)
                .ok_or_else(|| reject(MalformedReason::TimestampOutOfRange(step)))?,
            (None, None) => return Err(reject(MalformedReason::MissingField("timestamp"))),
        };

        let amount = self
            .amount
            .ok_or_else(|| reject(MalformedReason::MissingField("amount")))?;
        if !amount.is_finite() {
            return Err(reject(MalformedReason::NonFiniteAmount));
        }
        if amount < 0.0 {
            return Err(reject(MalformedReason::NegativeAmount(amount)));
        }

        Ok(TransactionEvent {
            id,
            account_id,
            timestamp,
            amount,
            fraud_label: self.fraud_label,
        })
    }
}

/// `epoch + step days`, or `None` if that instant is unrepresentable.
fn step_to_timestamp(epoch: DateTime<Utc>, step: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(step).and_then(|d| epoch.checked_add_signed(d))
}

/// Number records 1.. in arrival order and validate each one.
///
/// A rejected record keeps its sequence number, so ids of accepted events
/// still identify their position in the feed.
pub fn sequence<I>(raws: I, epoch: DateTime<Utc>) -> (Vec<TransactionEvent>, Vec<MalformedRecord>)
where
    I: IntoIterator<Item = RawTransaction>,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (idx, raw) in raws.into_iter().enumerate() {
        match raw.validate(idx as u64 + 1, epoch) {
            Ok(ev) => accepted.push(ev),
            Err(e) => rejected.push(e),
        }
    }
    (accepted, rejected)
}
