//! Transaction event model: raw feed records, validated events, and the
//! per-account ordering key.

mod raw;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub use raw::{sequence, RawTransaction};

/// Opaque grouping key. All temporal features are scoped to one account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Validated transaction. Created once per run, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvent {
    /// 1-based arrival sequence number
    pub id: u64,
    pub account_id: AccountId,
    pub timestamp: DateTime<Utc>,
    /// Finite and non-negative
    pub amount: f64,
    /// Carried through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_label: Option<bool>,
}

impl TransactionEvent {
    /// Per-account processing order: time first, arrival breaks ties.
    pub fn chronological(a: &Self, b: &Self) -> Ordering {
        a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id))
    }
}
