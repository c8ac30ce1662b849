//! Error types.
//!
//! Only malformed input is an error. Degenerate windows and non-finite
//! arithmetic resolve to the missing marker inside the feature pipeline.

use thiserror::Error;

/// Why a raw record was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedReason {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("negative amount {0}")]
    NegativeAmount(f64),

    #[error("amount is not a finite number")]
    NonFiniteAmount,

    #[error("step {0} is outside the representable time range")]
    TimestampOutOfRange(i64),
}

/// A single rejected record. Scoped to that record; siblings are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed record {id}: {reason}")]
pub struct MalformedRecord {
    pub id: u64,
    #[source]
    pub reason: MalformedReason,
}

/// A configuration value that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("`{name}` must be a positive number of seconds within range, got {secs}")]
    InvalidWindow { name: &'static str, secs: i64 },
}

/// Errors from the PaySim CSV adapter.
#[derive(Debug, Error)]
pub enum PaySimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_record_display() {
        let err = MalformedRecord {
            id: 42,
            reason: MalformedReason::MissingField("amount"),
        };
        assert_eq!(err.to_string(), "malformed record 42: missing field `amount`");
    }

    #[test]
    fn invalid_window_display() {
        let err = ConfigError::InvalidWindow {
            name: "stats_window_secs",
            secs: -5,
        };
        assert_eq!(
            err.to_string(),
            "`stats_window_secs` must be a positive number of seconds within range, got -5"
        );
    }

    #[test]
    fn negative_amount_display() {
        let err = MalformedRecord {
            id: 3,
            reason: MalformedReason::NegativeAmount(-1.5),
        };
        assert_eq!(err.to_string(), "malformed record 3: negative amount -1.5");
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MalformedRecord>();
        assert_send_sync::<PaySimError>();
    }
}
