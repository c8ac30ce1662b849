//! txn-features — per-account rolling behavioral features for fraud scoring.
//!
//! Modular structure:
//! - [`events`] — Raw feed records, validation, validated transaction events
//! - [`features`] — Grouping, trailing-window engine, deviation score, sanitizer, pipeline
//! - [`paysim`] — PaySim CSV adapter (outside the feature core)
//! - [`config`] — JSON run configuration
//! - [`error`] — Malformed record and adapter errors
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod events;
pub mod features;
pub mod logging;
pub mod paysim;

pub use config::{Config, FeaturesConfig, OutputOrder};
pub use error::{ConfigError, MalformedReason, MalformedRecord, PaySimError};
pub use events::{AccountId, RawTransaction, TransactionEvent};
pub use features::{EnrichedEvent, EnrichmentReport, FeaturePipeline};
pub use logging::StructuredLogger;
