//! Human-readable or JSON log lines (one object per line) for batch runs.

use crate::config::LogConfig;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Final line of a run, written outside of tracing so it survives any filter.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub ts: String,
    pub input: &'a str,
    pub output: &'a str,
    pub records: usize,
    pub enriched: usize,
    pub rejected: usize,
    pub accounts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_rejection: Option<String>,
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber on stderr. `RUST_LOG` overrides
    /// `config.level`; an unparsable level falls back to `info`.
    ///
    /// Returns false if a subscriber was already installed.
    pub fn init(config: &LogConfig) -> bool {
        let filter = Self::filter(config);
        let stderr = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        let installed = if config.json {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr.json().flatten_event(true))
                .try_init()
        } else {
            tracing_subscriber::registry().with(filter).with(stderr).try_init()
        };
        installed.is_ok()
    }

    fn filter(config: &LogConfig) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Write `event` as a single JSON line, bypassing tracing.
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        serde_json::to_writer(&mut *w, event)?;
        writeln!(w)
    }
}
