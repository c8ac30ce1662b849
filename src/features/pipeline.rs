//! Feature pipeline: raw records → validated events → per-account streams →
//! window stats → deviation score → sanitized enriched events.

use super::{group_by_account, non_finite_fields, sanitize, EnrichedEvent, WindowEngine};
use crate::config::{FeaturesConfig, OutputOrder};
use crate::error::MalformedRecord;
use crate::events::{sequence, AccountId, RawTransaction, TransactionEvent};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Outcome of one run over a raw feed.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentReport {
    pub enriched: Vec<EnrichedEvent>,
    /// Records refused before grouping, in feed order
    pub rejected: Vec<MalformedRecord>,
}

pub struct FeaturePipeline {
    config: FeaturesConfig,
    engine: WindowEngine,
}

impl FeaturePipeline {
    pub fn new(config: FeaturesConfig) -> Self {
        let engine = WindowEngine::new(&config);
        Self { config, engine }
    }

    pub fn config(&self) -> &FeaturesConfig {
        &self.config
    }

    /// Number the feed by arrival, reject malformed records, enrich the rest.
    pub fn run(&self, raws: Vec<RawTransaction>) -> EnrichmentReport {
        let total = raws.len();
        let (events, rejected) = sequence(raws, self.config.epoch);
        for r in &rejected {
            warn!(id = r.id, reason = %r.reason, "rejected record");
        }

        let enriched = self.enrich(events);
        info!(
            records = total,
            enriched = enriched.len(),
            rejected = rejected.len(),
            "feature run complete"
        );
        EnrichmentReport { enriched, rejected }
    }

    /// Enrich already validated events. Ids must be unique.
    pub fn enrich(&self, events: Vec<TransactionEvent>) -> Vec<EnrichedEvent> {
        let streams = group_by_account(events).into_streams();
        debug!(accounts = streams.len(), parallel = self.config.parallel, "grouped events");

        let per_account: Vec<Vec<EnrichedEvent>> = if self.config.parallel {
            streams
                .into_par_iter()
                .map(|(account, stream)| self.enrich_account(&account, stream))
                .collect()
        } else {
            streams
                .into_iter()
                .map(|(account, stream)| self.enrich_account(&account, stream))
                .collect()
        };

        let mut out: Vec<EnrichedEvent> = per_account.into_iter().flatten().collect();
        if self.config.output_order == OutputOrder::Arrival {
            out.sort_by_key(EnrichedEvent::id);
        }
        out
    }

    fn enrich_account(&self, account: &AccountId, stream: Vec<TransactionEvent>) -> Vec<EnrichedEvent> {
        let stats = self.engine.compute(&stream);
        let mut rewritten = 0usize;
        let out: Vec<EnrichedEvent> = stream
            .into_iter()
            .zip(stats)
            .map(|(event, stats)| {
                let enriched = EnrichedEvent::from_window(event, stats);
                rewritten += non_finite_fields(&enriched);
                sanitize(enriched)
            })
            .collect();
        if rewritten > 0 {
            debug!(account = %account, rewritten, "non-finite features set to missing");
        }
        debug!(account = %account, events = out.len(), "account enriched");
        out
    }
}
