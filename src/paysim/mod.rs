//! PaySim CSV adapter: reads the simulator's feed, runs the feature
//! pipeline, and writes the flat transformed export.
//!
//! The feature core never sees PaySim columns; records are joined back to
//! their enriched events by arrival id.

mod office;

pub use office::{FixedOffice, OfficeIdSource, RandomOffices, OFFICE_ID_MAX, OFFICE_ID_MIN};

use crate::config::PaySimConfig;
use crate::error::{MalformedRecord, PaySimError};
use crate::events::RawTransaction;
use crate::features::{EnrichedEvent, FeaturePipeline};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// One row of the PaySim feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaySimRecord {
    pub step: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Option<f64>,
    #[serde(rename = "nameOrig")]
    pub name_orig: Option<String>,
    #[serde(rename = "oldbalanceOrg")]
    pub old_balance_orig: Option<f64>,
    #[serde(rename = "newbalanceOrig")]
    pub new_balance_orig: Option<f64>,
    #[serde(rename = "nameDest")]
    pub name_dest: Option<String>,
    #[serde(rename = "oldbalanceDest")]
    pub old_balance_dest: Option<f64>,
    #[serde(rename = "newbalanceDest")]
    pub new_balance_dest: Option<f64>,
    #[serde(rename = "isFraud")]
    pub is_fraud: Option<u8>,
    #[serde(rename = "isFlaggedFraud")]
    pub is_flagged_fraud: Option<u8>,
}

impl PaySimRecord {
    /// Originating account is the grouping key; `step` counts days.
    pub fn to_raw(&self) -> RawTransaction {
        RawTransaction {
            account_id: self.name_orig.clone(),
            timestamp: None,
            step: self.step,
            amount: self.amount,
            fraud_label: self.is_fraud.map(|f| f != 0),
        }
    }
}

/// Output row, columns in export order. `None` renders as an empty field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedRecord {
    pub transaction_id: u64,
    pub client_id: String,
    pub account_id: String,
    pub account_type: String,
    pub office_id: u16,
    pub transaction_type: String,
    pub amount: f64,
    pub running_balance: Option<f64>,
    pub currency_code: String,
    pub transaction_datetime: String,
    pub day_of_week: String,
    pub hour_of_day: u32,
    pub time_since_last_txn_mins: Option<f64>,
    pub txn_frequency_last_24h: u32,
    pub avg_amount_last_30d: Option<f64>,
    pub amount_dev_score: Option<f64>,
    pub fraud: Option<u8>,
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Default)]
pub struct PaySimOutput {
    pub rows: Vec<TransformedRecord>,
    pub rejected: Vec<MalformedRecord>,
    pub accounts: usize,
}

pub struct PaySimTransform<S> {
    config: PaySimConfig,
    pipeline: FeaturePipeline,
    offices: S,
}

impl<S: OfficeIdSource> PaySimTransform<S> {
    pub fn new(config: PaySimConfig, pipeline: FeaturePipeline, offices: S) -> Self {
        Self {
            config,
            pipeline,
            offices,
        }
    }

    /// Enrich `records`; output rows follow the pipeline's configured order.
    pub fn transform(&mut self, records: &[PaySimRecord]) -> PaySimOutput {
        // One draw per feed row, in feed order, rejected rows included.
        let offices: Vec<u16> = records.iter().map(|_| self.offices.next_office_id()).collect();

        let report = self.pipeline.run(records.iter().map(PaySimRecord::to_raw).collect());
        let accounts = report
            .enriched
            .iter()
            .map(|e| e.event.account_id.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let rows = report
            .enriched
            .iter()
            .map(|e| {
                let idx = (e.id() - 1) as usize;
                self.row(&records[idx], offices[idx], e)
            })
            .collect();

        PaySimOutput {
            rows,
            rejected: report.rejected,
            accounts,
        }
    }

    fn row(&self, record: &PaySimRecord, office_id: u16, e: &EnrichedEvent) -> TransformedRecord {
        let ts = e.event.timestamp;
        let account = e.event.account_id.to_string();
        TransformedRecord {
            transaction_id: e.id(),
            client_id: account.clone(),
            account_id: account,
            account_type: self.config.account_type.clone(),
            office_id,
            transaction_type: record.kind.clone(),
            amount: e.event.amount,
            running_balance: record.new_balance_orig,
            currency_code: self.config.currency_code.clone(),
            transaction_datetime: ts.format(DATETIME_FORMAT).to_string(),
            day_of_week: ts.format("%A").to_string(),
            hour_of_day: ts.hour(),
            time_since_last_txn_mins: e.time_since_last_minutes,
            txn_frequency_last_24h: e.frequency_last_24h,
            avg_amount_last_30d: e.avg_amount_last_30d,
            amount_dev_score: e.amount_deviation_score,
            fraud: e.event.fraud_label.map(u8::from),
        }
    }
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<PaySimRecord>, PaySimError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records = rdr
        .deserialize()
        .collect::<Result<Vec<PaySimRecord>, csv::Error>>()?;
    Ok(records)
}

/// Header of the transformed export, in [`TransformedRecord`] field order.
pub const EXPORT_COLUMNS: [&str; 17] = [
    "transaction_id",
    "client_id",
    "account_id",
    "account_type",
    "office_id",
    "transaction_type",
    "amount",
    "running_balance",
    "currency_code",
    "transaction_datetime",
    "day_of_week",
    "hour_of_day",
    "time_since_last_txn_mins",
    "txn_frequency_last_24h",
    "avg_amount_last_30d",
    "amount_dev_score",
    "fraud",
];

/// Write the export. An empty `rows` still produces the header line.
pub fn write_rows<W: Write>(writer: W, rows: &[TransformedRecord]) -> Result<(), PaySimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        wtr.write_record(EXPORT_COLUMNS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_file(path: &Path) -> Result<Vec<PaySimRecord>, PaySimError> {
    let records = read_records(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), records = records.len(), "loaded PaySim feed");
    Ok(records)
}

pub fn write_file(path: &Path, rows: &[TransformedRecord]) -> Result<(), PaySimError> {
    write_rows(BufWriter::new(File::create(path)?), rows)?;
    info!(path = %path.display(), rows = rows.len(), "wrote transformed export");
    Ok(())
}
