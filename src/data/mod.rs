//! Core data models for the MGNREGA district dashboard
//!
//! This module contains the record and dataset types used throughout the
//! application, along with validation of raw records as they arrive from
//! the wire.

pub mod fetch;

pub use fetch::{DataClient, DataError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of months covered by a record's trend series
pub const TREND_MONTHS: usize = 6;

/// One district-month snapshot of scheme statistics
///
/// Only constructed through [`RawRecord::validate`], so every field is
/// guaranteed present and the trend has exactly [`TREND_MONTHS`] entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// District name, non-empty, unique per state and period
    pub district: String,
    /// State the district belongs to
    pub state: String,
    /// Workers employed under the scheme this month
    pub total_workers: u64,
    /// Funds spent this month, in rupees
    pub total_funds: f64,
    /// Jobs created this month
    pub jobs_created: u64,
    /// Jobs created over the six preceding months, oldest first
    pub trend: [u64; TREND_MONTHS],
}

/// A record as it arrives from the API, before validation
///
/// The upstream endpoint omits fields freely, so everything is optional
/// here. Records that fail validation are dropped from the dataset rather
/// than propagating missing values into the ranking and selection lists.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub district: Option<String>,
    pub state: Option<String>,
    pub total_workers: Option<u64>,
    pub total_funds: Option<f64>,
    pub jobs_created: Option<u64>,
    pub trend: Option<Vec<u64>>,
}

impl RawRecord {
    /// Validates the raw record, returning `None` if any field is missing,
    /// the district name is empty, or the trend is not exactly six months.
    pub fn validate(self) -> Option<Record> {
        let district = self.district.filter(|d| !d.is_empty())?;
        let state = self.state?;
        let total_workers = self.total_workers?;
        let total_funds = self.total_funds.filter(|f| *f >= 0.0)?;
        let jobs_created = self.jobs_created?;
        let trend: [u64; TREND_MONTHS] = self.trend?.try_into().ok()?;

        Some(Record {
            district,
            state,
            total_workers,
            total_funds,
            jobs_created,
            trend,
        })
    }
}

/// Provenance of a dataset, indicating how fresh it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Fetched from the remote API during this session
    Remote,
    /// Read back from the on-disk cache after a failed fetch
    Cache,
    /// Loaded from the sample data bundled with the binary
    Bundled,
}

impl SourceKind {
    /// Whether this source should show the offline/stale data banner
    pub fn is_offline(&self) -> bool {
        !matches!(self, SourceKind::Remote)
    }
}

/// A full collection of validated records plus fetch metadata
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Validated records, in original API order
    pub records: Vec<Record>,
    /// When the records were obtained from the remote API
    pub fetched_at: DateTime<Utc>,
    /// Where the records came from
    pub source: SourceKind,
}

impl Dataset {
    /// Builds a dataset by validating raw records, dropping malformed ones
    pub fn from_raw(raw: Vec<RawRecord>, fetched_at: DateTime<Utc>, source: SourceKind) -> Self {
        let records = raw.into_iter().filter_map(RawRecord::validate).collect();
        Self {
            records,
            fetched_at,
            source,
        }
    }

    /// Finds the record for a district by exact, case-sensitive name match
    pub fn find_district(&self, district: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.district == district)
    }
}
