//! View model builder
//!
//! Derives the display-ready values for one selected district: summary
//! numbers, the Hindi summary sentences, the six-month trend, and the
//! top-5 ranking. Everything here is plain data so any rendering layer
//! can consume it without touching the resolver or the dataset directly.

use serde::Serialize;

use crate::data::{Dataset, TREND_MONTHS};

/// Fixed state used for the top-5 district ranking
pub const RANKING_STATE: &str = "Uttar Pradesh";

/// Number of districts shown in the ranking
pub const RANKING_SIZE: usize = 5;

/// Display-ready summary for one selected district
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// The selected district
    pub district: String,
    /// Workers employed this month
    pub total_workers: u64,
    /// Funds spent this month, in rupees
    pub total_funds: f64,
    /// Jobs created this month
    pub jobs_created: u64,
    /// Jobs created over the six preceding months, oldest first
    pub trend: [u64; TREND_MONTHS],
    /// Hindi summary sentence for workers
    pub workers_sentence: String,
    /// Hindi summary sentence for funds
    pub funds_sentence: String,
    /// Hindi summary sentence for jobs
    pub jobs_sentence: String,
    /// Top districts by jobs created within the ranking state
    pub top_five: Vec<RankEntry>,
}

/// One entry in the top-5 ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    /// District name
    pub district: String,
    /// Jobs created this month
    pub jobs_created: u64,
}

impl ViewModel {
    /// Text handed to the speech engine: the three summary sentences
    /// joined by ". ".
    pub fn read_aloud_text(&self) -> String {
        format!(
            "{}. {}. {}",
            self.workers_sentence, self.funds_sentence, self.jobs_sentence
        )
    }
}

/// Builds the view model for a district, or `None` if the district is not
/// in the dataset (exact, case-sensitive match). On `None` the caller must
/// keep showing the previously built view model.
pub fn build(dataset: &Dataset, district: &str) -> Option<ViewModel> {
    let record = dataset.find_district(district)?;

    let workers_str = format_indian(record.total_workers);
    let funds_str = format_indian_f64(record.total_funds);
    let jobs_str = format_indian(record.jobs_created);

    Some(ViewModel {
        district: record.district.clone(),
        total_workers: record.total_workers,
        total_funds: record.total_funds,
        jobs_created: record.jobs_created,
        trend: record.trend,
        workers_sentence: format!(
            "Is mahine me {} me {} logon ko kaam mila.",
            record.district, workers_str
        ),
        funds_sentence: format!("Is mahine me {} rupaye kharch hue.", funds_str),
        jobs_sentence: format!("Is mahine me {} logon ko kaam mila.", jobs_str),
        top_five: top_five(dataset),
    })
}

/// Unique district names across the dataset, sorted ascending
///
/// The first entry is the default selection when nothing is chosen yet.
pub fn district_choices(dataset: &Dataset) -> Vec<String> {
    let mut districts: Vec<String> = dataset
        .records
        .iter()
        .map(|r| r.district.clone())
        .collect();
    districts.sort();
    districts.dedup();
    districts
}

/// Top districts in [`RANKING_STATE`] by jobs created, descending
///
/// The sort is stable: records with equal job counts keep their original
/// dataset order.
pub fn top_five(dataset: &Dataset) -> Vec<RankEntry> {
    let mut ranked: Vec<&crate::data::Record> = dataset
        .records
        .iter()
        .filter(|r| r.state == RANKING_STATE)
        .collect();
    ranked.sort_by(|a, b| b.jobs_created.cmp(&a.jobs_created));
    ranked
        .into_iter()
        .take(RANKING_SIZE)
        .map(|r| RankEntry {
            district: r.district.clone(),
            jobs_created: r.jobs_created,
        })
        .collect()
}

/// Whether a district name matches a search query
///
/// A name matches if it contains the query as a case-insensitive
/// substring; the empty query matches everything. Non-matching entries
/// are hidden from the selection list, never removed.
pub fn matches_search(district: &str, query: &str) -> bool {
    district.to_lowercase().contains(&query.to_lowercase())
}

/// Formats an integer with Indian digit grouping (e.g. 1234567 -> "12,34,567")
pub fn format_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_bytes = head.as_bytes();
    let mut end = head_bytes.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Formats a rupee amount with Indian digit grouping, keeping two decimal
/// places only when the rounded amount is fractional
///
/// Rounds to whole paise first so amounts like 1500.999 carry into the
/// rupee part instead of producing a three-digit paise field.
pub fn format_indian_f64(amount: f64) -> String {
    let paise = (amount * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;
    if fraction == 0 {
        format_indian(rupees)
    } else {
        format!("{}.{:02}", format_indian(rupees), fraction)
    }
}
