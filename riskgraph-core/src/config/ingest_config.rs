//! Ingestion configuration: row filters and column layout.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Filters applied while reading relationship tables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// Account IDs at least this long are suffix-normalized. Default: 15.
    pub id_normalize_len: Option<usize>,
    /// Replacement for the trailing two characters. Default: "00".
    pub id_suffix: Option<String>,
    /// Minimum transfer amount. Default: 90000.
    pub transfer_min_amount: Option<f64>,
    /// Minimum loan amount. Default: 100000.
    pub loan_min_amount: Option<f64>,
    /// Transfer transaction codes. Empty = compiled defaults.
    #[serde(default)]
    pub transfer_codes: Vec<String>,
    /// Loan transaction codes. Empty = compiled defaults.
    #[serde(default)]
    pub loan_codes: Vec<String>,
    /// Regex patterns on the abstract column that disqualify a loan row.
    /// Empty = compiled defaults.
    #[serde(default)]
    pub loan_excluded_abstracts: Vec<String>,
    /// Column positions in the fund-collection table.
    pub collection_columns: CollectionColumns,
}

impl IngestConfig {
    pub fn effective_id_normalize_len(&self) -> usize {
        self.id_normalize_len
            .unwrap_or(constants::DEFAULT_ID_NORMALIZE_LEN)
    }

    pub fn effective_id_suffix(&self) -> String {
        self.id_suffix
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_ID_SUFFIX.to_string())
    }

    pub fn effective_transfer_min_amount(&self) -> f64 {
        self.transfer_min_amount
            .unwrap_or(constants::DEFAULT_TRANSFER_MIN_AMOUNT)
    }

    pub fn effective_loan_min_amount(&self) -> f64 {
        self.loan_min_amount
            .unwrap_or(constants::DEFAULT_LOAN_MIN_AMOUNT)
    }

    pub fn effective_transfer_codes(&self) -> Vec<String> {
        or_defaults(&self.transfer_codes, constants::DEFAULT_TRANSFER_CODES)
    }

    pub fn effective_loan_codes(&self) -> Vec<String> {
        or_defaults(&self.loan_codes, constants::DEFAULT_LOAN_CODES)
    }

    pub fn effective_loan_excluded_abstracts(&self) -> Vec<String> {
        or_defaults(
            &self.loan_excluded_abstracts,
            constants::DEFAULT_LOAN_EXCLUDED_ABSTRACTS,
        )
    }
}

fn or_defaults(values: &[String], defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values.to_vec()
    }
}

/// Zero-based column positions in the raw fund-collection export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionColumns {
    pub own_account: usize,
    pub date: usize,
    pub code: usize,
    pub loan_flag: usize,
    pub amount: usize,
    pub abstract_text: usize,
    pub counterpart: usize,
    pub status: usize,
}

impl Default for CollectionColumns {
    fn default() -> Self {
        Self {
            own_account: 0,
            date: 1,
            code: 4,
            loan_flag: 6,
            amount: 7,
            abstract_text: 21,
            counterpart: 29,
            status: 33,
        }
    }
}

impl CollectionColumns {
    /// Highest column index referenced; shorter rows are malformed.
    pub fn max_index(&self) -> usize {
        [
            self.own_account,
            self.date,
            self.code,
            self.loan_flag,
            self.amount,
            self.abstract_text,
            self.counterpart,
            self.status,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}
