//! Fund-collection table: positional columns, loan/transfer row filters.

use std::io::Read;
use std::path::Path;

use csv::ByteRecord;
use regex::RegexSet;
use riskgraph_core::config::{CollectionColumns, IngestConfig};
use riskgraph_core::errors::IngestError;
use riskgraph_core::tracing::metrics;
use riskgraph_core::types::collections::FxHashSet;

use super::normalize::normalize_account_id;
use super::report::{IngestReport, Ingested, SkipReason};
use super::{csv_reader, field, for_each_record, open_csv, parse_number};
use crate::collection::{CollectionGraph, FlowKind, Transaction};

/// Status value marking a reversed transaction.
const REVERSED_STATUS: &str = "R";

/// Loads loan and transfer rows that pass the collection filters.
///
/// A row is a transfer when its loan flag is 0, its code is a transfer code,
/// and its amount reaches the transfer minimum. Otherwise it is a loan when
/// its status is not reversed and reads 0, its amount reaches the loan
/// minimum, its code is a loan code, its loan flag is 1, and its abstract
/// matches none of the exclusion patterns. Everything else is skipped.
#[derive(Debug)]
pub struct CollectionReader {
    columns: CollectionColumns,
    id_len: usize,
    id_suffix: String,
    transfer_min: f64,
    loan_min: f64,
    transfer_codes: FxHashSet<String>,
    loan_codes: FxHashSet<String>,
    excluded: RegexSet,
}

impl CollectionReader {
    pub fn new(config: &IngestConfig) -> Result<Self, IngestError> {
        let patterns = config.effective_loan_excluded_abstracts();
        let excluded = RegexSet::new(&patterns).map_err(|e| IngestError::InvalidPattern {
            pattern: patterns.join(" | "),
            message: e.to_string(),
        })?;
        Ok(Self {
            columns: config.collection_columns,
            id_len: config.effective_id_normalize_len(),
            id_suffix: config.effective_id_suffix(),
            transfer_min: config.effective_transfer_min_amount(),
            loan_min: config.effective_loan_min_amount(),
            transfer_codes: config.effective_transfer_codes().into_iter().collect(),
            loan_codes: config.effective_loan_codes().into_iter().collect(),
            excluded,
        })
    }

    pub fn read_path(&self, path: &Path) -> Result<Ingested<CollectionGraph>, IngestError> {
        let mut reader = open_csv(path)?;
        self.load(&mut reader, &path.display().to_string())
    }

    pub fn read<R: Read>(&self, input: R) -> Result<Ingested<CollectionGraph>, IngestError> {
        self.load(&mut csv_reader(input), "<reader>")
    }

    fn load<R: Read>(
        &self,
        reader: &mut csv::Reader<R>,
        source: &str,
    ) -> Result<Ingested<CollectionGraph>, IngestError> {
        let mut graph = CollectionGraph::new();
        let mut report = IngestReport::default();

        for_each_record(reader, source, |line, record| {
            report.rows_read += 1;
            match self.row(record, line) {
                Ok(Row::Keep { from, to, tx }) => {
                    graph.add_relationship(&from, &to, tx);
                    report.rows_accepted += 1;
                }
                Ok(Row::Skip(reason)) => report.skip(reason),
                Err(e) => report.reject(e),
            }
        })?;

        tracing::info!(
            source,
            { metrics::ROWS_ACCEPTED } = report.rows_accepted,
            { metrics::ROWS_SKIPPED } = report.rows_skipped(),
            accounts = graph.entity_count(),
            "fund-collection table loaded"
        );
        Ok(Ingested { graph, report })
    }

    fn row(&self, record: &ByteRecord, line: u64) -> Result<Row, IngestError> {
        let cols = &self.columns;
        if record.len() <= cols.max_index() {
            return Err(IngestError::MissingColumn {
                line,
                column: cols.max_index(),
            });
        }
        let get = |index: usize| field(record, index).unwrap_or_default();

        let own = get(cols.own_account);
        let counterpart = get(cols.counterpart);
        if own.is_empty() || counterpart.is_empty() {
            return Ok(Row::Skip(SkipReason::EmptyId));
        }

        let code = get(cols.code);
        let flag: i64 = parse_number(&get(cols.loan_flag), line, "loan_flag")?;
        let amount: f64 = parse_number(&get(cols.amount), line, "amount")?;

        let kind = if flag == 0 && self.transfer_codes.contains(&code) && amount >= self.transfer_min {
            FlowKind::Transfer
        } else {
            let status = get(cols.status);
            if status == REVERSED_STATUS
                || amount < self.loan_min
                || !self.loan_codes.contains(&code)
                || flag != 1
            {
                return Ok(Row::Skip(SkipReason::Filtered));
            }
            let status: i64 = parse_number(&status, line, "status")?;
            if status != 0 {
                return Ok(Row::Skip(SkipReason::Filtered));
            }
            if self.excluded.is_match(&get(cols.abstract_text)) {
                return Ok(Row::Skip(SkipReason::ExcludedAbstract));
            }
            FlowKind::Loan
        };

        let day: u32 = parse_number(&get(cols.date), line, "date")?;
        let from = normalize_account_id(&own, self.id_len, &self.id_suffix);
        let to = normalize_account_id(&counterpart, self.id_len, &self.id_suffix);
        if from == to {
            return Ok(Row::Skip(SkipReason::SelfLoop));
        }

        Ok(Row::Keep {
            from,
            to,
            tx: Transaction {
                amount,
                day,
                kind,
                code,
            },
        })
    }
}

enum Row {
    Keep {
        from: String,
        to: String,
        tx: Transaction,
    },
    Skip(SkipReason),
}
