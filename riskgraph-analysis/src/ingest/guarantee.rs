//! Guarantee table: `src, destn, time, guarType, amount`.

use std::io::Read;
use std::path::Path;

use csv::ByteRecord;
use riskgraph_core::errors::IngestError;
use riskgraph_core::tracing::metrics;

use super::report::{IngestReport, Ingested, SkipReason};
use super::{csv_reader, for_each_record, open_csv, parse_number, required};
use crate::guarantee::{GuaranteeGraph, GuaranteeLink};

const SRC: usize = 0;
const DESTN: usize = 1;
const TIME: usize = 2;
const GUAR_TYPE: usize = 3;
const AMOUNT: usize = 4;

/// Loads guarantees as a simple digraph: a repeated pair keeps the last row.
#[derive(Debug, Default)]
pub struct GuaranteeReader;

impl GuaranteeReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_path(&self, path: &Path) -> Result<Ingested<GuaranteeGraph>, IngestError> {
        let mut reader = open_csv(path)?;
        self.load(&mut reader, &path.display().to_string())
    }

    pub fn read<R: Read>(&self, input: R) -> Result<Ingested<GuaranteeGraph>, IngestError> {
        self.load(&mut csv_reader(input), "<reader>")
    }

    fn load<R: Read>(
        &self,
        reader: &mut csv::Reader<R>,
        source: &str,
    ) -> Result<Ingested<GuaranteeGraph>, IngestError> {
        let mut graph = GuaranteeGraph::new();
        let mut report = IngestReport::default();

        for_each_record(reader, source, |line, record| {
            report.rows_read += 1;
            match Self::row(record, line) {
                Ok(Row::Keep { src, destn, link }) => {
                    graph.upsert_relationship(&src, &destn, link);
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
            entities = graph.entity_count(),
            "guarantee table loaded"
        );
        Ok(Ingested { graph, report })
    }

    fn row(record: &ByteRecord, line: u64) -> Result<Row, IngestError> {
        let src = required(record, SRC, line)?;
        let destn = required(record, DESTN, line)?;
        let time = required(record, TIME, line)?;
        let declared_type = required(record, GUAR_TYPE, line)?;
        let raw_amount = required(record, AMOUNT, line)?;

        if src.is_empty() || destn.is_empty() {
            return Ok(Row::Skip(SkipReason::EmptyId));
        }
        let amount: f64 = parse_number(&raw_amount, line, "amount")?;
        if amount == 0.0 {
            return Ok(Row::Skip(SkipReason::ZeroAmount));
        }
        if src == destn {
            return Ok(Row::Skip(SkipReason::SelfLoop));
        }
        Ok(Row::Keep {
            src,
            destn,
            link: GuaranteeLink {
                declared_type,
                time,
                amount,
            },
        })
    }
}

enum Row {
    Keep {
        src: String,
        destn: String,
        link: GuaranteeLink,
    },
    Skip(SkipReason),
}
