//! Control table: `relTag, src, destn, relType, rate`.

use std::io::Read;
use std::path::Path;

use csv::ByteRecord;
use riskgraph_core::errors::IngestError;
use riskgraph_core::tracing::metrics;

use super::report::{IngestReport, Ingested, SkipReason};
use super::{csv_reader, for_each_record, open_csv, parse_number, required};
use crate::control::{ControlGraph, ControlLink};

const REL_TAG: usize = 0;
const SRC: usize = 1;
const DESTN: usize = 2;
const REL_TYPE: usize = 3;
const RATE: usize = 4;

/// Loads holdings; rates of 100 or more clamp to 100.
#[derive(Debug, Default)]
pub struct ControlReader;

impl ControlReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_path(&self, path: &Path) -> Result<Ingested<ControlGraph>, IngestError> {
        let mut reader = open_csv(path)?;
        self.load(&mut reader, &path.display().to_string())
    }

    pub fn read<R: Read>(&self, input: R) -> Result<Ingested<ControlGraph>, IngestError> {
        self.load(&mut csv_reader(input), "<reader>")
    }

    fn load<R: Read>(
        &self,
        reader: &mut csv::Reader<R>,
        source: &str,
    ) -> Result<Ingested<ControlGraph>, IngestError> {
        let mut graph = ControlGraph::new();
        let mut report = IngestReport::default();

        for_each_record(reader, source, |line, record| {
            report.rows_read += 1;
            match Self::row(record, line) {
                Ok(Row::Keep { src, destn, link }) => {
                    let controls = link.is_control();
                    graph.upsert_relationship(&src, &destn, link);
                    if controls {
                        if let Some(idx) = graph.get_node(&src) {
                            graph.entity_mut(idx).is_controller = true;
                        }
                    }
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
            "control table loaded"
        );
        Ok(Ingested { graph, report })
    }

    fn row(record: &ByteRecord, line: u64) -> Result<Row, IngestError> {
        let rel_tag = required(record, REL_TAG, line)?;
        let src = required(record, SRC, line)?;
        let destn = required(record, DESTN, line)?;
        let rel_type = required(record, REL_TYPE, line)?;
        let raw_rate = required(record, RATE, line)?;

        if src.is_empty() || destn.is_empty() {
            return Ok(Row::Skip(SkipReason::EmptyId));
        }
        let rate: f64 = parse_number(raw_rate.trim_end_matches('%'), line, "rate")?;
        if src == destn {
            return Ok(Row::Skip(SkipReason::SelfLoop));
        }
        let mut link = ControlLink::new(rel_type, rate);
        link.rel_tag = rel_tag;
        Ok(Row::Keep { src, destn, link })
    }
}

enum Row {
    Keep {
        src: String,
        destn: String,
        link: ControlLink,
    },
    Skip(SkipReason),
}
