//! Fund-collection documents: chunked account graphs, the pattern graph,
//! and the flat answer list of pattern accounts.

use std::path::Path;

use riskgraph_core::config::ExportConfig;
use riskgraph_core::errors::ExportError;
use serde::Serialize;

use super::types::{ensure_dir, write_json, ExportSummary, GraphDocument, NodeChunker};
use crate::collection::{role_listing, CollectionGraph, PatternGraph, PatternRole};
use crate::pipeline::CollectionReport;

/// Fixed display size of pattern accounts.
const PATTERN_NODE_SIZE: f64 = 9.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountNode {
    pub id: String,
    #[serde(rename = "Gid")]
    pub gid: usize,
    pub group: u8,
    pub class: &'static str,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionEdge {
    pub source: String,
    pub target: String,
    pub date: u32,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternNode {
    pub id: String,
    #[serde(rename = "Gid")]
    pub gid: usize,
    pub group: u8,
    pub class: &'static str,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternEdge {
    pub source: String,
    pub target: String,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnswerList {
    pub list: Vec<String>,
}

pub type AccountDocument = GraphDocument<AccountNode, TransactionEdge>;
pub type PatternDocument = GraphDocument<PatternNode, PatternEdge>;

#[derive(Debug, Default)]
pub struct CollectionDocuments {
    pub all: Vec<AccountDocument>,
    pub pattern: PatternDocument,
    pub answer: AnswerList,
}

fn account_document(gid: usize, graph: &CollectionGraph) -> AccountDocument {
    GraphDocument {
        nodes: graph
            .entities()
            .map(|(_, account)| {
                let (group, class) = if account.net_inflow >= 0.0 {
                    (3, "pos")
                } else {
                    (4, "neg")
                };
                AccountNode {
                    id: account.id.clone(),
                    gid,
                    group,
                    class,
                    size: account.weight,
                }
            })
            .collect(),
        links: graph
            .relationships()
            .map(|(u, v, tx)| TransactionEdge {
                source: graph.key_of(u).to_string(),
                target: graph.key_of(v).to_string(),
                date: tx.day,
                width: tx.width(),
            })
            .collect(),
    }
}

fn role_group(role: PatternRole) -> u8 {
    match role {
        PatternRole::Origin => 0,
        PatternRole::PassThrough => 1,
        PatternRole::Recipient => 2,
    }
}

fn pattern_document(first_gid: usize, pattern: &PatternGraph) -> PatternDocument {
    GraphDocument {
        nodes: pattern
            .entities()
            .enumerate()
            .map(|(i, (_, entity))| {
                let role = entity.display_role().unwrap_or(PatternRole::Recipient);
                PatternNode {
                    id: entity.id.clone(),
                    gid: first_gid + i,
                    group: role_group(role),
                    class: role.class_name(),
                    size: PATTERN_NODE_SIZE,
                }
            })
            .collect(),
        links: pattern
            .relationships()
            .map(|(u, v, tx)| PatternEdge {
                source: pattern.key_of(u).to_string(),
                target: pattern.key_of(v).to_string(),
                width: tx.width(),
            })
            .collect(),
    }
}

pub fn build_collection_documents(report: &CollectionReport, config: &ExportConfig) -> CollectionDocuments {
    let mut chunker = NodeChunker::new(config.effective_collection_chunk_nodes());
    for analyzed in &report.subgraphs {
        chunker.push(account_document(analyzed.id, &analyzed.graph));
    }
    let first_pattern_gid = report.subgraphs.last().map_or(0, |a| a.id + 1);

    CollectionDocuments {
        all: chunker.finish(),
        pattern: pattern_document(first_pattern_gid, &report.pattern),
        answer: AnswerList {
            list: role_listing(&report.pattern),
        },
    }
}

/// Write fund-collection documents under `<output_dir>/collection/`.
pub fn export_collection(
    report: &CollectionReport,
    config: &ExportConfig,
    output_dir: &Path,
) -> Result<ExportSummary, ExportError> {
    let docs = build_collection_documents(report, config);
    let dir = output_dir.join("collection");
    ensure_dir(&dir)?;
    let pretty = config.effective_pretty();
    let mut summary = ExportSummary::default();

    for (i, chunk) in docs.all.iter().enumerate() {
        write_json(&dir, &format!("all_{i}.json"), chunk, pretty, &mut summary)?;
    }
    write_json(&dir, "pattern.json", &docs.pattern, pretty, &mut summary)?;
    write_json(&dir, "answer.json", &docs.answer, pretty, &mut summary)?;

    tracing::info!(files = summary.file_count(), dir = %dir.display(), "collection export written");
    Ok(summary)
}
