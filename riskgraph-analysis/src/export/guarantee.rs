//! Guarantee documents: one bucket per risk tag plus risk-free buckets.

use std::path::Path;

use riskgraph_core::config::ExportConfig;
use riskgraph_core::errors::ExportError;
use serde::Serialize;

use super::types::{ensure_dir, write_json, ExportSummary, GraphDocument, NodeChunker};
use crate::guarantee::{GuaranteeEntity, GuaranteeGraph, RiskTag};
use crate::pipeline::GuaranteeReport;

const MULTI_RISK_CLASSES: [&str; 3] = ["doubleRisk", "tripleRisk", "quadraRisk"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuaranteeNode {
    pub id: String,
    #[serde(rename = "Gid")]
    pub gid: usize,
    pub group: u8,
    pub class: String,
    pub ctx: String,
    pub m: f64,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuaranteeEdge {
    pub source: String,
    pub target: String,
    pub amount: f64,
}

pub type GuaranteeDocument = GraphDocument<GuaranteeNode, GuaranteeEdge>;

/// All guarantee buckets. A risky subgraph lands in every bucket whose tag
/// any of its entities carries.
#[derive(Debug, Default)]
pub struct GuaranteeDocuments {
    pub circle: GuaranteeDocument,
    pub mutual: GuaranteeDocument,
    pub cross: GuaranteeDocument,
    pub focus: GuaranteeDocument,
    /// Two-entity risk-free subgraphs, chunked.
    pub double_normal: Vec<GuaranteeDocument>,
    pub multi_normal: GuaranteeDocument,
}

fn tag_group(tag: RiskTag) -> u8 {
    match tag {
        RiskTag::Chain => 0,
        RiskTag::Mutual => 1,
        RiskTag::Focus => 2,
        RiskTag::Cross => 3,
        RiskTag::Circle => 4,
        RiskTag::Normal => 5,
    }
}

fn node(gid: usize, entity: &GuaranteeEntity) -> GuaranteeNode {
    let extra = entity.tags.len().saturating_sub(1);
    let (group, class) = if extra > 0 {
        let class = MULTI_RISK_CLASSES[extra.min(MULTI_RISK_CLASSES.len()) - 1];
        (extra as u8 + 5, class.to_string())
    } else {
        let first = entity.tags.iter().next().unwrap_or(RiskTag::Chain);
        (tag_group(first), first.name().to_string())
    };
    GuaranteeNode {
        id: entity.id.clone(),
        gid,
        group,
        class,
        ctx: entity.tags.joined(),
        m: entity.exposure,
        size: entity.weight,
    }
}

fn subgraph_document(gid: usize, graph: &GuaranteeGraph) -> GuaranteeDocument {
    GraphDocument {
        nodes: graph.entities().map(|(_, e)| node(gid, e)).collect(),
        links: graph
            .relationships()
            .map(|(u, v, link)| GuaranteeEdge {
                source: graph.key_of(u).to_string(),
                target: graph.key_of(v).to_string(),
                amount: link.amount,
            })
            .collect(),
    }
}

/// Arrange classified subgraphs into buckets.
pub fn build_guarantee_documents(report: &GuaranteeReport, config: &ExportConfig) -> GuaranteeDocuments {
    let mut docs = GuaranteeDocuments::default();
    let mut doubles = NodeChunker::new(config.effective_guarantee_chunk_nodes());

    for analyzed in &report.subgraphs {
        let graph = &analyzed.graph;
        let doc = subgraph_document(analyzed.id, graph);
        let carries = |tag: RiskTag| graph.entities().any(|(_, e)| e.tags.contains(tag));

        let mut risky = false;
        for (tag, bucket) in [
            (RiskTag::Circle, &mut docs.circle),
            (RiskTag::Mutual, &mut docs.mutual),
            (RiskTag::Cross, &mut docs.cross),
            (RiskTag::Focus, &mut docs.focus),
        ] {
            if carries(tag) {
                bucket.append_copy(&doc);
                risky = true;
            }
        }
        if risky {
            continue;
        }
        if graph.entity_count() == 2 {
            doubles.push(doc);
        } else {
            docs.multi_normal.append(doc);
        }
    }

    docs.double_normal = doubles.finish();
    docs
}

/// Write guarantee buckets under `<output_dir>/guarantee/`.
pub fn export_guarantee(
    report: &GuaranteeReport,
    config: &ExportConfig,
    output_dir: &Path,
) -> Result<ExportSummary, ExportError> {
    let docs = build_guarantee_documents(report, config);
    let dir = output_dir.join("guarantee");
    ensure_dir(&dir)?;
    let pretty = config.effective_pretty();
    let mut summary = ExportSummary::default();

    for (name, doc) in [
        ("circle.json", &docs.circle),
        ("mutual.json", &docs.mutual),
        ("cross.json", &docs.cross),
        ("focus.json", &docs.focus),
        ("multi_normal.json", &docs.multi_normal),
    ] {
        write_json(&dir, name, doc, pretty, &mut summary)?;
    }
    for (i, chunk) in docs.double_normal.iter().enumerate() {
        write_json(&dir, &format!("double_normal_{i}.json"), chunk, pretty, &mut summary)?;
    }

    tracing::info!(files = summary.file_count(), dir = %dir.display(), "guarantee export written");
    Ok(summary)
}
