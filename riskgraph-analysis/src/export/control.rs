//! Control documents: controller and cross-holding buckets, chunked
//! double and multi buckets for the rest.

use std::path::Path;

use riskgraph_core::config::ExportConfig;
use riskgraph_core::errors::ExportError;
use serde::Serialize;

use super::types::{ensure_dir, write_json, ExportSummary, GraphDocument, NodeChunker};
use crate::control::{ControlEntity, ControlGraph};
use crate::pipeline::ControlReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlNode {
    pub id: String,
    #[serde(rename = "Gid")]
    pub gid: usize,
    pub group: u8,
    pub class: &'static str,
    pub size: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingEdge {
    pub source: String,
    pub target: String,
    pub rate: String,
}

pub type ControlDocument = GraphDocument<ControlNode, HoldingEdge>;

#[derive(Debug, Default)]
pub struct ControlDocuments {
    pub control: ControlDocument,
    pub cross: ControlDocument,
    pub double: Vec<ControlDocument>,
    pub multi: Vec<ControlDocument>,
}

/// Controller beats cross-held beats root.
fn classify(entity: &ControlEntity) -> (u8, &'static str, u8) {
    if entity.is_controller {
        (0, "control", 5)
    } else if entity.is_cross_held {
        (1, "cross", 3)
    } else if entity.is_root {
        (2, "root", 3)
    } else {
        (3, "normal", 1)
    }
}

fn control_document(gid: usize, graph: &ControlGraph) -> ControlDocument {
    GraphDocument {
        nodes: graph
            .entities()
            .map(|(_, entity)| {
                let (group, class, size) = classify(entity);
                ControlNode {
                    id: entity.id.clone(),
                    gid,
                    group,
                    class,
                    size,
                }
            })
            .collect(),
        links: graph
            .relationships()
            .map(|(u, v, link)| HoldingEdge {
                source: graph.key_of(u).to_string(),
                target: graph.key_of(v).to_string(),
                rate: format!("{}%", link.rate),
            })
            .collect(),
    }
}

pub fn build_control_documents(report: &ControlReport, config: &ExportConfig) -> ControlDocuments {
    let budget = config.effective_control_chunk_nodes();
    let mut docs = ControlDocuments::default();
    let mut doubles = NodeChunker::new(budget);
    let mut multis = NodeChunker::new(budget);

    for analyzed in &report.subgraphs {
        let graph = &analyzed.graph;
        let doc = control_document(analyzed.id, graph);
        let has_controller = graph.entities().any(|(_, e)| e.is_controller);
        let has_cross = graph.entities().any(|(_, e)| e.is_cross_held);

        if has_controller {
            docs.control.append_copy(&doc);
        }
        if has_cross {
            docs.cross.append_copy(&doc);
        }
        if has_controller || has_cross {
            continue;
        }
        if graph.entity_count() == 2 {
            doubles.push(doc);
        } else {
            multis.push(doc);
        }
    }

    docs.double = doubles.finish();
    docs.multi = multis.finish();
    docs
}

/// Write control documents under `<output_dir>/control/`.
pub fn export_control(
    report: &ControlReport,
    config: &ExportConfig,
    output_dir: &Path,
) -> Result<ExportSummary, ExportError> {
    let docs = build_control_documents(report, config);
    let dir = output_dir.join("control");
    ensure_dir(&dir)?;
    let pretty = config.effective_pretty();
    let mut summary = ExportSummary::default();

    write_json(&dir, "control.json", &docs.control, pretty, &mut summary)?;
    write_json(&dir, "cross.json", &docs.cross, pretty, &mut summary)?;
    for (i, chunk) in docs.double.iter().enumerate() {
        write_json(&dir, &format!("double_{i}.json"), chunk, pretty, &mut summary)?;
    }
    for (i, chunk) in docs.multi.iter().enumerate() {
        write_json(&dir, &format!("multi_{i}.json"), chunk, pretty, &mut summary)?;
    }

    tracing::info!(files = summary.file_count(), dir = %dir.display(), "control export written");
    Ok(summary)
}
