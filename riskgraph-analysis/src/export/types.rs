//! Shared document shape, node-budget chunking, and file writing.

use std::fs;
use std::path::{Path, PathBuf};

use riskgraph_core::errors::ExportError;
use serde::Serialize;

/// A front-end graph document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDocument<N, L> {
    pub nodes: Vec<N>,
    pub links: Vec<L>,
}

impl<N, L> Default for GraphDocument<N, L> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl<N, L> GraphDocument<N, L> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn append(&mut self, other: GraphDocument<N, L>) {
        self.nodes.extend(other.nodes);
        self.links.extend(other.links);
    }
}

impl<N: Clone, L: Clone> GraphDocument<N, L> {
    pub fn append_copy(&mut self, other: &GraphDocument<N, L>) {
        self.nodes.extend(other.nodes.iter().cloned());
        self.links.extend(other.links.iter().cloned());
    }
}

/// Packs subgraph documents into chunks of at most `budget` nodes.
///
/// A subgraph is never split; one larger than the budget gets a chunk of
/// its own.
#[derive(Debug)]
pub struct NodeChunker<N, L> {
    budget: usize,
    current: GraphDocument<N, L>,
    chunks: Vec<GraphDocument<N, L>>,
}

impl<N, L> NodeChunker<N, L> {
    pub fn new(budget: usize) -> Self {
        Self {
            budget: budget.max(1),
            current: GraphDocument::default(),
            chunks: Vec::new(),
        }
    }

    pub fn push(&mut self, doc: GraphDocument<N, L>) {
        if !self.current.is_empty() && self.current.node_count() + doc.node_count() > self.budget {
            self.chunks.push(std::mem::take(&mut self.current));
        }
        self.current.append(doc);
    }

    pub fn finish(mut self) -> Vec<GraphDocument<N, L>> {
        if !self.current.is_empty() {
            self.chunks.push(self.current);
        }
        self.chunks
    }
}

/// Files written by one export call.
#[derive(Debug, Default, Clone)]
pub struct ExportSummary {
    pub files: Vec<PathBuf>,
}

impl ExportSummary {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Create `dir` (and parents).
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    })
}

/// Serialize `value` to `dir/name` and record the path.
pub(crate) fn write_json<T: Serialize>(
    dir: &Path,
    name: &str,
    value: &T,
    pretty: bool,
    summary: &mut ExportSummary,
) -> Result<(), ExportError> {
    let path = dir.join(name);
    let body = if pretty {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
    .map_err(|e| ExportError::Serialize {
        document: name.to_string(),
        message: e.to_string(),
    })?;
    fs::write(&path, body).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "document written");
    summary.files.push(path);
    Ok(())
}
