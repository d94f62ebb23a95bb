//! Reading and writing graphs.
//!
//! Two textual formats are supported:
//! - Graphviz dot (`graph { a -- b; }` / `digraph { a -> b; }`)
//! - comma separated edge lists (`a,b` per line)
//!
//! Readers always hand back an undirected [`Graph`]; whether the source was
//! directed is reported next to it in [`LoadedGraph`] and is never seen by the
//! search.

mod dot;
mod edge_list;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::error::GraphError;
use crate::graph::Graph;

pub use dot::{parse_dot, write_dot};
pub use edge_list::{parse_csv, write_csv};

/// A graph as read from a file, before it reaches the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedGraph {
    /// The graph, with directed edges normalized to undirected ones.
    pub graph: Graph,
    /// Whether the source described a directed graph.
    pub directed: bool,
}

/// On-disk graph format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
    /// Graphviz dot.
    Dot,
    /// Comma separated edge list.
    Csv,
}

impl GraphFormat {
    /// Picks the format from a file extension: `.csv` is csv, everything else is dot.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Dot,
        }
    }
}

/// Errors that can occur while reading a graph.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The input file does not exist.
    #[error("Cannot find {}", .0.display())]
    NotFound(PathBuf),

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The csv reader rejected the input.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The text is not a graph description this reader understands.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The description contains an edge the graph model refuses.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ReadError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Errors that can occur while writing a graph.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The output location is not writable.
    #[error("Do not have permission to write {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The csv writer failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads a graph from `path` in the given format.
///
/// # Errors
/// Returns [`ReadError::NotFound`] for a missing file and the format's parse
/// errors otherwise.
pub fn read_graph(path: &Path, format: GraphFormat) -> Result<LoadedGraph, ReadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
        _ => ReadError::Io(e),
    })?;

    let loaded = match format {
        GraphFormat::Dot => {
            let text = std::io::read_to_string(file)?;
            parse_dot(&text)?
        }
        GraphFormat::Csv => parse_csv(file)?,
    };

    debug!(
        "read {} vertices and {} edges from {} (directed: {})",
        loaded.graph.vertex_count(),
        loaded.graph.edge_count(),
        path.display(),
        loaded.directed
    );
    Ok(loaded)
}

/// Writes `graph` to `path` in the given format, replacing any existing file.
///
/// # Errors
/// Returns [`WriteError::PermissionDenied`] when the location is not writable.
pub fn write_graph(path: &Path, graph: &Graph, format: GraphFormat) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => WriteError::PermissionDenied(path.to_path_buf()),
        _ => WriteError::Io(e),
    })?;
    let mut out = BufWriter::new(file);

    match format {
        GraphFormat::Dot => write_dot(graph, &mut out)?,
        GraphFormat::Csv => write_csv(graph, &mut out)?,
    }
    out.flush()?;

    debug!(
        "wrote {} vertices and {} edges to {}",
        graph.vertex_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}
