//! Drawing graphs with Graphviz.
//!
//! The graph is written to a temporary dot file and handed to the `dot`
//! executable, which picks the output format from the target extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, error};

use crate::graph::Graph;
use crate::io::{WriteError, write_dot};

/// Errors that can occur while rendering a picture.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No `dot` executable on `PATH`.
    #[error("graphviz `dot` not found on path: {0}")]
    GraphvizNotFound(#[from] which::Error),

    /// Failed to stage the temporary dot file or to spawn Graphviz.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Graphviz ran and reported failure.
    #[error("graphviz failed: status={status}\n{stderr}")]
    Graphviz {
        /// Exit status as displayed by the OS.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// Writing the output location failed.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Graphviz output format for `output`, defaulting to `png`.
#[must_use]
pub fn output_format(output: &Path) -> String {
    output
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map_or_else(|| "png".to_string(), str::to_ascii_lowercase)
}

/// Renders `graph` to `output` with the `dot` found on `PATH`.
///
/// # Errors
/// See [`RenderError`].
pub fn render(graph: &Graph, output: &Path) -> Result<(), RenderError> {
    let dot = which::which("dot")?;
    render_with(graph, output, &dot)
}

/// Renders `graph` to `output` with an explicit Graphviz executable.
///
/// # Errors
/// See [`RenderError`].
pub fn render_with(graph: &Graph, output: &Path, dot: &Path) -> Result<(), RenderError> {
    let staged = tempfile::Builder::new()
        .prefix("planar_")
        .suffix(".dot")
        .rand_bytes(4)
        .tempfile()?;

    {
        let mut out = BufWriter::new(File::create(staged.path())?);
        write_dot(graph, &mut out)?;
        out.flush()?;
    }

    if let Some(parent) = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        return Err(WriteError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("directory {} does not exist", parent.display()),
        ))
        .into());
    }

    let format = output_format(output);
    debug!(
        "rendering {} vertices / {} edges to {} as {}",
        graph.vertex_count(),
        graph.edge_count(),
        output.display(),
        format
    );

    let result = Command::new(dot)
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(output)
        .arg(staged.path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
        error!("graphviz failed: status={:?}\n{}", result.status, stderr);
        if stderr.contains("Permission denied") {
            return Err(WriteError::PermissionDenied(PathBuf::from(output)).into());
        }
        return Err(RenderError::Graphviz {
            status: result.status.to_string(),
            stderr,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(output_format(Path::new("out.png")), "png");
        assert_eq!(output_format(Path::new("out.SVG")), "svg");
        assert_eq!(output_format(Path::new("out")), "png");
    }

    #[test]
    fn test_render_with_missing_executable_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let graph = Graph::complete(3);
        let err = render_with(
            &graph,
            &dir.path().join("k3.png"),
            Path::new("/definitely/not/a/graphviz/dot"),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
