//! Comma separated edge lists: one `u,v` pair per line, no header.

use std::collections::HashSet;
use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::trace;

use super::{LoadedGraph, ReadError};
use crate::graph::Graph;

/// Parses an edge list.
///
/// Rows that do not have exactly two non-empty fields are skipped. The input
/// counts as directed when some `u,v` row has no matching `v,u` row.
///
/// # Errors
/// Returns [`ReadError::Csv`] for unreadable input and [`ReadError::Graph`]
/// for self-loops.
pub fn parse_csv<R: Read>(reader: R) -> Result<LoadedGraph, ReadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut pairs: Vec<(String, String)> = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        match (record.len(), record.get(0), record.get(1)) {
            (2, Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
                pairs.push((a.to_string(), b.to_string()));
            }
            _ => trace!("skipping csv row {}: {:?}", row + 1, record),
        }
    }

    let seen: HashSet<(&str, &str)> = pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    let directed = pairs
        .iter()
        .any(|(a, b)| !seen.contains(&(b.as_str(), a.as_str())));

    let mut graph = Graph::new();
    for (a, b) in &pairs {
        graph.add_edge_by_label(a, b)?;
    }

    Ok(LoadedGraph { graph, directed })
}

/// Writes one `u,v` row per edge in insertion order.
///
/// Isolated vertices cannot be expressed in this format and are not written.
///
/// # Errors
/// Propagates csv and I/O errors from `out`.
pub fn write_csv<W: Write>(graph: &Graph, out: &mut W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
    for edge in graph.edges() {
        if let Some((a, b)) = graph.edge_labels(edge) {
            wtr.write_record([a, b])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symmetric_list_is_undirected() {
        let loaded = parse_csv("1,2\n2,1\n2,3\n3,2\n".as_bytes()).unwrap();
        assert!(!loaded.directed);
        assert_eq!(loaded.graph.vertex_count(), 3);
        assert_eq!(loaded.graph.edge_count(), 2);
    }

    #[test]
    fn test_parse_one_way_list_is_directed() {
        let loaded = parse_csv("1,2\n2,3\n".as_bytes()).unwrap();
        assert!(loaded.directed);
        assert_eq!(loaded.graph.edge_count(), 2);
    }

    #[test]
    fn test_parse_skips_malformed_rows() {
        let loaded = parse_csv("1,2\n\n3\n4,5,6\n , 7\n 8 , 9 \n".as_bytes()).unwrap();
        let labels: Vec<&str> = loaded.graph.labels().collect();
        assert_eq!(labels, vec!["1", "2", "8", "9"]);
        assert_eq!(loaded.graph.edge_count(), 2);
    }

    #[test]
    fn test_parse_rejects_self_loop() {
        let err = parse_csv("4,4\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ReadError::Graph(_)));
    }

    #[test]
    fn test_write_csv_rows() {
        let graph = Graph::from_edge_labels([("b", "a"), ("a", "c")]).unwrap();
        let mut out = Vec::new();
        write_csv(&graph, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "b,a\na,c\n");
    }
}
