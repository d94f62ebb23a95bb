//! Common graph types and shared plumbing for the planar workspace.
//!
//! This crate provides the undirected graph model every other crate operates on,
//! the search configuration, graph readers and writers for the dot and csv
//! formats, and the Graphviz-backed renderer.

mod config;
mod error;
mod graph;

pub mod io;
pub mod render;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::graph::*;
