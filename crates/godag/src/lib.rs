//! godag - Gene Ontology DAG flattener
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Fetches the Gene Ontology OBO release, assembles its term DAG and writes
//! it out as a flat predecessor -> successors mapping, optionally with an
//! id -> name lookup.
//!
//! - **Retrieval**: [`downloader::GoDownloader`] (HTTP with retries, or a local file)
//! - **Parsing**: [`parser::OboParser`] into [`dag::GoDag`]
//! - **Extraction**: [`graph::build_graph`] and [`lookup::build_name_lookup`]
//! - **Output**: JSON or tab-delimited rows via [`serializer`]
//!
//! # Example
//!
//! ```no_run
//! use godag::{load_dag, build_graph, write_output, DagOptions, GraphOptions, OutputFormat};
//! use std::path::Path;
//!
//! fn main() -> godag::Result<()> {
//!     let dag = load_dag(Path::new("go-basic.obo"), &DagOptions::default())?;
//!     let (graph, _stats) = build_graph(&dag, &GraphOptions::default());
//!     write_output(graph.as_map(), Path::new("graph.tsv"), OutputFormat::Dsv)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dag;
pub mod downloader;
pub mod error;
pub mod graph;
pub mod lookup;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod serializer;

// Re-export commonly used types
pub use cli::Cli;
pub use config::FetchConfig;
pub use dag::{DagOptions, GoDag, TermSource};
pub use downloader::{GoDownloader, OntologyHandle};
pub use error::{GoError, Result};
pub use graph::{build_graph, Graph, GraphOptions, GraphStats, KeyMode, Sentinels};
pub use lookup::{build_name_lookup, NameLookup};
pub use models::{GoTerm, Namespace, OboHeader, RelationshipType};
pub use parser::{OboDocument, OboParser};
pub use pipeline::{load_dag, Pipeline, RunOptions, RunReport};
pub use serializer::{write_output, OutputFormat};
