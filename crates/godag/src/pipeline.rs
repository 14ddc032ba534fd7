// Conversion run orchestration
//
// Steps, strictly in order:
// 1. Retrieve the ontology (local file or download)
// 2. Parse it and assemble the DAG
// 3. Build the adjacency mapping and write it
// 4. Optionally build the id -> name lookup and write it

use crate::config::FetchConfig;
use crate::dag::{DagOptions, GoDag};
use crate::downloader::GoDownloader;
use crate::error::Result;
use crate::graph::{build_graph, GraphOptions, GraphStats};
use crate::models::Namespace;
use crate::lookup::build_name_lookup;
use crate::parser::OboParser;
use crate::serializer::{write_output, OutputFormat};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// What to produce from the ontology
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Adjacency mapping destination
    pub output: PathBuf,

    /// Name lookup destination; no lookup is built when absent
    pub id_to_name_file: Option<PathBuf>,

    pub format: OutputFormat,
    pub graph: GraphOptions,
    pub dag: DagOptions,
}

/// Outcome of a conversion run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output: PathBuf,
    pub id_to_name_file: Option<PathBuf>,
    /// "using ids" or "using names"
    pub key_description: &'static str,
    pub graph: GraphStats,
    pub names: Option<usize>,
    pub doublons: Option<usize>,
    pub data_version: Option<String>,
    /// Term records per namespace
    pub namespaces: BTreeMap<Namespace, usize>,
}

impl RunReport {
    /// One-line graph counts, before sentinel injection
    pub fn graph_summary(&self) -> String {
        let stats = &self.graph;
        format!(
            "{} predecessors, {} terms iterated, {} distinct keys, {} roots, {} obsoletes",
            stats.predecessors, stats.terms_iterated, stats.distinct_keys, stats.roots, stats.obsoletes
        )
    }

    /// One-line lookup counts, when a lookup was written
    pub fn lookup_summary(&self) -> Option<String> {
        match (self.names, self.doublons) {
            (Some(names), Some(doublons)) => Some(format!("{} names, {} doublons", names, doublons)),
            _ => None,
        }
    }
}

/// Parse the OBO file at `path` into a DAG
pub fn load_dag(path: &Path, options: &DagOptions) -> Result<GoDag> {
    let bytes = std::fs::read(path)?;
    info!(path = %path.display(), bytes = bytes.len(), "Parsing GO ontology");

    let document = OboParser::parse_bytes(&bytes)?;
    Ok(GoDag::from_document(document, options))
}

/// Gene Ontology conversion pipeline
pub struct Pipeline {
    config: FetchConfig,
    options: RunOptions,
}

impl Pipeline {
    pub fn new(config: FetchConfig, options: RunOptions) -> Self {
        Self { config, options }
    }

    /// Retrieve, parse, convert
    pub async fn run(&self) -> Result<RunReport> {
        info!("Step 1/3: Retrieving GO ontology...");
        let downloader = GoDownloader::new(self.config.clone())?;
        let handle = downloader.retrieve().await?;

        info!("Step 2/3: Loading GO DAG...");
        let dag = load_dag(handle.path(), &self.options.dag)?;
        // The temporary download is no longer needed once parsed
        drop(handle);

        info!("Step 3/3: Writing outputs...");
        self.convert(&dag)
    }

    /// Write the adjacency mapping, then the lookup if requested
    pub fn convert(&self, dag: &GoDag) -> Result<RunReport> {
        let options = &self.options;

        let (graph, stats) = build_graph(dag, &options.graph);
        write_output(graph.as_map(), &options.output, options.format)?;
        info!(
            path = %options.output.display(),
            format = %options.format,
            keys = graph.len(),
            "Graph saved"
        );

        let mut names = None;
        let mut doublons = None;
        if let Some(path) = &options.id_to_name_file {
            let lookup = build_name_lookup(dag);
            lookup.verify()?;
            write_output(lookup.as_map(), path, options.format)?;
            info!(path = %path.display(), names = lookup.len(), "Name lookup saved");

            names = Some(lookup.len());
            doublons = Some(lookup.doublons());
        }

        Ok(RunReport {
            output: options.output.clone(),
            id_to_name_file: options.id_to_name_file.clone(),
            key_description: options.graph.key_mode.describe(),
            graph: stats,
            names,
            doublons,
            data_version: dag.header().data_version.clone(),
            namespaces: dag.namespace_counts(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{KeyMode, Sentinels};
    use std::io::Write;

    const OBO: &str = "\
format-version: 1.2
data-version: releases/2026-01-01

[Term]
id: GO:0008150
name: biological_process
namespace: biological_process

[Term]
id: GO:0009987
name: cellular process
namespace: biological_process
is_a: GO:0008150 ! biological_process

[Term]
id: GO:0000001
name: mitochondrion inheritance
namespace: biological_process
alt_id: GO:0000002
is_a: GO:0009987 ! cellular process

[Term]
id: GO:0000005
name: obsolete ribosomal chaperone activity
namespace: molecular_function
is_obsolete: true
";

    fn obo_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(OBO.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_dag() {
        let file = obo_file();
        let dag = load_dag(file.path(), &DagOptions::default()).unwrap();

        assert_eq!(dag.term_count(), 4);
        assert!(dag.get("GO:0000002").is_some());
        assert_eq!(dag.header().data_version.as_deref(), Some("releases/2026-01-01"));
    }

    #[test]
    fn test_convert_writes_graph_and_lookup() {
        let file = obo_file();
        let dag = load_dag(file.path(), &DagOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let options = RunOptions {
            output: dir.path().join("graph.json"),
            id_to_name_file: Some(dir.path().join("names.json")),
            format: OutputFormat::Json,
            graph: GraphOptions {
                key_mode: KeyMode::Id,
                sentinels: Sentinels::new(
                    Some(Sentinels::DEFAULT_ROOTS_KEY.to_string()),
                    Some(Sentinels::DEFAULT_OBSOLETES_KEY.to_string()),
                ),
            },
            dag: DagOptions::default(),
        };
        let report = Pipeline::new(FetchConfig::default(), options).convert(&dag).unwrap();

        let graph: BTreeMap<String, Vec<String>> =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("graph.json")).unwrap()).unwrap();
        assert_eq!(graph["GO:0008150"], vec!["GO:0009987"]);
        assert_eq!(graph["GO:0009987"], vec!["GO:0000001"]);
        assert_eq!(graph["roots"], vec!["GO:0008150"]);
        assert_eq!(graph["obsoletes"], vec!["GO:0000005"]);

        let names: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("names.json")).unwrap()).unwrap();
        assert_eq!(names.len(), 4);
        assert_eq!(names["GO:0000001"], "mitochondrion inheritance");

        assert_eq!(report.key_description, "using ids");
        assert_eq!(report.names, Some(4));
        // GO:0000002 resolves to GO:0000001's record
        assert_eq!(report.doublons, Some(1));
        assert_eq!(report.graph.roots, 1);
        assert_eq!(report.graph.obsoletes, 1);
        assert_eq!(report.data_version.as_deref(), Some("releases/2026-01-01"));

        assert_eq!(
            report.graph_summary(),
            "2 predecessors, 5 terms iterated, 3 distinct keys, 1 roots, 1 obsoletes"
        );
        assert_eq!(report.lookup_summary().as_deref(), Some("4 names, 1 doublons"));
        assert_eq!(report.namespaces[&Namespace::BiologicalProcess], 3);
        assert_eq!(report.namespaces[&Namespace::MolecularFunction], 1);
    }

    #[test]
    fn test_convert_without_lookup_uses_names() {
        let file = obo_file();
        let dag = load_dag(file.path(), &DagOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let options = RunOptions {
            output: dir.path().join("graph.tsv"),
            ..RunOptions::default()
        };
        let report = Pipeline::new(FetchConfig::default(), options).convert(&dag).unwrap();

        let tsv = std::fs::read_to_string(dir.path().join("graph.tsv")).unwrap();
        assert_eq!(
            tsv,
            "biological_process\tcellular process\ncellular process\tmitochondrion inheritance\n"
        );
        assert_eq!(report.key_description, "using names");
        assert!(report.names.is_none());
        assert!(report.lookup_summary().is_none());
    }

    #[tokio::test]
    async fn test_run_from_local_file() {
        let file = obo_file();
        let dir = tempfile::tempdir().unwrap();

        let config = FetchConfig::builder().local_ontology_path(file.path()).build();
        let options = RunOptions {
            output: dir.path().join("graph.tsv"),
            dag: DagOptions {
                load_obsolete: false,
                ..DagOptions::default()
            },
            graph: GraphOptions {
                key_mode: KeyMode::Id,
                sentinels: Sentinels::new(Some("roots".to_string()), Some("obsoletes".to_string())),
            },
            ..RunOptions::default()
        };

        let report = Pipeline::new(config, options).run().await.unwrap();
        assert_eq!(report.graph.obsoletes, 0);

        let tsv = std::fs::read_to_string(dir.path().join("graph.tsv")).unwrap();
        assert!(tsv.contains("obsoletes\t\n"));
        assert!(tsv.contains("roots\tGO:0008150\n"));
    }

    #[tokio::test]
    async fn test_run_fails_on_unparsable_ontology() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[Term]\nname: no id here\n").unwrap();
        let dir = tempfile::tempdir().unwrap();

        let config = FetchConfig::builder().local_ontology_path(file.path()).build();
        let options = RunOptions {
            output: dir.path().join("graph.tsv"),
            ..RunOptions::default()
        };

        let err = Pipeline::new(config, options).run().await.unwrap_err();
        assert!(matches!(err, crate::error::GoError::Parse(_)));
        assert!(!dir.path().join("graph.tsv").exists());
    }
}
