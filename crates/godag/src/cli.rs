//! Command-line arguments

use crate::config::FetchConfig;
use crate::dag::DagOptions;
use crate::graph::{GraphOptions, KeyMode, Sentinels};
use crate::pipeline::RunOptions;
use crate::serializer::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// godag - flatten the Gene Ontology DAG into a predecessor -> successors mapping
#[derive(Parser, Debug)]
#[command(name = "godag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Destination of the adjacency mapping
    pub output: PathBuf,

    /// Destination of the id -> name lookup (not built when omitted)
    pub id_to_name_file: Option<PathBuf>,

    /// Key terms by GO identifier instead of name
    #[arg(long = "use-id", alias = "use_id")]
    pub use_id: bool,

    /// Write JSON instead of tab-delimited rows
    #[arg(long)]
    pub json: bool,

    /// Read this OBO file instead of downloading
    #[arg(long)]
    pub obo: Option<PathBuf>,

    /// Ontology URL
    #[arg(long)]
    pub url: Option<String>,

    /// Dated GO release (YYYY-MM-DD) from the release archive
    #[arg(long)]
    pub release: Option<String>,

    /// Add root and obsolete term sets under reserved keys
    #[arg(long)]
    pub sentinels: bool,

    /// Key of the root set (implies --sentinels)
    #[arg(long, value_name = "KEY")]
    pub roots_key: Option<String>,

    /// Key of the obsolete set (implies --sentinels)
    #[arg(long, value_name = "KEY")]
    pub obsoletes_key: Option<String>,

    /// Also follow part_of, regulates and other typed relationships
    #[arg(long)]
    pub with_relationships: bool,

    /// Leave obsolete terms out of the DAG
    #[arg(long)]
    pub skip_obsolete: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Environment settings (`GODAG_*`) overridden by the flags given
    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch_config_over(FetchConfig::from_env())
    }

    /// `config` overridden by the flags given
    pub fn fetch_config_over(&self, mut config: FetchConfig) -> FetchConfig {
        if let Some(url) = &self.url {
            config.ontology_url = url.clone();
        }
        if let Some(release) = &self.release {
            config.release = Some(release.clone());
        }
        if let Some(path) = &self.obo {
            config.local_ontology_path = Some(path.clone());
        }

        config
    }

    pub fn sentinels(&self) -> Sentinels {
        if !(self.sentinels || self.roots_key.is_some() || self.obsoletes_key.is_some()) {
            return Sentinels::disabled();
        }

        Sentinels::new(
            Some(
                self.roots_key
                    .clone()
                    .unwrap_or_else(|| Sentinels::DEFAULT_ROOTS_KEY.to_string()),
            ),
            Some(
                self.obsoletes_key
                    .clone()
                    .unwrap_or_else(|| Sentinels::DEFAULT_OBSOLETES_KEY.to_string()),
            ),
        )
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            output: self.output.clone(),
            id_to_name_file: self.id_to_name_file.clone(),
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Dsv
            },
            graph: GraphOptions {
                key_mode: if self.use_id { KeyMode::Id } else { KeyMode::Name },
                sentinels: self.sentinels(),
            },
            dag: DagOptions {
                include_relationships: self.with_relationships,
                load_obsolete: !self.skip_obsolete,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("godag").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let options = parse(&["graph.tsv"]).run_options();

        assert_eq!(options.output, PathBuf::from("graph.tsv"));
        assert!(options.id_to_name_file.is_none());
        assert_eq!(options.format, OutputFormat::Dsv);
        assert_eq!(options.graph.key_mode, KeyMode::Name);
        assert!(!options.graph.sentinels.inject);
        assert_eq!(options.dag, DagOptions::default());

        let config = parse(&["graph.tsv"]).fetch_config_over(FetchConfig::default());
        assert!(config.local_ontology_path.is_none());
        assert!(config.release.is_none());
        assert_eq!(config.ontology_url(), crate::config::DEFAULT_ONTOLOGY_URL);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&[
            "graph.json",
            "names.json",
            "--use_id",
            "--json",
            "--with-relationships",
            "--skip-obsolete",
        ]);
        let options = cli.run_options();

        assert_eq!(options.id_to_name_file, Some(PathBuf::from("names.json")));
        assert_eq!(options.format, OutputFormat::Json);
        assert_eq!(options.graph.key_mode, KeyMode::Id);
        assert!(options.dag.include_relationships);
        assert!(!options.dag.load_obsolete);

        assert!(parse(&["graph.tsv", "--use-id"]).use_id);
    }

    #[test]
    fn test_sentinel_flags() {
        let sentinels = parse(&["graph.tsv", "--sentinels"]).sentinels();
        assert!(sentinels.inject);
        assert_eq!(sentinels.roots_key.as_deref(), Some("roots"));
        assert_eq!(sentinels.obsoletes_key.as_deref(), Some("obsoletes"));

        let sentinels = parse(&["graph.tsv", "--roots-key", "top"]).sentinels();
        assert!(sentinels.inject);
        assert_eq!(sentinels.roots_key.as_deref(), Some("top"));
        assert_eq!(sentinels.obsoletes_key.as_deref(), Some("obsoletes"));
    }

    #[test]
    fn test_url_and_release_flags() {
        let base = FetchConfig::builder().ontology_url("https://env.example/go.obo").build();
        let config = parse(&["graph.tsv", "--url", "https://flag.example/go.obo", "--release", "2025-09-08"])
            .fetch_config_over(base);

        assert_eq!(config.ontology_url, "https://flag.example/go.obo");
        assert_eq!(config.release.as_deref(), Some("2025-09-08"));
        assert!(config.ontology_url().starts_with("http://release.geneontology.org/2025-09-08/"));
    }

    #[test]
    fn test_output_is_required() {
        assert!(Cli::try_parse_from(["godag"]).is_err());
    }

    #[test]
    fn test_local_obo_flag() {
        let base = FetchConfig::builder().local_ontology_path("from-env.obo").build();
        let config = parse(&["graph.tsv", "--obo", "go-basic.obo"]).fetch_config_over(base);
        assert_eq!(config.local_ontology_path, Some(PathBuf::from("go-basic.obo")));
    }
}
