//! godag - Main entry point

use anyhow::Context;
use clap::Parser;
use godag::{Cli, Pipeline, RunReport};
use godag_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("godag")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().apply_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok();

    match run(&cli).await {
        Ok(report) => {
            println!("Graph saved in {} {}", report.output.display(), report.key_description);
            println!("Graph: {}", report.graph_summary());
            if let Some(path) = &report.id_to_name_file {
                println!("Mapping id:name saved in {}", path.display());
            }
            if let Some(summary) = report.lookup_summary() {
                println!("Mapping: {}", summary);
            }
        },
        Err(e) => {
            error!(error = %e, "Conversion failed");
            eprintln!("Error: {:#}", e);
            process::exit(1);
        },
    }
}

async fn run(cli: &Cli) -> anyhow::Result<RunReport> {
    let config = cli.fetch_config();
    let options = cli.run_options();

    info!(
        url = %config.ontology_url(),
        local = ?config.local_ontology_path,
        format = %options.format,
        "Starting conversion"
    );

    let report = Pipeline::new(config, options)
        .run()
        .await
        .context("Failed to convert the Gene Ontology")?;

    info!(
        predecessors = report.graph.predecessors,
        terms_iterated = report.graph.terms_iterated,
        distinct_keys = report.graph.distinct_keys,
        roots = report.graph.roots,
        obsoletes = report.graph.obsoletes,
        names = ?report.names,
        doublons = ?report.doublons,
        data_version = ?report.data_version,
        namespaces = ?report.namespaces,
        "Conversion completed"
    );

    Ok(report)
}
