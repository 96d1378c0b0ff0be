use std::time::Instant;

use anyhow::{Context, Result};
use tlm_ingest::read_namespaces;
use tlm_model::Namespace;
use tlm_store::{RecordingStore, ZarrStore};
use tracing::{info, info_span};

use tlm_cli::pipeline::convert;
use tlm_cli::types::ConvertResult;

use crate::cli::Cli;

pub fn run_convert(cli: &Cli) -> Result<ConvertResult> {
    let span = info_span!(
        "convert",
        input = %cli.input.display(),
        output = %cli.output.display()
    );
    let _guard = span.enter();
    let options = cli.conversion_options();

    let ingest_start = Instant::now();
    let namespaces = read_namespaces(&cli.input)
        .with_context(|| format!("read input {}", cli.input.display()))?;
    info!(
        namespaces = namespaces.len(),
        records = namespaces.iter().map(Namespace::len).sum::<usize>(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let summary = if options.dry_run {
        let mut store = RecordingStore::new();
        let summary = convert(namespaces, &mut store, &options).context("convert records")?;
        info!(operations = store.ops().len(), "dry run, nothing written");
        summary
    } else {
        let mut store = ZarrStore::create(&cli.output)
            .with_context(|| format!("create output {}", cli.output.display()))?;
        convert(namespaces, &mut store, &options)
            .with_context(|| format!("write output {}", cli.output.display()))?
    };

    Ok(ConvertResult {
        input: cli.input.clone(),
        output: cli.output.clone(),
        dry_run: options.dry_run,
        summary,
    })
}
