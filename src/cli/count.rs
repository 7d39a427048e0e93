use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use tracing::info;

use crate::cli::Cli;
use crate::depth::controller::{RunController, RunSummary};
use crate::depth::RunConfig;
use crate::output::ReportWriter;
use crate::parsing::alignment::HtsSource;
use crate::parsing::fai::resolve_reference;
use crate::parsing::source::AlignmentSource;

/// Execute a counting run
///
/// Every alignment file is opened before any output is written; the first failure
/// aborts the run and releases whatever was already opened.
///
/// # Errors
///
/// Returns an error if the reference or any alignment file cannot be opened, if the
/// alignment files disagree on their contigs, or if reading or writing fails.
pub fn run(args: &Cli) -> anyhow::Result<RunSummary> {
    let reference = resolve_reference(&args.reference)?;
    info!(
        reference = %reference.path().display(),
        contigs = reference.contigs().len(),
        "Resolved reference"
    );

    let sources = args
        .alignments
        .iter()
        .map(|path| HtsSource::open(path, &reference))
        .collect::<Result<Vec<_>, _>>()?;

    for source in &sources {
        info!(
            path = %source.path().display(),
            format = ?source.format(),
            contigs = source.targets().len(),
            "Opened alignment file"
        );
    }
    if let Some(first) = sources.first() {
        reference.warn_on_mismatches(first.targets());
    }

    let config = RunConfig {
        min_mapping_quality: args.min_mapq,
        contigs: (!args.contigs.is_empty()).then(|| args.contigs.clone()),
    };
    let mut controller = RunController::new(sources, &config)?;
    info!(contigs = controller.contigs().len(), "Selected contigs");

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut report = ReportWriter::new(BufWriter::new(writer), args.format);

    let summary = controller.run(&mut report)?;
    info!(
        contigs = summary.contigs,
        records = summary.stats.records,
        filtered = summary.stats.filtered,
        bases = summary.stats.bases,
        clipped = summary.stats.clipped,
        unsequenced = summary.stats.unsequenced,
        "Run complete"
    );

    Ok(summary)
}
