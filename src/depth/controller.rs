use std::collections::HashSet;
use std::io::Write;
use std::ops::AddAssign;

use tracing::info;

use crate::core::contig::{describe_target_difference, Contig};
use crate::depth::processor::{ContigProcessor, ContigStats};
use crate::depth::{DepthError, RunConfig};
use crate::output::ReportWriter;
use crate::parsing::source::AlignmentSource;

/// Totals for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub contigs: usize,
    pub stats: ContigStats,
}

impl AddAssign<ContigStats> for RunSummary {
    fn add_assign(&mut self, stats: ContigStats) {
        self.contigs += 1;
        self.stats += stats;
    }
}

/// Owns the opened sources for a run and drives contigs through processing and
/// output one at a time. Sources are released when the controller is dropped.
pub struct RunController<S: AlignmentSource> {
    sources: Vec<S>,
    contigs: Vec<Contig>,
    processor: ContigProcessor,
}

impl<S: AlignmentSource> RunController<S> {
    /// Validate the sources and select the contigs to process.
    ///
    /// # Errors
    ///
    /// Returns `DepthError::NoSources` for an empty source list,
    /// `DepthError::TargetSetMismatch` if any source declares different contigs than
    /// the first, or `DepthError::UnknownContig` if a requested contig is absent.
    pub fn new(sources: Vec<S>, config: &RunConfig) -> Result<Self, DepthError> {
        let first = sources.first().ok_or(DepthError::NoSources)?;

        for other in &sources[1..] {
            if let Some(reason) = describe_target_difference(first.targets(), other.targets())
            {
                return Err(DepthError::TargetSetMismatch {
                    path: other.path().to_path_buf(),
                    first: first.path().to_path_buf(),
                    reason,
                });
            }
        }

        let contigs = select_contigs(first.targets(), config.contigs.as_deref())?;

        Ok(Self {
            sources,
            contigs,
            processor: ContigProcessor::new(config.min_mapping_quality),
        })
    }

    /// Contigs that will be processed, in order
    #[must_use]
    pub fn contigs(&self) -> &[Contig] {
        &self.contigs
    }

    /// Process every selected contig and write its counts to `report`.
    ///
    /// A contig's counts are written only after every source has been drained for it;
    /// a failure part-way through a contig writes nothing for that contig.
    ///
    /// # Errors
    ///
    /// Returns `DepthError::Source` if a query or record stream fails, or
    /// `DepthError::Output` if the report cannot be written.
    pub fn run<W: Write>(&mut self, report: &mut ReportWriter<W>) -> Result<RunSummary, DepthError> {
        let paths: Vec<_> = self.sources.iter().map(|s| s.path().to_path_buf()).collect();
        report.write_preamble(&paths).map_err(DepthError::Output)?;

        let mut summary = RunSummary::default();

        for contig in &self.contigs {
            info!(contig = %contig.name, length = contig.length, "Processing contig");

            let (matrix, stats) = self.processor.process(contig, &mut self.sources)?;
            report
                .write_contig(contig, &matrix)
                .map_err(DepthError::Output)?;

            info!(
                contig = %contig.name,
                records = stats.records,
                filtered = stats.filtered,
                bases = stats.bases,
                "Finished contig"
            );
            summary += stats;
        }

        report.finish().map_err(DepthError::Output)?;

        Ok(summary)
    }
}

/// Pick the contigs to process, keeping target order.
fn select_contigs(
    targets: &[Contig],
    requested: Option<&[String]>,
) -> Result<Vec<Contig>, DepthError> {
    let Some(requested) = requested else {
        return Ok(targets.to_vec());
    };

    let known: HashSet<&str> = targets.iter().map(|t| t.name.as_str()).collect();
    if let Some(missing) = requested.iter().find(|name| !known.contains(name.as_str())) {
        return Err(DepthError::UnknownContig(missing.clone()));
    }

    let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();
    Ok(targets
        .iter()
        .filter(|t| wanted.contains(t.name.as_str()))
        .cloned()
        .collect())
}
