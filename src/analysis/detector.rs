use super::{DetectionSession, UnusedReport, UnusedSetBuilder};
use crate::config::{Config, PatternError};
use crate::discovery::{CatalogError, CatalogStats, ContentReader, PathCatalog};
use crate::resolver::{ClosureProvider, ResolveError, RootDependencyResolver, RootSource};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// A detection run failed as a whole; no partial report exists
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Runs the full pipeline: catalog, roots, closure, classification
pub struct Detector<'a> {
    config: &'a Config,
    project_root: PathBuf,
    provider: &'a dyn ClosureProvider,
    reader: &'a dyn ContentReader,
    progress: Option<ProgressBar>,
}

impl<'a> Detector<'a> {
    pub fn new(
        config: &'a Config,
        project_root: &Path,
        provider: &'a dyn ClosureProvider,
        reader: &'a dyn ContentReader,
    ) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
            provider,
            reader,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Recompute the unused report from scratch.
    ///
    /// The session is only touched once everything succeeded: its report is
    /// replaced and its selection cleared. On error it keeps its old state.
    pub fn run<'s>(
        &self,
        session: &'s mut DetectionSession,
        include_code: bool,
    ) -> Result<&'s UnusedReport, DetectionError> {
        let report = self.detect(include_code)?;
        session.replace_report(report);
        Ok(session.report())
    }

    /// Compute a report without a session
    pub fn detect(&self, include_code: bool) -> Result<UnusedReport, DetectionError> {
        let scan = PathCatalog::new(self.config, &self.project_root).scan()?;
        let catalog = scan.candidates;
        let retain = self.config.retain_patterns()?;
        let stats = CatalogStats::from_paths(&catalog, self.config);
        debug!(
            "Catalog: {} files ({} scripts, {} assets)",
            stats.total(),
            stats.code_files,
            stats.asset_files
        );

        let roots = RootSource::new(self.config, &self.project_root).load()?;
        let used = RootDependencyResolver::new(self.provider).closure(&roots)?;

        let mut builder = UnusedSetBuilder::new(self.config, self.reader, include_code)
            .with_retain(retain)
            .with_reference_only(scan.excluded);
        if let Some(pb) = &self.progress {
            builder = builder.with_progress(pb.clone());
        }
        let report = builder.build(&catalog, &used);

        info!("Found {} unused assets.", report.len());
        Ok(report)
    }
}
