use super::{TextualReferenceScanner, UnusedAsset, UnusedReason, UnusedReport};
use crate::config::{Config, PathPatterns};
use crate::discovery::{AssetPath, ContentReader};
use crate::resolver::UsedSet;
use indicatif::ProgressBar;
use tracing::{debug, trace};

/// Classifies catalog entries as used or unused
pub struct UnusedSetBuilder<'a> {
    config: &'a Config,
    scanner: TextualReferenceScanner<'a>,
    include_code: bool,
    retain: PathPatterns,
    reference_only: Vec<AssetPath>,
    progress: Option<ProgressBar>,
}

impl<'a> UnusedSetBuilder<'a> {
    pub fn new(config: &'a Config, reader: &'a dyn ContentReader, include_code: bool) -> Self {
        Self {
            config,
            scanner: TextualReferenceScanner::new(config, reader),
            include_code,
            retain: PathPatterns::default(),
            reference_only: Vec::new(),
            progress: None,
        }
    }

    /// Paths matching `retain` are never reported
    pub fn with_retain(mut self, retain: PathPatterns) -> Self {
        self.retain = retain;
        self
    }

    /// Files searched for script references without being candidates themselves
    pub fn with_reference_only(mut self, paths: Vec<AssetPath>) -> Self {
        self.reference_only = paths;
        self
    }

    /// Tick a progress bar once per candidate
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Build the report in catalog order
    pub fn build(&self, catalog: &[AssetPath], used: &UsedSet) -> UnusedReport {
        if let Some(pb) = &self.progress {
            pb.set_length(catalog.len() as u64);
        }

        let mut haystack: Vec<AssetPath> = catalog
            .iter()
            .chain(&self.reference_only)
            .cloned()
            .collect();
        haystack.sort();
        haystack.dedup();

        let mut entries = Vec::new();

        for candidate in catalog {
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }

            if let Some(reason) = self.classify(candidate, &haystack, used) {
                if self.retain.is_match(candidate.as_str()) {
                    debug!("Retaining unused {}", candidate);
                    continue;
                }
                entries.push(UnusedAsset::new(candidate.clone(), self.config.kind_of(candidate), reason));
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        UnusedReport::new(entries)
    }

    /// Why `candidate` is unused, or `None` when it is used or out of scope
    fn classify(&self, candidate: &AssetPath, haystack: &[AssetPath], used: &UsedSet) -> Option<UnusedReason> {
        if used.contains(candidate) {
            trace!("Used by a root: {}", candidate);
            return None;
        }

        if !self.config.is_code(candidate) {
            return Some(UnusedReason::NotInClosure);
        }

        if !self.include_code {
            return None;
        }

        if self.scanner.is_referenced(candidate, haystack) {
            None
        } else {
            Some(UnusedReason::NoTextualReference)
        }
    }
}
