use super::{SelectionError, SelectionSet, UnusedReport};
use crate::discovery::AssetPath;

/// State carried between detection runs: the latest report and the
/// caller's selection over it
#[derive(Debug, Clone, Default)]
pub struct DetectionSession {
    report: UnusedReport,
    selection: SelectionSet,
    runs: usize,
}

impl DetectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> &UnusedReport {
        &self.report
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Number of completed detection runs
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Install the result of a finished run; any previous selection is dropped
    pub(crate) fn replace_report(&mut self, report: UnusedReport) {
        self.report = report;
        self.selection.clear();
        self.runs += 1;
    }

    pub fn select(&mut self, path: &AssetPath) -> Result<(), SelectionError> {
        self.selection.select(&self.report, path)
    }

    pub fn deselect(&mut self, path: &AssetPath) -> bool {
        self.selection.deselect(path)
    }

    pub fn toggle(&mut self, path: &AssetPath) -> Result<bool, SelectionError> {
        self.selection.toggle(&self.report, path)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.report);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}
