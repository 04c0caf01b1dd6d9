use super::UnusedReport;
use crate::discovery::AssetPath;
use std::collections::BTreeSet;
use thiserror::Error;

/// Selection errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{0} is not in the latest unused report")]
    NotInReport(AssetPath),
}

/// Paths marked for removal, iterated in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    paths: BTreeSet<AssetPath>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path, which must be part of `report`
    pub fn select(&mut self, report: &UnusedReport, path: &AssetPath) -> Result<(), SelectionError> {
        if !report.contains(path) {
            return Err(SelectionError::NotInReport(path.clone()));
        }
        self.paths.insert(path.clone());
        Ok(())
    }

    /// Unmark a path; returns whether it was selected
    pub fn deselect(&mut self, path: &AssetPath) -> bool {
        self.paths.remove(path)
    }

    /// Flip a path's selection; returns the new state
    pub fn toggle(&mut self, report: &UnusedReport, path: &AssetPath) -> Result<bool, SelectionError> {
        if self.deselect(path) {
            return Ok(false);
        }
        self.select(report, path)?;
        Ok(true)
    }

    /// Mark every entry of `report`
    pub fn select_all(&mut self, report: &UnusedReport) {
        self.paths.extend(report.paths().cloned());
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn contains(&self, path: &AssetPath) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetPath> {
        self.paths.iter()
    }
}
