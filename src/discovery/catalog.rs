use super::AssetPath;
use crate::config::{Config, PatternError};
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Project root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Broad classification of a catalog path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Scripts; usage is decided by the textual reference fallback
    Code,
    /// Metadata files stored next to every asset
    Sidecar,
    /// Everything else; usage is decided by the dependency closure
    Asset,
}

impl AssetKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            AssetKind::Code => "script",
            AssetKind::Sidecar => "sidecar",
            AssetKind::Asset => "asset",
        }
    }
}

/// Enumerates every candidate file of a project
pub struct PathCatalog<'a> {
    config: &'a Config,
    project_root: PathBuf,
}

impl<'a> PathCatalog<'a> {
    pub fn new(config: &'a Config, project_root: &Path) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
        }
    }

    /// List all candidate files, sorted by path.
    ///
    /// A project without an asset directory yields an empty catalog.
    pub fn enumerate(&self) -> Result<Vec<AssetPath>, CatalogError> {
        Ok(self.scan()?.candidates)
    }

    /// Walk the asset directory once and split its files into candidates and
    /// `exclude` matches. Both lists are sorted by path.
    pub fn scan(&self) -> Result<CatalogScan, CatalogError> {
        if !self.project_root.is_dir() {
            return Err(CatalogError::NotADirectory(self.project_root.clone()));
        }

        let exclude = self.config.exclude_patterns()?;

        let prefix = self.config.normalized_prefix();
        let asset_dir = self.project_root.join(prefix.trim_end_matches('/'));
        if !asset_dir.is_dir() {
            debug!("Asset directory does not exist: {}", asset_dir.display());
            return Ok(CatalogScan::default());
        }

        debug!("Scanning for assets in: {}", asset_dir.display());

        let respect_ignore = self.config.respect_gitignore;
        let walker = WalkBuilder::new(&asset_dir)
            .hidden(true)                   // Unity skips dot-files
            .git_ignore(respect_ignore)
            .git_global(respect_ignore)
            .git_exclude(respect_ignore)
            .ignore(respect_ignore)
            .parents(respect_ignore)
            .follow_links(false)
            .filter_entry(|entry| !entry.file_name().to_string_lossy().ends_with('~'))
            .build();

        let mut paths: Vec<AssetPath> = walker
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.project_root).ok()?;
                let path = AssetPath::from_relative(relative);

                if !path.starts_with(&prefix) || self.config.is_sidecar(&path) {
                    return None;
                }

                trace!("Found {:?}: {}", self.config.kind_of(&path), path);
                Some(path)
            })
            .collect();

        paths.sort();
        paths.dedup();

        let (excluded, candidates): (Vec<AssetPath>, Vec<AssetPath>) = paths
            .into_iter()
            .partition(|path| exclude.is_match(path.as_str()));

        debug!(
            "Found {} candidate files ({} excluded)",
            candidates.len(),
            excluded.len()
        );
        Ok(CatalogScan {
            candidates,
            excluded,
        })
    }
}

/// Result of one catalog walk
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogScan {
    /// Files that may be reported
    pub candidates: Vec<AssetPath>,
    /// Files matched by `exclude`; never reported, still searched for references
    pub excluded: Vec<AssetPath>,
}

/// Statistics about a catalog
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub code_files: usize,
    pub asset_files: usize,
}

impl CatalogStats {
    pub fn from_paths(paths: &[AssetPath], config: &Config) -> Self {
        let mut stats = Self::default();
        for path in paths {
            match config.kind_of(path) {
                AssetKind::Code => stats.code_files += 1,
                AssetKind::Asset => stats.asset_files += 1,
                AssetKind::Sidecar => {}
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.code_files + self.asset_files
    }
}
