use crate::analysis::{DetectionSession, SelectionSet};
use crate::config::Config;
use crate::discovery::AssetPath;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect};
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Removal errors
#[derive(Error, Debug)]
pub enum RemovalError {
    #[error("failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a removal pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    /// Assets whose file was removed (or would be, in a dry run)
    pub deleted: Vec<AssetPath>,
    /// Assets that were already gone
    pub skipped: Vec<AssetPath>,
    pub dry_run: bool,
}

/// Deletes selected assets together with their sidecar files
pub struct SafeDeleter<'a> {
    project_root: PathBuf,
    config: &'a Config,
    dry_run: bool,
}

impl<'a> SafeDeleter<'a> {
    pub fn new(project_root: &Path, config: &'a Config, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            dry_run,
        }
    }

    /// Let the user tick report entries; the session's selection is replaced
    /// with whatever was picked.
    pub fn choose(&self, session: &mut DetectionSession) -> Result<()> {
        let paths: Vec<AssetPath> = session.report().paths().cloned().collect();
        if paths.is_empty() {
            return Ok(());
        }

        let items: Vec<&str> = paths.iter().map(|p| p.as_str()).collect();
        let defaults: Vec<bool> = paths
            .iter()
            .map(|p| session.selection().contains(p))
            .collect();

        println!();
        println!("{}", "Select assets to delete:".cyan().bold());
        println!("{}", "(Space to toggle, Enter to confirm)".dimmed());
        println!();

        let picked = MultiSelect::with_theme(&ColorfulTheme::default())
            .items(&items)
            .defaults(&defaults)
            .interact()
            .into_diagnostic()?;

        session.clear_selection();
        for index in picked {
            session.select(&paths[index]).into_diagnostic()?;
        }

        Ok(())
    }

    /// Ask before touching disk
    pub fn confirm(&self, count: usize) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Are you sure you want to delete {} selected assets?",
                count
            ))
            .default(false)
            .interact()
            .into_diagnostic()
    }

    /// Delete every selected asset and its sidecars.
    ///
    /// Files that no longer exist are recorded as skipped. Any other I/O
    /// failure stops the pass.
    pub fn remove(&self, selection: &SelectionSet) -> Result<RemovalSummary, RemovalError> {
        let mut summary = RemovalSummary {
            dry_run: self.dry_run,
            ..Default::default()
        };

        for asset in selection.iter() {
            let file = asset.to_fs_path(&self.project_root);
            if !file.exists() {
                debug!("Already gone: {}", asset);
                summary.skipped.push(asset.clone());
                continue;
            }

            if self.dry_run {
                info!("Would delete: {}", asset);
                summary.deleted.push(asset.clone());
                continue;
            }

            delete_file(&file)?;
            for ext in &self.config.sidecar_extensions {
                let sidecar = asset.with_sidecar(ext).to_fs_path(&self.project_root);
                if sidecar.exists() {
                    delete_file(&sidecar)?;
                }
            }

            info!("Deleted: {}", asset);
            summary.deleted.push(asset.clone());
        }

        Ok(summary)
    }
}

fn delete_file(path: &Path) -> Result<(), RemovalError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RemovalError::Delete {
            path: path.to_path_buf(),
            source,
        }),
    }
}
