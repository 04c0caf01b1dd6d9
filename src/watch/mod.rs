//! Watch mode
//!
//! Re-runs detection whenever an asset or the build settings change.

use crate::config::Config;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Watch mode errors
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to create file watcher: {0}")]
    WatcherError(#[from] notify::Error),
    #[error("Failed to receive events: {0}")]
    RecvError(#[from] std::sync::mpsc::RecvError),
}

/// File watcher for continuous detection
pub struct FileWatcher {
    /// Debounce duration in milliseconds
    debounce_ms: u64,
    project_root: PathBuf,
    asset_prefix: String,
    build_settings: PathBuf,
}

impl FileWatcher {
    pub fn new(project_root: &Path, config: &Config) -> Self {
        // Event paths come back absolute and resolved
        let project_root = project_root
            .canonicalize()
            .unwrap_or_else(|_| project_root.to_path_buf());

        Self {
            debounce_ms: 500,
            project_root,
            asset_prefix: config.normalized_prefix(),
            build_settings: config.build_settings.clone(),
        }
    }

    /// Check if a path should trigger a new run
    fn should_trigger(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.project_root).unwrap_or(path);

        if relative == self.build_settings {
            return true;
        }

        let hidden = relative.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            name.starts_with('.') && name != "." && name != ".."
        });
        if hidden {
            return false;
        }

        let relative = relative.to_string_lossy().replace('\\', "/");
        relative.starts_with(&self.asset_prefix)
    }

    /// Watch the project and call `on_change` once up front and after every
    /// relevant batch of changes. The callback returns false to stop.
    pub fn watch<F>(&self, mut on_change: F) -> Result<(), WatchError>
    where
        F: FnMut() -> bool,
    {
        let (tx, rx) = channel();

        let mut debouncer = new_debouncer(Duration::from_millis(self.debounce_ms), tx)?;
        debouncer
            .watcher()
            .watch(&self.project_root, RecursiveMode::Recursive)?;

        println!();
        println!("{}", "👁  Watch mode active. Press Ctrl+C to stop.".cyan().bold());
        println!(
            "{}",
            format!("   Watching: {}", self.project_root.display()).dimmed()
        );
        println!();

        if !on_change() {
            return Ok(());
        }

        loop {
            match rx.recv()? {
                Ok(events) => {
                    let relevant: Vec<_> = events
                        .iter()
                        .filter(|e| {
                            matches!(
                                e.kind,
                                DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
                            ) && self.should_trigger(&e.path)
                        })
                        .collect();

                    if relevant.is_empty() {
                        continue;
                    }

                    println!();
                    println!(
                        "{}",
                        format!(
                            "🔄 Changes detected in {} file(s), re-running detection...",
                            relevant.len()
                        )
                        .yellow()
                    );
                    for event in relevant.iter().take(5) {
                        debug!("Changed: {}", event.path.display());
                        if let Some(name) = event.path.file_name() {
                            println!("   • {}", name.to_string_lossy().dimmed());
                        }
                    }
                    if relevant.len() > 5 {
                        println!("   • ... and {} more", relevant.len() - 5);
                    }
                    println!();

                    if !on_change() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Watch error: {:?}", e);
                }
            }
        }

        Ok(())
    }
}
