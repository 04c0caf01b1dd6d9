//! GUID index built from sidecar files
//!
//! Every asset has a sidecar (`Hero.png.meta`) whose `guid:` line identifies
//! it. Serialized assets refer to each other by that GUID, so resolving a
//! reference means looking the GUID up here.

use crate::config::Config;
use crate::discovery::AssetPath;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct AssetIndex {
    /// Lowercase GUID -> asset path
    by_guid: HashMap<String, AssetPath>,

    /// Text-serialized assets that may declare dependencies, sorted
    dependency_sources: Vec<AssetPath>,
}

impl AssetIndex {
    /// Walk the asset directory, reading every sidecar file
    pub fn scan(config: &Config, project_root: &Path) -> Self {
        let mut index = Self::default();

        let prefix = config.normalized_prefix();
        let asset_dir = project_root.join(prefix.trim_end_matches('/'));
        if !asset_dir.is_dir() {
            return index;
        }

        let walker = walkdir::WalkDir::new(&asset_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                e.depth() == 0 || !(name.starts_with('.') || name.ends_with('~'))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(project_root) else {
                continue;
            };
            let path = AssetPath::from_relative(relative);

            if config.is_sidecar(&path) {
                index.read_sidecar(config, &path, entry.path());
            } else if config.is_dependency_source(&path) {
                index.dependency_sources.push(path);
            }
        }
        index.dependency_sources.sort();

        debug!(
            "Indexed {} GUIDs, {} dependency sources",
            index.by_guid.len(),
            index.dependency_sources.len()
        );
        index
    }

    fn read_sidecar(&mut self, config: &Config, sidecar: &AssetPath, fs_path: &Path) {
        let Some(asset) = config
            .sidecar_extensions
            .iter()
            .find_map(|ext| sidecar.strip_sidecar(ext))
        else {
            return;
        };

        let contents = match fs::read_to_string(fs_path) {
            Ok(c) => c,
            Err(e) => {
                debug!("Skipping unreadable sidecar {}: {}", sidecar, e);
                return;
            }
        };

        match parse_sidecar_guid(&contents) {
            Some(guid) => self.insert(guid, asset),
            None => debug!("No GUID in sidecar: {}", sidecar),
        }
    }

    /// Register a GUID for an asset
    pub fn insert(&mut self, guid: &str, asset: AssetPath) {
        self.by_guid.insert(guid.to_ascii_lowercase(), asset);
    }

    /// Register a text-serialized asset to be scanned for references
    pub fn add_dependency_source(&mut self, asset: AssetPath) {
        self.dependency_sources.push(asset);
    }

    /// Resolve a GUID to its asset path
    pub fn resolve(&self, guid: &str) -> Option<&AssetPath> {
        self.by_guid.get(&guid.to_ascii_lowercase())
    }

    pub fn dependency_sources(&self) -> &[AssetPath] {
        &self.dependency_sources
    }

    pub fn guid_count(&self) -> usize {
        self.by_guid.len()
    }
}

/// Extract the value of the top-level `guid:` line of a sidecar file
fn parse_sidecar_guid(contents: &str) -> Option<&str> {
    contents
        .lines()
        .find_map(|line| line.strip_prefix("guid:"))
        .map(str::trim)
        .filter(|guid| !guid.is_empty())
}
