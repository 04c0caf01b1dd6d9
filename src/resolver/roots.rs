use super::ResolveError;
use crate::config::Config;
use crate::discovery::AssetPath;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An entry-point document and whether it takes part in the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEntry {
    pub path: AssetPath,
    pub enabled: bool,
}

/// Collects root documents from the build settings file and configuration
pub struct RootSource<'a> {
    config: &'a Config,
    project_root: PathBuf,
}

impl<'a> RootSource<'a> {
    pub fn new(config: &'a Config, project_root: &Path) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
        }
    }

    /// All root entries, build settings first.
    ///
    /// Build settings scenes that no longer exist on disk are dropped with a
    /// warning. Entries naming the same path are merged, and the merged entry
    /// is enabled when any of them is.
    pub fn load(&self) -> Result<Vec<RootEntry>, ResolveError> {
        let scenes = self.read_build_settings()?.into_iter().filter(|scene| {
            let exists = scene.path.to_fs_path(&self.project_root).is_file();
            if !exists && scene.enabled {
                warn!("Skipping missing scene listed in build settings: {}", scene.path);
            }
            exists
        });

        let configured = self.config.roots.iter().map(|r| RootEntry {
            path: AssetPath::new(r.path.as_str()),
            enabled: r.enabled,
        });

        let mut entries: Vec<RootEntry> = Vec::new();
        let mut positions: HashMap<AssetPath, usize> = HashMap::new();
        for entry in scenes.chain(configured) {
            match positions.get(&entry.path) {
                Some(&i) => entries[i].enabled |= entry.enabled,
                None => {
                    positions.insert(entry.path.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        debug!(
            "Loaded {} roots ({} enabled)",
            entries.len(),
            entries.iter().filter(|e| e.enabled).count()
        );
        Ok(entries)
    }

    fn read_build_settings(&self) -> Result<Vec<RootEntry>, ResolveError> {
        let path = self.project_root.join(&self.config.build_settings);
        if !path.is_file() {
            debug!("No build settings at {}", path.display());
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| {
            ResolveError::BuildSettingsRead {
                path: path.clone(),
                source,
            }
        })?;

        parse_build_settings(&contents)
            .map_err(|source| ResolveError::BuildSettingsParse { path, source })
    }
}

#[derive(Deserialize)]
struct BuildSettingsDocument {
    #[serde(rename = "EditorBuildSettings")]
    editor_build_settings: EditorBuildSettings,
}

#[derive(Deserialize)]
struct EditorBuildSettings {
    #[serde(rename = "m_Scenes", default)]
    scenes: Vec<SceneEntry>,
}

#[derive(Deserialize)]
struct SceneEntry {
    #[serde(default)]
    enabled: u8,
    #[serde(default)]
    path: Option<String>,
}

/// Parse the scene list of an `EditorBuildSettings.asset` file.
///
/// Unity prefixes its YAML with `%YAML`/`%TAG` directives and `--- !u!` object
/// headers that a plain YAML parser rejects; those lines are dropped first.
pub fn parse_build_settings(contents: &str) -> Result<Vec<RootEntry>, serde_yaml::Error> {
    let yaml = contents
        .lines()
        .filter(|line| !line.starts_with('%') && !line.starts_with("---"))
        .collect::<Vec<_>>()
        .join("\n");

    let document: BuildSettingsDocument = serde_yaml::from_str(&yaml)?;

    Ok(document
        .editor_build_settings
        .scenes
        .into_iter()
        .filter_map(|scene| {
            let path = scene.path.filter(|p| !p.is_empty())?;
            Some(RootEntry {
                path: AssetPath::new(path),
                enabled: scene.enabled != 0,
            })
        })
        .collect())
}
