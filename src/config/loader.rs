use super::patterns::{PathPatterns, PatternError};
use crate::discovery::{AssetKind, AssetPath};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for an unused asset scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project-relative prefix every candidate path starts with
    pub asset_prefix: String,

    /// Consider code files (scripts) as removal candidates
    pub include_code: bool,

    /// Also search other code files when looking for textual references
    pub scan_code_files: bool,

    /// Extensions (without dot) of the code category
    pub code_extensions: Vec<String>,

    /// Extensions (without dot) of sidecar metadata files
    pub sidecar_extensions: Vec<String>,

    /// Extensions (without dot) of text-serialized assets that can declare dependencies
    pub dependency_extensions: Vec<String>,

    /// Build settings file listing the root documents, relative to the project
    pub build_settings: PathBuf,

    /// Extra root documents
    pub roots: Vec<RootConfig>,

    /// Patterns to exclude from the catalog entirely
    pub exclude: Vec<String>,

    /// Patterns to retain - never report as unused
    pub retain: Vec<String>,

    /// Honour .gitignore and .ignore files while enumerating assets
    pub respect_gitignore: bool,
}

/// A root document declared in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    pub path: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_prefix: "Assets/".to_string(),
            include_code: false,
            scan_code_files: false,
            code_extensions: vec!["cs".to_string()],
            sidecar_extensions: vec!["meta".to_string()],
            dependency_extensions: [
                "unity",
                "prefab",
                "mat",
                "asset",
                "controller",
                "overrideController",
                "anim",
                "mask",
                "playable",
                "physicMaterial",
                "physicsMaterial2D",
                "spriteatlas",
                "lighting",
                "mixer",
                "renderTexture",
                "terrainlayer",
                "guiskin",
                "fontsettings",
                "flare",
                "cubemap",
                "shadervariants",
                "preset",
                "signal",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            build_settings: PathBuf::from("ProjectSettings/EditorBuildSettings.asset"),
            roots: vec![],
            exclude: vec![],
            retain: vec![],
            respect_gitignore: false,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".unusedassets.yml",
            ".unusedassets.yaml",
            ".unusedassets.toml",
            "unusedassets.yml",
            "unusedassets.yaml",
            "unusedassets.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Asset prefix with exactly one trailing slash
    pub fn normalized_prefix(&self) -> String {
        format!("{}/", self.asset_prefix.trim_end_matches('/'))
    }

    pub fn is_code(&self, path: &AssetPath) -> bool {
        has_extension(path, &self.code_extensions)
    }

    pub fn is_sidecar(&self, path: &AssetPath) -> bool {
        has_extension(path, &self.sidecar_extensions)
    }

    /// Whether the asset is text-serialized and may reference other assets
    pub fn is_dependency_source(&self, path: &AssetPath) -> bool {
        has_extension(path, &self.dependency_extensions)
    }

    pub fn kind_of(&self, path: &AssetPath) -> AssetKind {
        if self.is_code(path) {
            AssetKind::Code
        } else if self.is_sidecar(path) {
            AssetKind::Sidecar
        } else {
            AssetKind::Asset
        }
    }

    /// Compiled `exclude` patterns
    pub fn exclude_patterns(&self) -> std::result::Result<PathPatterns, PatternError> {
        PathPatterns::new(&self.exclude)
    }

    /// Compiled `retain` patterns
    pub fn retain_patterns(&self) -> std::result::Result<PathPatterns, PatternError> {
        PathPatterns::new(&self.retain)
    }
}

fn has_extension(path: &AssetPath, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| extensions.iter().any(|e| e == ext))
        .unwrap_or(false)
}
