use super::{AssetGraph, AssetIndex};
use crate::discovery::AssetPath;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Graph construction errors
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: AssetPath,
        #[source]
        source: std::io::Error,
    },
}

/// Builds the asset dependency graph from GUID references
pub struct AssetGraphBuilder {
    project_root: PathBuf,

    /// Matches `guid: <32 hex digits>` inside serialized assets
    guid_pattern: Regex,
}

impl AssetGraphBuilder {
    pub fn new(project_root: &Path) -> Self {
        let guid_pattern =
            Regex::new(r"guid:\s*([0-9a-fA-F]{32})").expect("GUID pattern is valid");

        Self {
            project_root: project_root.to_path_buf(),
            guid_pattern,
        }
    }

    /// Read every dependency source of the index and link it to the assets it mentions.
    ///
    /// Files are decoded lossily, so binary-serialized assets contribute no edges
    /// instead of failing. I/O errors are fatal.
    pub fn build(&self, index: &AssetIndex) -> Result<AssetGraph, GraphError> {
        let mut graph = AssetGraph::new();

        for source in index.dependency_sources() {
            graph.add_asset(source);

            let bytes = std::fs::read(source.to_fs_path(&self.project_root)).map_err(|e| {
                GraphError::Read {
                    path: source.clone(),
                    source: e,
                }
            })?;
            let contents = String::from_utf8_lossy(&bytes);

            for guid in self.referenced_guids(&contents) {
                match index.resolve(guid) {
                    Some(target) if target != source => {
                        trace!("{} -> {}", source, target);
                        graph.add_dependency(source, target);
                    }
                    Some(_) => {}
                    None => trace!("Unresolved GUID {} in {}", guid, source),
                }
            }
        }

        debug!(
            "Asset graph: {} assets, {} dependencies",
            graph.asset_count(),
            graph.dependency_count()
        );
        Ok(graph)
    }

    /// GUIDs mentioned in a serialized asset, in order of appearance
    pub fn referenced_guids<'t>(&self, contents: &'t str) -> Vec<&'t str> {
        self.guid_pattern
            .captures_iter(contents)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }
}
