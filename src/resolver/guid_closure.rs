use super::{ClosureProvider, ResolveError};
use crate::config::Config;
use crate::discovery::AssetPath;
use crate::graph::{AssetGraphBuilder, AssetIndex};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Closure provider backed by sidecar GUIDs.
///
/// Every call re-indexes the project and rebuilds the dependency graph, so
/// the answer always reflects the tree as it is on disk.
pub struct GuidClosureProvider<'a> {
    config: &'a Config,
    project_root: PathBuf,
}

impl<'a> GuidClosureProvider<'a> {
    pub fn new(config: &'a Config, project_root: &Path) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
        }
    }
}

impl ClosureProvider for GuidClosureProvider<'_> {
    fn closure(&self, roots: &[AssetPath]) -> Result<Vec<AssetPath>, ResolveError> {
        if let Some(missing) = roots
            .iter()
            .find(|root| !root.to_fs_path(&self.project_root).is_file())
        {
            return Err(ResolveError::MissingRoot(missing.clone()));
        }

        let mut index = AssetIndex::scan(self.config, &self.project_root);

        // Roots outside the asset directory or without a sidecar still get scanned
        for root in roots {
            if self.config.is_dependency_source(root)
                && !index.dependency_sources().contains(root)
            {
                index.add_dependency_source(root.clone());
            }
        }

        let graph = AssetGraphBuilder::new(&self.project_root).build(&index)?;
        let reachable = graph.reachable_from(roots);

        debug!("{} roots reach {} assets", roots.len(), reachable.len());
        Ok(reachable)
    }
}
