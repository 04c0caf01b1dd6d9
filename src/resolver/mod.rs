//! Root documents and their dependency closure
//!
//! The closure itself is computed by a [`ClosureProvider`]; this module only
//! decides which roots are enabled and turns the provider's answer into a set.

mod guid_closure;
mod roots;

pub use guid_closure::GuidClosureProvider;
pub use roots::{parse_build_settings, RootEntry, RootSource};

use crate::discovery::AssetPath;
use crate::graph::GraphError;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Transitive dependency closure of the enabled roots
pub type UsedSet = HashSet<AssetPath>;

/// Resolver errors. Any of these aborts a detection run.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Root document does not exist: {0}")]
    MissingRoot(AssetPath),
    #[error("Failed to read build settings {path}: {source}")]
    BuildSettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse build settings {path}: {source}")]
    BuildSettingsParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Dependency provider failed: {0}")]
    Provider(String),
}

/// Computes every file transitively used by a set of root documents
pub trait ClosureProvider {
    /// Paths reachable from `roots`, the roots themselves included
    fn closure(&self, roots: &[AssetPath]) -> Result<Vec<AssetPath>, ResolveError>;
}

impl<F> ClosureProvider for F
where
    F: Fn(&[AssetPath]) -> Result<Vec<AssetPath>, ResolveError>,
{
    fn closure(&self, roots: &[AssetPath]) -> Result<Vec<AssetPath>, ResolveError> {
        self(roots)
    }
}

/// Selects the enabled roots and asks the provider for their closure
pub struct RootDependencyResolver<'a> {
    provider: &'a dyn ClosureProvider,
}

impl<'a> RootDependencyResolver<'a> {
    pub fn new(provider: &'a dyn ClosureProvider) -> Self {
        Self { provider }
    }

    /// Dependency closure of the enabled entries of `roots`.
    /// With no enabled root the set is empty and the provider is not consulted.
    pub fn closure(&self, roots: &[RootEntry]) -> Result<UsedSet, ResolveError> {
        let enabled: Vec<AssetPath> = roots
            .iter()
            .filter(|r| r.enabled)
            .map(|r| r.path.clone())
            .collect();

        if enabled.is_empty() {
            debug!("No enabled roots, nothing is used");
            return Ok(UsedSet::new());
        }

        debug!("Resolving closure of {} enabled roots", enabled.len());
        let used: UsedSet = self.provider.closure(&enabled)?.into_iter().collect();
        debug!("{} assets used by enabled roots", used.len());

        Ok(used)
    }
}
