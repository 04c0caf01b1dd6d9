mod builder;
mod detector;
mod scanner;
mod selection;
mod session;

pub use builder::UnusedSetBuilder;
pub use detector::{DetectionError, Detector};
pub use scanner::TextualReferenceScanner;
pub use selection::{SelectionError, SelectionSet};
pub use session::DetectionSession;

use crate::discovery::{AssetKind, AssetPath};

/// Why a candidate was judged unused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnusedReason {
    /// Not reachable from any enabled root
    NotInClosure,

    /// Script whose name appears in no other scanned file
    NoTextualReference,
}

impl UnusedReason {
    pub fn code(&self) -> &'static str {
        match self {
            UnusedReason::NotInClosure => "UA001",
            UnusedReason::NoTextualReference => "UA002",
        }
    }

    pub fn message(&self, path: &AssetPath) -> String {
        match self {
            UnusedReason::NotInClosure => {
                format!("'{}' is not used by any enabled scene", path.file_name())
            }
            UnusedReason::NoTextualReference => {
                format!("'{}' is never mentioned by another file", path.stem())
            }
        }
    }
}

/// A candidate judged unused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedAsset {
    pub path: AssetPath,
    pub kind: AssetKind,
    pub reason: UnusedReason,
}

impl UnusedAsset {
    pub fn new(path: AssetPath, kind: AssetKind, reason: UnusedReason) -> Self {
        Self { path, kind, reason }
    }

    pub fn message(&self) -> String {
        self.reason.message(&self.path)
    }
}

/// Unused candidates in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnusedReport {
    entries: Vec<UnusedAsset>,
}

impl UnusedReport {
    pub fn new(entries: Vec<UnusedAsset>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[UnusedAsset] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnusedAsset> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &AssetPath> {
        self.entries.iter().map(|e| &e.path)
    }

    pub fn contains(&self, path: &AssetPath) -> bool {
        self.entries.iter().any(|e| &e.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of the given kind
    pub fn count_kind(&self, kind: AssetKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a UnusedReport {
    type Item = &'a UnusedAsset;
    type IntoIter = std::slice::Iter<'a, UnusedAsset>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
