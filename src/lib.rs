//! unusedassets - Find assets a Unity project never uses
//!
//! An asset is used when some enabled scene depends on it, directly or
//! through other assets. Everything else under the asset folder is a
//! removal candidate.
//!
//! # Architecture
//!
//! A detection run consists of:
//! 1. **Catalog** - Enumerate every file under the asset prefix
//! 2. **Roots** - Read enabled scenes from the build settings and config
//! 3. **Closure** - Expand the roots into the set of used assets
//! 4. **Classification** - Report candidates outside the closure; scripts
//!    fall back to a textual name search
//! 5. **Reporting** - Terminal or JSON output, optional removal

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod graph;
pub mod removal;
pub mod report;
pub mod resolver;
pub mod watch;

pub use analysis::{
    DetectionError, DetectionSession, Detector, SelectionError, SelectionSet, UnusedAsset,
    UnusedReason, UnusedReport,
};
pub use config::Config;
pub use discovery::{AssetKind, AssetPath, ContentReader, FsContentReader, PathCatalog};
pub use removal::{RemovalError, RemovalSummary, SafeDeleter};
pub use report::{ReportFormat, Reporter};
pub use resolver::{ClosureProvider, GuidClosureProvider, ResolveError, RootEntry, RootSource};
pub use watch::{FileWatcher, WatchError};
