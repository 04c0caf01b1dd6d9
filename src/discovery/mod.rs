mod asset_path;
mod catalog;
mod reader;

pub use asset_path::AssetPath;
pub use catalog::{AssetKind, CatalogError, CatalogScan, CatalogStats, PathCatalog};
pub use reader::{ContentReader, FsContentReader};
