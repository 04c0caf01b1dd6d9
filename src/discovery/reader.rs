use super::AssetPath;
use std::io;
use std::path::{Path, PathBuf};

/// Source of file contents for the textual reference scan
pub trait ContentReader {
    /// Read a project file as UTF-8 text
    fn read_text(&self, path: &AssetPath) -> io::Result<String>;
}

/// Reads project files straight from disk
#[derive(Debug, Clone)]
pub struct FsContentReader {
    project_root: PathBuf,
}

impl FsContentReader {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

impl ContentReader for FsContentReader {
    fn read_text(&self, path: &AssetPath) -> io::Result<String> {
        std::fs::read_to_string(path.to_fs_path(&self.project_root))
    }
}
