use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A project-relative file path with forward slashes, e.g. `Assets/Art/Hero.png`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AssetPath(String);

impl AssetPath {
    /// Create from a project-relative string, normalizing separators
    pub fn new(path: impl Into<String>) -> Self {
        let path: String = path.into();
        let normalized = path.replace('\\', "/");
        Self(normalized.trim_start_matches("./").to_string())
    }

    /// Create from a path relative to the project root
    pub fn from_relative(path: &Path) -> Self {
        let parts: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Self(parts.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Extension after the last dot of the file name.
    /// Dot-files such as `.gitkeep` have no extension.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[idx + 1..]),
            _ => None,
        }
    }

    /// File name with the last extension stripped (`Foo.Editor.cs` -> `Foo.Editor`)
    pub fn stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }

    /// Parent directory, empty for top-level entries
    pub fn parent(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Sidecar path for this asset (`Hero.png` -> `Hero.png.meta`)
    pub fn with_sidecar(&self, extension: &str) -> AssetPath {
        AssetPath(format!("{}.{}", self.0, extension))
    }

    /// Strip a trailing sidecar extension (`Hero.png.meta` -> `Hero.png`)
    pub fn strip_sidecar(&self, extension: &str) -> Option<AssetPath> {
        self.0
            .strip_suffix(extension)
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|rest| !rest.is_empty())
            .map(|rest| AssetPath(rest.to_string()))
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Absolute location on disk
    pub fn to_fs_path(&self, project_root: &Path) -> PathBuf {
        let mut path = project_root.to_path_buf();
        for segment in self.0.split('/') {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
