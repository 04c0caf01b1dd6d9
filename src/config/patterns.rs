use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Invalid glob pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: globset::Error,
}

/// Compiled `exclude`/`retain` globs over project-relative paths.
///
/// `**` spans any number of directories, `*` and `?` stay inside one segment.
/// A pattern without a slash is matched against the file name alone, so
/// `*.psd` matches `Assets/Art/Hero.psd`.
#[derive(Debug, Clone)]
pub struct PathPatterns {
    set: GlobSet,
}

impl PathPatterns {
    pub fn new(patterns: &[String]) -> Result<Self, PatternError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let anchored = if pattern.contains('/') {
                pattern.trim_start_matches('/').to_string()
            } else {
                format!("**/{}", pattern)
            };

            let glob = GlobBuilder::new(&anchored)
                .literal_separator(true)
                .build()
                .map_err(|source| PatternError {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }

        let set = builder.build().map_err(|source| PatternError {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(Self { set })
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.set.is_match(path)
    }
}

impl Default for PathPatterns {
    fn default() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }
}
