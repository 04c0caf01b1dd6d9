use crate::config::Config;
use crate::discovery::{AssetPath, ContentReader};
use tracing::{debug, trace};

/// Decides whether a script is mentioned anywhere else in the project.
///
/// This is a plain substring search for the script's file stem. A mention in
/// an unrelated context still counts, and a renamed or reflective reference
/// is missed.
pub struct TextualReferenceScanner<'a> {
    config: &'a Config,
    reader: &'a dyn ContentReader,
}

impl<'a> TextualReferenceScanner<'a> {
    pub fn new(config: &'a Config, reader: &'a dyn ContentReader) -> Self {
        Self { config, reader }
    }

    /// Identifier searched for: the file name without its last extension
    pub fn identifier(candidate: &AssetPath) -> &str {
        candidate.stem()
    }

    /// True as soon as one other candidate's text contains the identifier.
    ///
    /// Skips the candidate itself, sidecar files and, unless
    /// `scan_code_files` is set, every code file. Unreadable files never match.
    pub fn is_referenced(&self, candidate: &AssetPath, all_candidates: &[AssetPath]) -> bool {
        let identifier = Self::identifier(candidate);

        for path in all_candidates {
            if path == candidate || self.config.is_sidecar(path) {
                continue;
            }
            if !self.config.scan_code_files && self.config.is_code(path) {
                continue;
            }

            match self.reader.read_text(path) {
                Ok(content) => {
                    if content.contains(identifier) {
                        debug!("{} is referenced from {}", candidate, path);
                        return true;
                    }
                }
                Err(e) => {
                    debug!("Skipping unreadable {}: {}", path, e);
                }
            }
        }

        trace!("No textual reference to '{}'", identifier);
        false
    }
}
