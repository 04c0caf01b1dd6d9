mod loader;
mod patterns;

pub use loader::{Config, RootConfig};
pub use patterns::{PathPatterns, PatternError};
