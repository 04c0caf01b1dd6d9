mod safe_delete;

pub use safe_delete::{RemovalError, RemovalSummary, SafeDeleter};
