//! File-pool error type.

use crate::model::ModuleId;
use thiserror::Error;

/// Failure reported by a [`super::FilePool`]. Descriptors forward it untouched.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool has no record of this URL.
    #[error("unknown file: {url}")]
    UnknownFile { url: String },

    /// Nothing is stored for the given component item.
    #[error("nothing cached for {component} item {item_id}")]
    NotCached { component: String, item_id: ModuleId },

    /// Backend-specific failure (network, quota, ...).
    #[error("file pool backend: {0}")]
    Backend(String),

    #[error("file pool I/O: {0}")]
    Io(#[from] std::io::Error),
}
