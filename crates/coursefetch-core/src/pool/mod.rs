//! File-pool collaborator interface.
//!
//! The pool owns queuing, transfer, on-disk storage and progress tracking.
//! Download descriptors only talk to it through [`FilePool`]; every item they
//! touch is scoped by `(site, component, item_id)`.

mod error;
mod memory;

pub use error::PoolError;
pub use memory::{MemoryFilePool, PoolOperation};

use crate::model::{ModuleFile, ModuleId};
use async_trait::async_trait;

/// Where a package of files is stored and how it is fingerprinted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTarget {
    pub component: String,
    pub item_id: ModuleId,
    pub revision: i64,
    pub timemodified: i64,
    /// Keep files under this directory so relative references between them resolve.
    pub dir_path: Option<String>,
}

#[async_trait]
pub trait FilePool: Send + Sync {
    /// Queue a single URL for background download.
    async fn enqueue_by_url(
        &self,
        site: &str,
        url: &str,
        component: &str,
        item_id: ModuleId,
        timemodified: i64,
    ) -> Result<(), PoolError>;

    /// Download a single URL now.
    async fn download_by_url(
        &self,
        site: &str,
        url: &str,
        component: &str,
        item_id: ModuleId,
        timemodified: i64,
    ) -> Result<(), PoolError>;

    /// Queue a set of files as one package.
    async fn enqueue_package(
        &self,
        site: &str,
        files: &[ModuleFile],
        target: &PackageTarget,
    ) -> Result<(), PoolError>;

    /// Download a set of files as one package now.
    async fn download_package(
        &self,
        site: &str,
        files: &[ModuleFile],
        target: &PackageTarget,
    ) -> Result<(), PoolError>;

    /// Total size in bytes of `files`.
    fn sum_file_sizes(&self, files: &[ModuleFile]) -> u64;

    /// Bytes currently stored for `(component, item_id)`.
    async fn size_by_component(
        &self,
        site: &str,
        component: &str,
        item_id: ModuleId,
    ) -> Result<u64, PoolError>;

    fn derive_timemodified(&self, files: &[ModuleFile]) -> i64;

    fn derive_revision(&self, files: &[ModuleFile]) -> i64;

    /// Whether `url` is queued or downloading. Fails for URLs the pool does not know.
    async fn is_file_in_flight(&self, site: &str, url: &str) -> Result<bool, PoolError>;

    /// Change-notification identifier for `url`.
    async fn event_name_for_url(&self, site: &str, url: &str) -> Result<String, PoolError>;

    async fn invalidate_by_component(
        &self,
        site: &str,
        component: &str,
        item_id: ModuleId,
    ) -> Result<(), PoolError>;

    async fn remove_by_component(
        &self,
        site: &str,
        component: &str,
        item_id: ModuleId,
    ) -> Result<(), PoolError>;
}
