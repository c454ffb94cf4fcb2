//! Overridable descriptor operations.
//!
//! Content types differ from the default in a handful of places: which
//! entries count as files, where intro files come from, and how the transfer
//! is laid out. A strategy overrides only the methods it needs; everything
//! else falls through to the default implementation.

use super::{DownloadDescriptor, TransferMode};
use crate::model::{CourseId, IntroFile, Module, ModuleFile, ModuleInstance};
use crate::pool::PoolError;
use async_trait::async_trait;

#[async_trait]
pub trait PrefetchStrategy: Send + Sync {
    /// Default: only entries tagged `type == "file"`.
    fn is_file_downloadable(&self, file: &ModuleFile) -> bool {
        file.is_file()
    }

    /// Default: any contents at all, file or not.
    fn is_downloadable(&self, module: &Module, _course_id: CourseId) -> bool {
        !module.contents.is_empty()
    }

    /// Default: instance `introfiles`, then instance `intro`, then module description.
    async fn intro_files(
        &self,
        descriptor: &DownloadDescriptor,
        module: &Module,
        _course_id: CourseId,
        instance: Option<&ModuleInstance>,
    ) -> Result<Vec<IntroFile>, PoolError> {
        Ok(descriptor.default_intro_files(module, instance))
    }

    /// Default: the descriptor's standard intro + content pipeline.
    async fn download_or_prefetch(
        &self,
        descriptor: &DownloadDescriptor,
        module: &Module,
        course_id: CourseId,
        mode: TransferMode,
        dir_path: Option<&str>,
    ) -> Result<(), PoolError> {
        descriptor
            .run_transfer(module, course_id, mode, dir_path)
            .await
    }
}

/// No overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl PrefetchStrategy for DefaultStrategy {}

/// Packaged HTML content: content files always land under `<base_dir>/<module id>`
/// so relative references between them keep working.
#[derive(Debug, Clone)]
pub struct PackageDirStrategy {
    pub base_dir: String,
}

impl PackageDirStrategy {
    pub fn new(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn dir_for(&self, module: &Module) -> String {
        format!("{}/{}", self.base_dir.trim_end_matches('/'), module.id)
    }
}

#[async_trait]
impl PrefetchStrategy for PackageDirStrategy {
    async fn download_or_prefetch(
        &self,
        descriptor: &DownloadDescriptor,
        module: &Module,
        course_id: CourseId,
        mode: TransferMode,
        dir_path: Option<&str>,
    ) -> Result<(), PoolError> {
        let dir = match dir_path {
            Some(d) => d.to_string(),
            None => self.dir_for(module),
        };
        descriptor
            .run_transfer(module, course_id, mode, Some(&dir))
            .await
    }
}

/// Resource-like content: any entry with a URL is a file, whatever its `type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFileStrategy;

impl PrefetchStrategy for AnyFileStrategy {
    fn is_file_downloadable(&self, file: &ModuleFile) -> bool {
        !file.fileurl.is_empty()
    }
}
