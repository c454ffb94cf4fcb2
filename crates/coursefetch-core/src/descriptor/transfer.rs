//! Download, prefetch, invalidate and remove.

use super::DownloadDescriptor;
use crate::model::{CourseId, Module, ModuleId};
use crate::pool::{PackageTarget, PoolError};
use futures::future::try_join_all;

/// Immediate download or background queueing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// Fetch now.
    Download,
    /// Enqueue at lower priority.
    Prefetch,
}

impl DownloadDescriptor {
    /// Download the module's files now, content files optionally under `dir_path`.
    pub async fn download(
        &self,
        module: &Module,
        course_id: CourseId,
        dir_path: Option<&str>,
    ) -> Result<(), PoolError> {
        self.strategy
            .download_or_prefetch(self, module, course_id, TransferMode::Download, dir_path)
            .await
    }

    /// Queue the module's files for background download.
    /// `single` is true when only this module is being prefetched.
    pub async fn prefetch_content(
        &self,
        module: &Module,
        course_id: CourseId,
        single: bool,
    ) -> Result<(), PoolError> {
        tracing::debug!(
            component = %self.component,
            module_id = module.id,
            single,
            "prefetching module"
        );
        self.strategy
            .download_or_prefetch(self, module, course_id, TransferMode::Prefetch, None)
            .await
    }

    /// Standard pipeline: resolve intro files, fingerprint, then one pool call
    /// per intro file plus one package call for the content files. The calls
    /// run concurrently and all must succeed.
    pub async fn run_transfer(
        &self,
        module: &Module,
        course_id: CourseId,
        mode: TransferMode,
        dir_path: Option<&str>,
    ) -> Result<(), PoolError> {
        let site = self.site_id();
        let intro_files = self.intro_files(module, course_id, None).await?;
        let fingerprint = self
            .compute_fingerprint(module, course_id, Some(intro_files.clone()))
            .await?;
        let content_files = self.content_files(module);

        tracing::debug!(
            component = %self.component,
            module_id = module.id,
            ?mode,
            intro = intro_files.len(),
            content = content_files.len(),
            revision = fingerprint.revision,
            timemodified = fingerprint.timemodified,
            "transferring module files"
        );

        let target = PackageTarget {
            component: self.component.clone(),
            item_id: module.id,
            revision: fingerprint.revision,
            timemodified: fingerprint.timemodified,
            dir_path: dir_path.map(str::to_string),
        };

        let intro_calls = intro_files.iter().map(|f| {
            let timemodified = f.timemodified.unwrap_or(0);
            match mode {
                TransferMode::Download => self.pool.download_by_url(
                    &site,
                    &f.fileurl,
                    &self.component,
                    module.id,
                    timemodified,
                ),
                TransferMode::Prefetch => self.pool.enqueue_by_url(
                    &site,
                    &f.fileurl,
                    &self.component,
                    module.id,
                    timemodified,
                ),
            }
        });
        let package_call = match mode {
            TransferMode::Download => self.pool.download_package(&site, &content_files, &target),
            TransferMode::Prefetch => self.pool.enqueue_package(&site, &content_files, &target),
        };

        futures::try_join!(try_join_all(intro_calls), package_call)?;
        Ok(())
    }

    /// Mark every cached file of the module stale.
    pub async fn invalidate_content(&self, module_id: ModuleId) -> Result<(), PoolError> {
        self.pool
            .invalidate_by_component(&self.site_id(), &self.component, module_id)
            .await
    }

    /// Delete every cached file of the module.
    pub async fn remove_files(
        &self,
        module: &Module,
        course_id: CourseId,
    ) -> Result<(), PoolError> {
        tracing::debug!(
            component = %self.component,
            module_id = module.id,
            course_id,
            "removing cached module files"
        );
        self.pool
            .remove_by_component(&self.site_id(), &self.component, module.id)
            .await
    }
}
