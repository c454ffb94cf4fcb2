//! Which files belong to a module, and how big they are.

use super::DownloadDescriptor;
use crate::html::extract_downloadable_files;
use crate::model::{ContentFile, CourseId, IntroFile, Module, ModuleFile, ModuleInstance};
use crate::pool::PoolError;

impl DownloadDescriptor {
    pub fn is_file_downloadable(&self, file: &ModuleFile) -> bool {
        self.strategy.is_file_downloadable(file)
    }

    /// Downloadable entries of `module.contents`, in source order.
    pub fn content_files(&self, module: &Module) -> Vec<ContentFile> {
        module
            .contents
            .iter()
            .filter(|f| self.is_file_downloadable(f))
            .cloned()
            .collect()
    }

    /// Intro files as resolved by the strategy.
    pub async fn intro_files(
        &self,
        module: &Module,
        course_id: CourseId,
        instance: Option<&ModuleInstance>,
    ) -> Result<Vec<IntroFile>, PoolError> {
        self.strategy
            .intro_files(self, module, course_id, instance)
            .await
    }

    /// Default intro-file resolution: explicit instance list, instance intro,
    /// module description, nothing.
    pub fn default_intro_files(
        &self,
        module: &Module,
        instance: Option<&ModuleInstance>,
    ) -> Vec<IntroFile> {
        if let Some(inst) = instance {
            if let Some(files) = &inst.introfiles {
                return files.clone();
            }
            if let Some(intro) = &inst.intro {
                return extract_downloadable_files(intro, &self.extract);
            }
        }
        match &module.description {
            Some(description) => extract_downloadable_files(description, &self.extract),
            None => Vec::new(),
        }
    }

    /// Intro files followed by content files. Duplicates are kept.
    pub async fn all_files(
        &self,
        module: &Module,
        course_id: CourseId,
    ) -> Result<Vec<ModuleFile>, PoolError> {
        let mut files = self.intro_files(module, course_id, None).await?;
        files.extend(self.content_files(module));
        Ok(files)
    }

    /// Whether the module has anything to cache, as decided by the strategy.
    pub fn is_downloadable(&self, module: &Module, course_id: CourseId) -> bool {
        self.strategy.is_downloadable(module, course_id)
    }

    /// Bytes needed to cache every file of the module.
    pub async fn download_size(
        &self,
        module: &Module,
        course_id: CourseId,
    ) -> Result<u64, PoolError> {
        let files = self.all_files(module, course_id).await?;
        Ok(self.pool.sum_file_sizes(&files))
    }

    /// Bytes the pool currently holds for this module.
    pub async fn downloaded_size(
        &self,
        module: &Module,
        _course_id: CourseId,
    ) -> Result<u64, PoolError> {
        self.pool
            .size_by_component(&self.site_id(), &self.component, module.id)
            .await
    }
}
