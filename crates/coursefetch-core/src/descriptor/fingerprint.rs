//! Revision/timemodified fingerprint of a module.

use super::DownloadDescriptor;
use crate::model::{CourseId, Fingerprint, IntroFile, Module};
use crate::pool::PoolError;

impl DownloadDescriptor {
    /// Fingerprint over intro files plus every module content entry.
    ///
    /// Non-file entries are included: some content types only signal a change
    /// through them. `intro_files` is resolved when not supplied.
    pub async fn compute_fingerprint(
        &self,
        module: &Module,
        course_id: CourseId,
        intro_files: Option<Vec<IntroFile>>,
    ) -> Result<Fingerprint, PoolError> {
        let mut files = match intro_files {
            Some(files) => files,
            None => self.intro_files(module, course_id, None).await?,
        };
        files.extend(module.contents.iter().cloned());

        Ok(Fingerprint {
            revision: self.pool.derive_revision(&files),
            timemodified: self.pool.derive_timemodified(&files),
        })
    }

    pub async fn revision(&self, module: &Module, course_id: CourseId) -> Result<i64, PoolError> {
        Ok(self.compute_fingerprint(module, course_id, None).await?.revision)
    }

    pub async fn timemodified(
        &self,
        module: &Module,
        course_id: CourseId,
    ) -> Result<i64, PoolError> {
        Ok(self
            .compute_fingerprint(module, course_id, None)
            .await?
            .timemodified)
    }
}
