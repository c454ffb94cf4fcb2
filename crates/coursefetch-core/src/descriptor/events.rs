//! Change-notification names for per-file download progress.

use super::DownloadDescriptor;
use crate::model::{Module, ModuleFile};
use crate::pool::PoolError;
use futures::future::{join_all, try_join_all};

impl DownloadDescriptor {
    /// Event name of every downloadable content file.
    pub async fn file_event_names(&self, module: &Module) -> Result<Vec<String>, PoolError> {
        let site = self.site_id();
        let files = self.content_files(module);
        try_join_all(
            files
                .iter()
                .map(|f| self.pool.event_name_for_url(&site, &f.fileurl)),
        )
        .await
    }

    /// Event names of the downloadable content files currently in flight.
    ///
    /// A failed in-flight check counts as "not in flight"; the file is skipped.
    pub async fn downloading_file_event_names(
        &self,
        module: &Module,
    ) -> Result<Vec<String>, PoolError> {
        let site = self.site_id();
        let files = self.content_files(module);

        let checks = join_all(files.iter().map(|f| {
            let site = site.as_str();
            async move {
                match self.pool.is_file_in_flight(site, &f.fileurl).await {
                    Ok(true) => Some(f),
                    Ok(false) => None,
                    Err(e) => {
                        tracing::debug!(url = %f.fileurl, "in-flight check failed, skipping: {}", e);
                        None
                    }
                }
            }
        }))
        .await;
        let in_flight: Vec<&ModuleFile> = checks.into_iter().flatten().collect();

        try_join_all(
            in_flight
                .iter()
                .map(|f| self.pool.event_name_for_url(&site, &f.fileurl)),
        )
        .await
    }
}
