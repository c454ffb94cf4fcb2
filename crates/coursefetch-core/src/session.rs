//! Session capabilities consumed by download descriptors.

use crate::config::CoursefetchConfig;

/// Current site/session as seen by descriptors.
pub trait Session: Send + Sync {
    fn current_site_id(&self) -> String;

    /// Whether the site permits downloading files at all.
    fn can_download_files(&self) -> bool;
}

/// Session backed by static configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredSession {
    site_id: String,
    download_files: bool,
}

impl ConfiguredSession {
    pub fn new(site_id: impl Into<String>, download_files: bool) -> Self {
        Self {
            site_id: site_id.into(),
            download_files,
        }
    }

    pub fn from_config(cfg: &CoursefetchConfig) -> Self {
        Self::new(cfg.site_id.clone(), cfg.download_files)
    }
}

impl Session for ConfiguredSession {
    fn current_site_id(&self) -> String {
        self.site_id.clone()
    }

    fn can_download_files(&self) -> bool {
        self.download_files
    }
}
