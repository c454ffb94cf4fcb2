//! Per-component download descriptors.
//!
//! A [`DownloadDescriptor`] decides which files of a module are worth caching,
//! sizes and fingerprints them, and hands download/remove/invalidate work to
//! the [`FilePool`], always scoped by its `component`. Descriptors are built
//! from a [`DescriptorTemplate`] that carries the injected collaborators and
//! the [`PrefetchStrategy`] holding any per-component overrides.

mod events;
mod files;
mod fingerprint;
mod strategy;
mod transfer;

pub use strategy::{AnyFileStrategy, DefaultStrategy, PackageDirStrategy, PrefetchStrategy};
pub use transfer::TransferMode;

use crate::html::ExtractOptions;
use crate::pool::FilePool;
use crate::session::Session;
use std::fmt;
use std::sync::Arc;

/// Collaborators and overrides shared by every descriptor it creates.
#[derive(Clone)]
pub struct DescriptorTemplate {
    pool: Arc<dyn FilePool>,
    session: Arc<dyn Session>,
    strategy: Arc<dyn PrefetchStrategy>,
    extract: Arc<ExtractOptions>,
}

impl DescriptorTemplate {
    pub fn new(pool: Arc<dyn FilePool>, session: Arc<dyn Session>) -> Self {
        Self {
            pool,
            session,
            strategy: Arc::new(DefaultStrategy),
            extract: Arc::new(ExtractOptions::default()),
        }
    }

    /// Options used when pulling intro files out of rich text.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = Arc::new(extract);
        self
    }

    /// A template whose descriptors use `strategy` for the overridable operations.
    pub fn with_strategy(&self, strategy: impl PrefetchStrategy + 'static) -> Self {
        Self {
            strategy: Arc::new(strategy),
            ..self.clone()
        }
    }

    /// Create a descriptor for `component`; everything else is inherited.
    pub fn create_descriptor(&self, component: impl Into<String>) -> DownloadDescriptor {
        DownloadDescriptor {
            component: component.into(),
            pool: Arc::clone(&self.pool),
            session: Arc::clone(&self.session),
            strategy: Arc::clone(&self.strategy),
            extract: Arc::clone(&self.extract),
        }
    }
}

/// Download operations for one content type.
///
/// Holds no mutable state: `component` is fixed at construction and the
/// collaborators are shared, so a descriptor can be used from many tasks.
#[derive(Clone)]
pub struct DownloadDescriptor {
    component: String,
    pool: Arc<dyn FilePool>,
    session: Arc<dyn Session>,
    strategy: Arc<dyn PrefetchStrategy>,
    extract: Arc<ExtractOptions>,
}

impl DownloadDescriptor {
    /// Cache namespace for every pool call this descriptor makes.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Whether the current site permits file downloads at all.
    pub fn is_enabled(&self) -> bool {
        self.session.can_download_files()
    }

    pub(crate) fn site_id(&self) -> String {
        self.session.current_site_id()
    }
}

impl fmt::Debug for DownloadDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadDescriptor")
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}
