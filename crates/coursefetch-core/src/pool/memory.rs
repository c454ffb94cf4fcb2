//! In-memory file pool.
//!
//! Stores no bytes and performs no transfers: it records what it was asked
//! to do and keeps enough bookkeeping (sizes, stale flags, queued URLs) to
//! answer size, in-flight and fingerprint queries. Used by the CLI to show a
//! prefetch plan and by tests as the pool collaborator.

use super::{FilePool, PackageTarget, PoolError};
use crate::model::{ModuleFile, ModuleId};
use async_trait::async_trait;
use parking_lot::Mutex;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Hex chars of the URL digest used as file id.
const FILE_ID_LEN: usize = 16;

/// One call made against the pool, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolOperation {
    EnqueueUrl {
        url: String,
        component: String,
        item_id: ModuleId,
        timemodified: i64,
    },
    DownloadUrl {
        url: String,
        component: String,
        item_id: ModuleId,
        timemodified: i64,
    },
    EnqueuePackage {
        urls: Vec<String>,
        target: PackageTarget,
    },
    DownloadPackage {
        urls: Vec<String>,
        target: PackageTarget,
    },
    Invalidate {
        component: String,
        item_id: ModuleId,
    },
    Remove {
        component: String,
        item_id: ModuleId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct ItemKey {
    site: String,
    component: String,
    item_id: ModuleId,
}

impl ItemKey {
    fn new(site: &str, component: &str, item_id: ModuleId) -> Self {
        Self {
            site: site.to_string(),
            component: component.to_string(),
            item_id,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredFile {
    size: u64,
    stale: bool,
}

#[derive(Debug, Clone)]
struct QueuedFile {
    key: ItemKey,
    url: String,
    size: u64,
}

#[derive(Debug, Default)]
struct PoolState {
    operations: Vec<PoolOperation>,
    stored: BTreeMap<ItemKey, HashMap<String, StoredFile>>,
    queue: Vec<QueuedFile>,
    /// (site, url) pairs the pool has seen.
    known: HashSet<(String, String)>,
    in_flight: HashSet<(String, String)>,
}

impl PoolState {
    fn store(&mut self, key: &ItemKey, url: &str, size: u64) {
        self.known.insert((key.site.clone(), url.to_string()));
        self.stored
            .entry(key.clone())
            .or_default()
            .insert(url.to_string(), StoredFile { size, stale: false });
    }

    /// Drop queued files of `key` and their in-flight flags. Returns how many were dropped.
    fn drop_queued(&mut self, key: &ItemKey) -> usize {
        let (dropped, kept): (Vec<QueuedFile>, Vec<QueuedFile>) =
            std::mem::take(&mut self.queue)
                .into_iter()
                .partition(|q| &q.key == key);
        self.queue = kept;
        for q in &dropped {
            let site_url = (q.key.site.clone(), q.url.clone());
            // another item may still have the same URL queued
            if !self.queue.iter().any(|o| o.key.site == site_url.0 && o.url == site_url.1) {
                self.in_flight.remove(&site_url);
            }
        }
        dropped.len()
    }

    fn enqueue(&mut self, key: &ItemKey, url: &str, size: u64) {
        let site_url = (key.site.clone(), url.to_string());
        self.known.insert(site_url.clone());
        self.in_flight.insert(site_url);
        self.queue.push(QueuedFile {
            key: key.clone(),
            url: url.to_string(),
            size,
        });
    }
}

/// Reference [`FilePool`] keeping all state in memory.
pub struct MemoryFilePool {
    state: Mutex<PoolState>,
    /// Size assumed for files that carry no `filesize`.
    default_file_size: u64,
    revision_re: Regex,
}

impl MemoryFilePool {
    pub fn new(default_file_size: u64) -> Self {
        Self {
            state: Mutex::new(PoolState::default()),
            default_file_size,
            // Revision segment of pluginfile URLs: .../mod_page/content/12/index.html
            revision_re: Regex::new(r"/content/(\d+)/").expect("static regex"),
        }
    }

    /// Operations recorded so far, oldest first.
    pub fn operations(&self) -> Vec<PoolOperation> {
        self.state.lock().operations.clone()
    }

    /// Make `url` known to the pool without storing it.
    pub fn register_url(&self, site: &str, url: &str) {
        self.state
            .lock()
            .known
            .insert((site.to_string(), url.to_string()));
    }

    /// Flag a known URL as currently downloading.
    pub fn mark_in_flight(&self, site: &str, url: &str) {
        let mut state = self.state.lock();
        let site_url = (site.to_string(), url.to_string());
        state.known.insert(site_url.clone());
        state.in_flight.insert(site_url);
    }

    /// Complete every queued download: files become stored and leave the in-flight set.
    /// Returns how many files were completed.
    pub fn drain_queue(&self) -> usize {
        let mut state = self.state.lock();
        let queue = std::mem::take(&mut state.queue);
        let count = queue.len();
        for q in queue {
            state.in_flight.remove(&(q.key.site.clone(), q.url.clone()));
            state.store(&q.key, &q.url, q.size);
        }
        tracing::debug!(count, "memory pool drained queue");
        count
    }

    /// Whether any stored file of `(component, item_id)` is marked stale.
    pub fn is_stale(&self, site: &str, component: &str, item_id: ModuleId) -> bool {
        self.state
            .lock()
            .stored
            .get(&ItemKey::new(site, component, item_id))
            .map(|files| files.values().any(|f| f.stale))
            .unwrap_or(false)
    }

    /// Number of queued files.
    pub fn queued_len(&self) -> usize {
        self.state.lock().queue.len()
    }

    fn file_size(&self, file: &ModuleFile) -> u64 {
        file.filesize.unwrap_or(self.default_file_size)
    }

    fn revision_from_url(&self, url: &str) -> i64 {
        self.revision_re
            .captures(url)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    }
}

impl Default for MemoryFilePool {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Short stable id for a URL: leading hex chars of its SHA-256.
pub(crate) fn file_id(url: &str) -> String {
    let digest = hex::encode(Sha256::digest(url.as_bytes()));
    digest[..FILE_ID_LEN].to_string()
}

#[async_trait]
impl FilePool for MemoryFilePool {
    async fn enqueue_by_url(
        &self,
        site: &str,
        url: &str,
        component: &str,
        item_id: ModuleId,
        timemodified: i64,
    ) -> Result<(), PoolError> {
        let key = ItemKey::new(site, component, item_id);
        let size = self.default_file_size;
        let mut state = self.state.lock();
        state.enqueue(&key, url, size);
        state.operations.push(PoolOperation::EnqueueUrl {
            url: url.to_string(),
            component: component.to_string(),
            item_id,
            timemodified,
        });
        Ok(())
    }

    async fn download_by_url(
        &self,
        site: &str,
        url: &str,
        component: &str,
        item_id: ModuleId,
        timemodified: i64,
    ) -> Result<(), PoolError> {
        let key = ItemKey::new(site, component, item_id);
        let size = self.default_file_size;
        let mut state = self.state.lock();
        state.store(&key, url, size);
        state.operations.push(PoolOperation::DownloadUrl {
            url: url.to_string(),
            component: component.to_string(),
            item_id,
            timemodified,
        });
        Ok(())
    }

    async fn enqueue_package(
        &self,
        site: &str,
        files: &[ModuleFile],
        target: &PackageTarget,
    ) -> Result<(), PoolError> {
        let key = ItemKey::new(site, &target.component, target.item_id);
        let mut state = self.state.lock();
        for f in files {
            state.enqueue(&key, &f.fileurl, self.file_size(f));
        }
        state.operations.push(PoolOperation::EnqueuePackage {
            urls: files.iter().map(|f| f.fileurl.clone()).collect(),
            target: target.clone(),
        });
        Ok(())
    }

    async fn download_package(
        &self,
        site: &str,
        files: &[ModuleFile],
        target: &PackageTarget,
    ) -> Result<(), PoolError> {
        let key = ItemKey::new(site, &target.component, target.item_id);
        let mut state = self.state.lock();
        for f in files {
            state.store(&key, &f.fileurl, self.file_size(f));
        }
        state.operations.push(PoolOperation::DownloadPackage {
            urls: files.iter().map(|f| f.fileurl.clone()).collect(),
            target: target.clone(),
        });
        Ok(())
    }

    fn sum_file_sizes(&self, files: &[ModuleFile]) -> u64 {
        files.iter().map(|f| self.file_size(f)).sum()
    }

    async fn size_by_component(
        &self,
        site: &str,
        component: &str,
        item_id: ModuleId,
    ) -> Result<u64, PoolError> {
        let state = self.state.lock();
        Ok(state
            .stored
            .get(&ItemKey::new(site, component, item_id))
            .map(|files| files.values().map(|f| f.size).sum())
            .unwrap_or(0))
    }

    fn derive_timemodified(&self, files: &[ModuleFile]) -> i64 {
        files
            .iter()
            .filter_map(|f| f.timemodified)
            .max()
            .unwrap_or(0)
    }

    fn derive_revision(&self, files: &[ModuleFile]) -> i64 {
        files
            .iter()
            .map(|f| self.revision_from_url(&f.fileurl))
            .max()
            .unwrap_or(0)
    }

    async fn is_file_in_flight(&self, site: &str, url: &str) -> Result<bool, PoolError> {
        let state = self.state.lock();
        let site_url = (site.to_string(), url.to_string());
        if !state.known.contains(&site_url) {
            return Err(PoolError::UnknownFile {
                url: url.to_string(),
            });
        }
        Ok(state.in_flight.contains(&site_url))
    }

    async fn event_name_for_url(&self, site: &str, url: &str) -> Result<String, PoolError> {
        Ok(format!("file:{}:{}", site, file_id(url)))
    }

    async fn invalidate_by_component(
        &self,
        site: &str,
        component: &str,
        item_id: ModuleId,
    ) -> Result<(), PoolError> {
        let mut state = self.state.lock();
        if let Some(files) = state.stored.get_mut(&ItemKey::new(site, component, item_id)) {
            for f in files.values_mut() {
                f.stale = true;
            }
        }
        state.operations.push(PoolOperation::Invalidate {
            component: component.to_string(),
            item_id,
        });
        Ok(())
    }

    async fn remove_by_component(
        &self,
        site: &str,
        component: &str,
        item_id: ModuleId,
    ) -> Result<(), PoolError> {
        let key = ItemKey::new(site, component, item_id);
        let mut state = self.state.lock();
        let had_stored = state.stored.remove(&key).is_some();
        let had_queued = state.drop_queued(&key) > 0;
        if !had_stored && !had_queued {
            return Err(PoolError::NotCached {
                component: component.to_string(),
                item_id,
            });
        }
        state.operations.push(PoolOperation::Remove {
            component: component.to_string(),
            item_id,
        });
        Ok(())
    }
}
