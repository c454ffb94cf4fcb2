//! Integration test: config and module loaded from disk, descriptors from the
//! built-in registry, prefetch/download driven against the in-memory pool.

mod common;

use coursefetch_core::config;
use coursefetch_core::descriptor::DescriptorTemplate;
use coursefetch_core::html::ExtractOptions;
use coursefetch_core::model::Module;
use coursefetch_core::pool::{MemoryFilePool, PoolError, PoolOperation};
use coursefetch_core::registry::DescriptorRegistry;
use coursefetch_core::session::ConfiguredSession;
use std::sync::Arc;
use tempfile::tempdir;

const COURSE: i64 = 3;

struct Fixture {
    pool: Arc<MemoryFilePool>,
    registry: DescriptorRegistry,
    module: Module,
}

async fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    common::write_at(&cfg_path, common::CONFIG_TOML);
    let cfg = config::load_or_init_at(&cfg_path).unwrap();

    let pool = Arc::new(MemoryFilePool::new(cfg.pool_config().default_file_size));
    let session = Arc::new(ConfiguredSession::from_config(&cfg));
    let template = DescriptorTemplate::new(pool.clone(), session)
        .with_extract_options(ExtractOptions::from_config(&cfg));
    let registry = DescriptorRegistry::with_builtin(&template);

    let module_file = common::write_temp(common::PAGE_MODULE_JSON);
    let module = Module::from_json_file(module_file.path()).await.unwrap();

    Fixture {
        pool,
        registry,
        module,
    }
}

#[tokio::test]
async fn page_module_files_size_and_fingerprint() {
    let fx = fixture().await;
    let d = fx.registry.for_module(&fx.module).unwrap();
    assert_eq!(d.component(), "mod_page");
    assert!(d.is_enabled());
    assert!(d.is_downloadable(&fx.module, COURSE));

    let all = d.all_files(&fx.module, COURSE).await.unwrap();
    let urls: Vec<&str> = all.iter().map(|f| f.fileurl.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://school.test/pluginfile.php/12/mod_page/intro/banner.png",
            "https://school.test/pluginfile.php/12/mod_page/content/4/index.html",
            "https://school.test/pluginfile.php/12/mod_page/content/4/style.css",
        ]
    );

    // banner has no size: pool default of 100 applies
    assert_eq!(d.download_size(&fx.module, COURSE).await.unwrap(), 100 + 2048 + 512);

    let fp = d.compute_fingerprint(&fx.module, COURSE, None).await.unwrap();
    assert_eq!(fp.revision, 4);
    // the link entry is the newest and still counts
    assert_eq!(fp.timemodified, 1710000000);
}

#[tokio::test]
async fn prefetch_then_drain_fills_cache_under_package_dir() {
    let fx = fixture().await;
    let d = fx.registry.for_module(&fx.module).unwrap();

    d.prefetch_content(&fx.module, COURSE, true).await.unwrap();
    let downloading = d.downloading_file_event_names(&fx.module).await.unwrap();
    assert_eq!(downloading.len(), 2);
    assert_eq!(downloading, d.file_event_names(&fx.module).await.unwrap());
    assert!(downloading.iter().all(|n| n.starts_with("file:school:")));

    let package = fx
        .pool
        .operations()
        .into_iter()
        .find_map(|op| match op {
            PoolOperation::EnqueuePackage { target, .. } => Some(target),
            _ => None,
        })
        .expect("package enqueued");
    assert_eq!(package.dir_path.as_deref(), Some("packages/42"));
    assert_eq!(package.item_id, 42);

    assert_eq!(fx.pool.drain_queue(), 3);
    assert!(d
        .downloading_file_event_names(&fx.module)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        d.downloaded_size(&fx.module, COURSE).await.unwrap(),
        d.download_size(&fx.module, COURSE).await.unwrap()
    );
}

#[tokio::test]
async fn invalidate_then_remove_cached_module() {
    let fx = fixture().await;
    let d = fx.registry.for_module(&fx.module).unwrap();

    d.download(&fx.module, COURSE, None).await.unwrap();
    assert!(d.downloaded_size(&fx.module, COURSE).await.unwrap() > 0);

    d.invalidate_content(fx.module.id).await.unwrap();
    assert!(fx.pool.is_stale("school", "mod_page", 42));

    d.remove_files(&fx.module, COURSE).await.unwrap();
    assert_eq!(d.downloaded_size(&fx.module, COURSE).await.unwrap(), 0);
    let err = d.remove_files(&fx.module, COURSE).await.unwrap_err();
    assert!(matches!(err, PoolError::NotCached { .. }));
}
