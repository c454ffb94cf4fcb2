//! `coursefetch prefetch|download <module.json>` – run the transfer pipeline
//! against the in-memory pool and print the resulting pool calls.

use anyhow::{bail, Result};
use coursefetch_core::descriptor::DownloadDescriptor;
use coursefetch_core::model::{CourseId, Module};
use coursefetch_core::pool::{MemoryFilePool, PoolOperation};

fn describe(op: &PoolOperation) -> String {
    match op {
        PoolOperation::EnqueueUrl {
            url, timemodified, ..
        } => format!("enqueue  {url} (timemodified {timemodified})"),
        PoolOperation::DownloadUrl {
            url, timemodified, ..
        } => format!("download {url} (timemodified {timemodified})"),
        PoolOperation::EnqueuePackage { urls, target }
        | PoolOperation::DownloadPackage { urls, target } => {
            let verb = if matches!(op, PoolOperation::EnqueuePackage { .. }) {
                "enqueue"
            } else {
                "download"
            };
            let dir = target.dir_path.as_deref().unwrap_or("-");
            format!(
                "{verb} package {} item {} ({} files, revision {}, timemodified {}, dir {dir})",
                target.component,
                target.item_id,
                urls.len(),
                target.revision,
                target.timemodified
            )
        }
        PoolOperation::Invalidate { component, item_id } => {
            format!("invalidate {component} item {item_id}")
        }
        PoolOperation::Remove { component, item_id } => {
            format!("remove {component} item {item_id}")
        }
    }
}

fn ensure_enabled(d: &DownloadDescriptor) -> Result<()> {
    if !d.is_enabled() {
        bail!("file downloads are disabled for this site (download_files = false)");
    }
    Ok(())
}

fn print_operations(pool: &MemoryFilePool) {
    for op in pool.operations() {
        println!("{}", describe(&op));
    }
}

pub async fn run_prefetch(
    pool: &MemoryFilePool,
    d: &DownloadDescriptor,
    module: &Module,
    course: CourseId,
    single: bool,
) -> Result<()> {
    ensure_enabled(d)?;
    d.prefetch_content(module, course, single).await?;
    print_operations(pool);
    let downloading = d.downloading_file_event_names(module).await?;
    if !downloading.is_empty() {
        println!("in flight:");
        for name in downloading {
            println!("  {name}");
        }
    }
    Ok(())
}

pub async fn run_download(
    pool: &MemoryFilePool,
    d: &DownloadDescriptor,
    module: &Module,
    course: CourseId,
    dir_path: Option<&str>,
) -> Result<()> {
    ensure_enabled(d)?;
    d.download(module, course, dir_path).await?;
    print_operations(pool);
    println!("downloaded: {} bytes", d.downloaded_size(module, course).await?);
    Ok(())
}
