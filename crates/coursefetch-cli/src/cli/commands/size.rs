//! `coursefetch size <module.json>` – download size vs cached size.

use anyhow::Result;
use coursefetch_core::descriptor::DownloadDescriptor;
use coursefetch_core::model::{CourseId, Module};

pub async fn run_size(d: &DownloadDescriptor, module: &Module, course: CourseId) -> Result<()> {
    let total = d.download_size(module, course).await?;
    let cached = d.downloaded_size(module, course).await?;
    println!("component:  {}", d.component());
    println!("downloadable: {}", d.is_downloadable(module, course));
    println!("download:   {total} bytes");
    println!("downloaded: {cached} bytes");
    Ok(())
}
