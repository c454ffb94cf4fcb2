//! `coursefetch fingerprint <module.json>` – revision and timemodified.

use anyhow::Result;
use coursefetch_core::descriptor::DownloadDescriptor;
use coursefetch_core::model::{CourseId, Module};

pub async fn run_fingerprint(
    d: &DownloadDescriptor,
    module: &Module,
    course: CourseId,
) -> Result<()> {
    let fp = d.compute_fingerprint(module, course, None).await?;
    println!("revision:     {}", fp.revision);
    println!("timemodified: {}", fp.timemodified);
    Ok(())
}
