//! `coursefetch files <module.json>` – list intro and content files.

use anyhow::Result;
use coursefetch_core::descriptor::DownloadDescriptor;
use coursefetch_core::model::{CourseId, Module, ModuleFile};

fn print_file(section: &str, f: &ModuleFile) {
    let size = f
        .filesize
        .map(|s| format!("{s}"))
        .unwrap_or_else(|| "-".to_string());
    let modified = f
        .timemodified
        .map(|t| format!("{t}"))
        .unwrap_or_else(|| "-".to_string());
    println!("{:<8} {:<10} {:<12} {}", section, size, modified, f.fileurl);
}

pub async fn run_files(d: &DownloadDescriptor, module: &Module, course: CourseId) -> Result<()> {
    let intro = d.intro_files(module, course, None).await?;
    let content = d.content_files(module);
    if intro.is_empty() && content.is_empty() {
        println!("No downloadable files in module {}.", module.id);
        return Ok(());
    }
    println!("{:<8} {:<10} {:<12} {}", "SOURCE", "SIZE", "MODIFIED", "URL");
    for f in &intro {
        print_file("intro", f);
    }
    for f in &content {
        print_file("content", f);
    }
    Ok(())
}
