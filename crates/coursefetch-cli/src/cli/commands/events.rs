//! `coursefetch events <module.json>` – per-file change-notification names.

use anyhow::Result;
use coursefetch_core::descriptor::DownloadDescriptor;
use coursefetch_core::model::Module;

pub async fn run_events(d: &DownloadDescriptor, module: &Module) -> Result<()> {
    let files = d.content_files(module);
    let names = d.file_event_names(module).await?;
    for (f, name) in files.iter().zip(&names) {
        println!("{name}  {}", f.fileurl);
    }
    Ok(())
}
