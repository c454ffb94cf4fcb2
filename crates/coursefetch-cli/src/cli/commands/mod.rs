//! CLI command handlers. Each command is in its own file.

mod components;
mod events;
mod files;
mod fingerprint;
mod size;
mod transfer;

pub use components::run_components;
pub use events::run_events;
pub use files::run_files;
pub use fingerprint::run_fingerprint;
pub use size::run_size;
pub use transfer::{run_download, run_prefetch};
