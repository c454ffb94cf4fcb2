//! CLI for coursefetch download descriptors.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coursefetch_core::config::{self, CoursefetchConfig};
use coursefetch_core::descriptor::{DescriptorTemplate, DownloadDescriptor};
use coursefetch_core::html::ExtractOptions;
use coursefetch_core::model::{CourseId, Module};
use coursefetch_core::pool::MemoryFilePool;
use coursefetch_core::registry::DescriptorRegistry;
use coursefetch_core::session::ConfiguredSession;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use commands::{
    run_components, run_download, run_events, run_files, run_fingerprint, run_prefetch, run_size,
};

/// Top-level CLI for coursefetch.
#[derive(Debug, Parser)]
#[command(name = "coursefetch")]
#[command(about = "Plan and inspect offline caching of course modules", long_about = None)]
pub struct Cli {
    /// Component to use instead of the one derived from the module's modname.
    #[arg(long, global = true, value_name = "COMPONENT")]
    pub component: Option<String>,

    /// Course the module belongs to.
    #[arg(long, global = true, default_value = "0", value_name = "ID")]
    pub course: CourseId,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List intro files then downloadable content files.
    Files {
        /// Path to the module JSON.
        module: PathBuf,
    },

    /// Show download size and currently cached size.
    Size {
        /// Path to the module JSON.
        module: PathBuf,
    },

    /// Show revision and timemodified.
    Fingerprint {
        /// Path to the module JSON.
        module: PathBuf,
    },

    /// Queue the module's files and show what was queued.
    Prefetch {
        /// Path to the module JSON.
        module: PathBuf,
        /// Only this module is being prefetched.
        #[arg(long)]
        single: bool,
    },

    /// Download the module's files now and show what was fetched.
    Download {
        /// Path to the module JSON.
        module: PathBuf,
        /// Keep content files under this directory.
        #[arg(long, value_name = "DIR")]
        dir_path: Option<String>,
    },

    /// Show change-notification names of the downloadable files.
    Events {
        /// Path to the module JSON.
        module: PathBuf,
    },

    /// List components with a registered descriptor.
    Components,
}

/// Collaborators shared by every command of one invocation.
pub struct AppContext {
    pub pool: Arc<MemoryFilePool>,
    pub template: DescriptorTemplate,
    pub registry: DescriptorRegistry,
}

impl AppContext {
    pub fn from_config(cfg: &CoursefetchConfig) -> Self {
        let pool = Arc::new(MemoryFilePool::new(cfg.pool_config().default_file_size));
        let session = Arc::new(ConfiguredSession::from_config(cfg));
        let template = DescriptorTemplate::new(pool.clone(), session)
            .with_extract_options(ExtractOptions::from_config(cfg));
        let registry = DescriptorRegistry::with_builtin(&template);
        Self {
            pool,
            template,
            registry,
        }
    }

    /// Descriptor for `module`: explicit component if given, else by modname.
    /// Unregistered explicit components get a default descriptor.
    pub fn descriptor_for(
        &self,
        module: &Module,
        component: Option<&str>,
    ) -> Result<DownloadDescriptor> {
        match component {
            Some(c) => Ok(self
                .registry
                .get(c)
                .cloned()
                .unwrap_or_else(|| self.template.create_descriptor(c))),
            None => self.registry.for_module(module).cloned(),
        }
    }
}

async fn load_module(path: &Path) -> Result<Module> {
    Module::from_json_file(path)
        .await
        .with_context(|| format!("load module {}", path.display()))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let ctx = AppContext::from_config(&cfg);
        let component = cli.component.as_deref();
        let course = cli.course;

        match cli.command {
            CliCommand::Files { module } => {
                let module = load_module(&module).await?;
                let d = ctx.descriptor_for(&module, component)?;
                run_files(&d, &module, course).await?;
            }
            CliCommand::Size { module } => {
                let module = load_module(&module).await?;
                let d = ctx.descriptor_for(&module, component)?;
                run_size(&d, &module, course).await?;
            }
            CliCommand::Fingerprint { module } => {
                let module = load_module(&module).await?;
                let d = ctx.descriptor_for(&module, component)?;
                run_fingerprint(&d, &module, course).await?;
            }
            CliCommand::Prefetch { module, single } => {
                let module = load_module(&module).await?;
                let d = ctx.descriptor_for(&module, component)?;
                run_prefetch(&ctx.pool, &d, &module, course, single).await?;
            }
            CliCommand::Download { module, dir_path } => {
                let module = load_module(&module).await?;
                let d = ctx.descriptor_for(&module, component)?;
                run_download(&ctx.pool, &d, &module, course, dir_path.as_deref()).await?;
            }
            CliCommand::Events { module } => {
                let module = load_module(&module).await?;
                let d = ctx.descriptor_for(&module, component)?;
                run_events(&d, &module).await?;
            }
            CliCommand::Components => run_components(&ctx.registry),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
