//! Descriptor registry.
//!
//! Maps component names (`mod_page`, `mod_resource`, ...) to the descriptor
//! handling them, so callers holding a module only need its `modname`.

use crate::descriptor::{
    AnyFileStrategy, DescriptorTemplate, DownloadDescriptor, PackageDirStrategy,
};
use crate::model::Module;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Directory (inside the pool) holding packaged HTML content.
pub const PACKAGES_DIR: &str = "packages";

/// Component name for a module type, e.g. `"page"` -> `"mod_page"`.
pub fn component_for_modname(modname: &str) -> String {
    format!("mod_{modname}")
}

#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    descriptors: HashMap<String, DownloadDescriptor>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in content types.
    pub fn with_builtin(template: &DescriptorTemplate) -> Self {
        let mut registry = Self::new();
        for component in ["mod_resource", "mod_book", "mod_label"] {
            registry.register(template.create_descriptor(component));
        }
        let packaged = template.with_strategy(PackageDirStrategy::new(PACKAGES_DIR));
        for component in ["mod_page", "mod_imscp"] {
            registry.register(packaged.create_descriptor(component));
        }
        registry.register(
            template
                .with_strategy(AnyFileStrategy)
                .create_descriptor("mod_folder"),
        );
        registry
    }

    /// Add or replace the descriptor for its component.
    pub fn register(&mut self, descriptor: DownloadDescriptor) -> Option<DownloadDescriptor> {
        let component = descriptor.component().to_string();
        tracing::debug!(component = %component, "registering download descriptor");
        self.descriptors.insert(component, descriptor)
    }

    pub fn get(&self, component: &str) -> Option<&DownloadDescriptor> {
        self.descriptors.get(component)
    }

    /// Descriptor for `component`, only when the session allows downloads.
    pub fn enabled(&self, component: &str) -> Option<&DownloadDescriptor> {
        self.get(component).filter(|d| d.is_enabled())
    }

    /// Descriptor for a module, looked up by its `modname`.
    pub fn for_module(&self, module: &Module) -> Result<&DownloadDescriptor> {
        let modname = module
            .modname
            .as_deref()
            .with_context(|| format!("module {} has no modname", module.id))?;
        let component = component_for_modname(modname);
        self.get(&component)
            .with_context(|| format!("no download descriptor for {component}"))
    }

    /// Registered components, sorted.
    pub fn components(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.descriptors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
