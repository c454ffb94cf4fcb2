//! `coursefetch components` – registered descriptors.

use coursefetch_core::registry::DescriptorRegistry;

pub fn run_components(registry: &DescriptorRegistry) {
    for component in registry.components() {
        let enabled = registry.enabled(component).is_some();
        println!("{:<16} {}", component, if enabled { "enabled" } else { "disabled" });
    }
}
