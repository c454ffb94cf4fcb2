//! Course module data model.
//!
//! Mirrors the shape returned by the site's course-contents web service so a
//! module can be loaded straight from JSON.

mod file;

pub use file::{ContentFile, IntroFile, ModuleFile, DOWNLOADABLE_FILE_TYPE};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Module identifier, unique within a course.
pub type ModuleId = i64;

/// Course identifier.
pub type CourseId = i64;

/// One piece of course content (a document, page, or activity).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Module type name, e.g. "resource" or "page".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Rich-text description (HTML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub contents: Vec<ContentFile>,
}

impl Module {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Load a module from a JSON file.
    pub async fn from_json_file(path: &Path) -> Result<Self> {
        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read module file {}", path.display()))?;
        let module: Module = serde_json::from_str(&data)
            .with_context(|| format!("parse module JSON {}", path.display()))?;
        Ok(module)
    }
}

/// Activity instance backing a module, when the caller already fetched it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleInstance {
    /// Rich-text intro (HTML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Explicit intro file list; takes precedence over `intro`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introfiles: Option<Vec<IntroFile>>,
}

/// Change fingerprint used to detect stale cached content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub revision: i64,
    pub timemodified: i64,
}
