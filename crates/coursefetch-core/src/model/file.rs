//! File entries attached to a module.

use serde::{Deserialize, Serialize};

/// `type` tag of entries that are real files.
pub const DOWNLOADABLE_FILE_TYPE: &str = "file";

/// A file reference, either from a module's content list or from its intro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFile {
    /// Entry kind: "file", "url", "content", ... Unset for synthetic entries.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub fileurl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timemodified: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

/// Entry of `Module::contents`.
pub type ContentFile = ModuleFile;

/// File referenced from intro/description rich text.
pub type IntroFile = ModuleFile;

impl ModuleFile {
    /// Synthetic entry carrying only a URL (what HTML extraction produces).
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            fileurl: url.into(),
            ..Self::default()
        }
    }

    /// Plain downloadable file entry.
    pub fn file(url: impl Into<String>, timemodified: i64) -> Self {
        Self {
            kind: Some(DOWNLOADABLE_FILE_TYPE.to_string()),
            fileurl: url.into(),
            timemodified: Some(timemodified),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.filesize = Some(size);
        self
    }

    pub fn is_file(&self) -> bool {
        self.kind.as_deref() == Some(DOWNLOADABLE_FILE_TYPE)
    }
}
