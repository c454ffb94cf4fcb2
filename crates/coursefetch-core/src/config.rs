use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default marker identifying downloadable URLs in rich text.
pub const PLUGINFILE_MARKER: &str = "/pluginfile.php/";

/// Reference file pool settings (optional section in config.toml).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Bytes assumed for files that report no size.
    #[serde(default)]
    pub default_file_size: u64,
}

/// Global configuration loaded from `~/.config/coursefetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursefetchConfig {
    /// Identifier of the site whose files are cached.
    pub site_id: String,
    /// Base URL used to resolve relative references found in HTML.
    #[serde(default)]
    pub site_url: Option<String>,
    /// Whether the site allows downloading files at all.
    pub download_files: bool,
    /// Path fragments that mark a URL found in HTML as downloadable.
    pub downloadable_url_markers: Vec<String>,
    #[serde(default)]
    pub pool: Option<PoolConfig>,
}

impl Default for CoursefetchConfig {
    fn default() -> Self {
        Self {
            site_id: "local".to_string(),
            site_url: None,
            download_files: true,
            downloadable_url_markers: vec![PLUGINFILE_MARKER.to_string()],
            pool: None,
        }
    }
}

impl CoursefetchConfig {
    pub fn pool_config(&self) -> PoolConfig {
        self.pool.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("coursefetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CoursefetchConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<CoursefetchConfig> {
    if !path.exists() {
        let default_cfg = CoursefetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: CoursefetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CoursefetchConfig::default();
        assert_eq!(cfg.site_id, "local");
        assert!(cfg.download_files);
        assert_eq!(cfg.downloadable_url_markers, vec![PLUGINFILE_MARKER]);
        assert_eq!(cfg.pool_config().default_file_size, 0);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            site_id = "school"
            site_url = "https://school.example.com"
            download_files = false
            downloadable_url_markers = ["/pluginfile.php/", "/theme/image.php/"]

            [pool]
            default_file_size = 4096
        "#;
        let cfg: CoursefetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.site_id, "school");
        assert_eq!(cfg.site_url.as_deref(), Some("https://school.example.com"));
        assert!(!cfg.download_files);
        assert_eq!(cfg.downloadable_url_markers.len(), 2);
        assert_eq!(cfg.pool_config().default_file_size, 4096);
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.site_id, created.site_id);
        assert_eq!(loaded.download_files, created.download_files);
        assert!(loaded.site_url.is_none());
    }

    #[test]
    fn load_or_init_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "site_id = ").unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parse config"));
    }
}
