//! Downloadable file references embedded in rich text.
//!
//! Intro and description fields are HTML; images, media and attachments they
//! reference are cached along with the module. Only URLs carrying one of the
//! configured markers (e.g. `/pluginfile.php/`) count as downloadable.

use crate::config::{CoursefetchConfig, PLUGINFILE_MARKER};
use crate::model::IntroFile;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

fn re_url_attr() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        Regex::new(r#"(?is)\b(?:src|href|poster)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("static regex")
    })
}

fn re_css_url() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        Regex::new(r#"(?is)url\(\s*['"]?([^'")\s]+)['"]?\s*\)"#).expect("static regex")
    })
}

fn decode_attr_url(raw: &str) -> Cow<'_, str> {
    if raw.contains("&amp;") {
        return Cow::Owned(raw.replace("&amp;", "&"));
    }
    Cow::Borrowed(raw)
}

/// What counts as a downloadable reference and how relative ones resolve.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub markers: Vec<String>,
    pub base_url: Option<Url>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            markers: vec![PLUGINFILE_MARKER.to_string()],
            base_url: None,
        }
    }
}

impl ExtractOptions {
    pub fn from_config(cfg: &CoursefetchConfig) -> Self {
        let base_url = cfg.site_url.as_deref().and_then(|s| match Url::parse(s) {
            Ok(u) => Some(u),
            Err(e) => {
                tracing::warn!(site_url = s, "ignoring unparseable site_url: {}", e);
                None
            }
        });
        Self {
            markers: cfg.downloadable_url_markers.clone(),
            base_url,
        }
    }

    fn is_downloadable(&self, url: &str) -> bool {
        self.markers.iter().any(|m| url.contains(m.as_str()))
    }

    fn resolve(&self, raw: &str) -> Option<String> {
        match Url::parse(raw) {
            Ok(u) => Some(u.into()),
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base_url
                .as_ref()
                .and_then(|base| base.join(raw).ok())
                .map(Into::into),
            Err(_) => None,
        }
    }
}

/// Extract downloadable file references from `html` as synthetic file entries.
///
/// Results follow document order and each URL appears once.
pub fn extract_downloadable_files(html: &str, options: &ExtractOptions) -> Vec<IntroFile> {
    let mut found: Vec<(usize, &str)> = Vec::new();
    for caps in re_url_attr().captures_iter(html) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            found.push((m.start(), m.as_str()));
        }
    }
    for caps in re_css_url().captures_iter(html) {
        if let Some(m) = caps.get(1) {
            found.push((m.start(), m.as_str()));
        }
    }
    found.sort_by_key(|(pos, _)| *pos);

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for (_, raw) in found {
        let raw = decode_attr_url(raw.trim());
        if raw.is_empty() {
            continue;
        }
        let Some(url) = options.resolve(&raw) else {
            continue;
        };
        if !options.is_downloadable(&url) {
            continue;
        }
        if seen.insert(url.clone()) {
            files.push(IntroFile::from_url(url));
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ExtractOptions {
        ExtractOptions::default()
    }

    fn urls(files: &[IntroFile]) -> Vec<&str> {
        files.iter().map(|f| f.fileurl.as_str()).collect()
    }

    #[test]
    fn extracts_img_link_and_media_in_document_order() {
        let html = r#"
            <p><img src="https://s.test/pluginfile.php/1/mod_page/intro/a.png"></p>
            <a href='https://s.test/pluginfile.php/1/mod_page/intro/b.pdf'>b</a>
            <video poster="https://s.test/pluginfile.php/1/mod_page/intro/poster.jpg">
              <source src="https://s.test/pluginfile.php/1/mod_page/intro/c.mp4">
            </video>
        "#;
        let files = extract_downloadable_files(html, &opts());
        assert_eq!(
            urls(&files),
            vec![
                "https://s.test/pluginfile.php/1/mod_page/intro/a.png",
                "https://s.test/pluginfile.php/1/mod_page/intro/b.pdf",
                "https://s.test/pluginfile.php/1/mod_page/intro/poster.jpg",
                "https://s.test/pluginfile.php/1/mod_page/intro/c.mp4",
            ]
        );
        assert!(files.iter().all(|f| f.kind.is_none() && f.timemodified.is_none()));
    }

    #[test]
    fn skips_non_downloadable_and_duplicate_urls() {
        let html = r#"
            <a href="https://example.com/page">external</a>
            <img src="https://s.test/pluginfile.php/2/x.png">
            <img src="https://s.test/pluginfile.php/2/x.png">
            <a href="mailto:someone@example.com">mail</a>
        "#;
        let files = extract_downloadable_files(html, &opts());
        assert_eq!(urls(&files), vec!["https://s.test/pluginfile.php/2/x.png"]);
    }

    #[test]
    fn decodes_entities_and_css_backgrounds() {
        let html = r#"<div style="background: url('https://s.test/pluginfile.php/3/bg.jpg')"></div>
            <img src="https://s.test/pluginfile.php/3/i.png?forcedownload=1&amp;v=2">"#;
        let files = extract_downloadable_files(html, &opts());
        assert_eq!(
            urls(&files),
            vec![
                "https://s.test/pluginfile.php/3/bg.jpg",
                "https://s.test/pluginfile.php/3/i.png?forcedownload=1&v=2",
            ]
        );
    }

    #[test]
    fn relative_urls_need_a_base() {
        let html = r#"<img src="/pluginfile.php/4/rel.png">"#;
        assert!(extract_downloadable_files(html, &opts()).is_empty());

        let with_base = ExtractOptions {
            base_url: Some(Url::parse("https://s.test/").unwrap()),
            ..opts()
        };
        let files = extract_downloadable_files(html, &with_base);
        assert_eq!(urls(&files), vec!["https://s.test/pluginfile.php/4/rel.png"]);
    }

    #[test]
    fn from_config_ignores_bad_site_url() {
        let cfg = CoursefetchConfig {
            site_url: Some("not a url".to_string()),
            ..CoursefetchConfig::default()
        };
        let o = ExtractOptions::from_config(&cfg);
        assert!(o.base_url.is_none());
        assert_eq!(o.markers, vec![PLUGINFILE_MARKER]);
    }
}
