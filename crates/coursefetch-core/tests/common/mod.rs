//! Shared fixtures: module JSON and config files on disk.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Page module with a relative image in its description, an HTML index,
/// a stylesheet and a link entry.
pub const PAGE_MODULE_JSON: &str = r#"{
    "id": 42,
    "name": "Welcome page",
    "modname": "page",
    "description": "<p><img src=\"/pluginfile.php/12/mod_page/intro/banner.png\"></p><a href=\"https://example.com/docs\">docs</a>",
    "contents": [
        {"type": "file", "filename": "index.html", "filepath": "/",
         "fileurl": "https://school.test/pluginfile.php/12/mod_page/content/4/index.html",
         "filesize": 2048, "timemodified": 1700000000, "mimetype": "text/html"},
        {"type": "file", "filename": "style.css", "filepath": "/",
         "fileurl": "https://school.test/pluginfile.php/12/mod_page/content/4/style.css",
         "filesize": 512, "timemodified": 1690000000},
        {"type": "url", "fileurl": "https://example.com/docs", "timemodified": 1710000000}
    ]
}"#;

pub const CONFIG_TOML: &str = r#"
site_id = "school"
site_url = "https://school.test/"
download_files = true
downloadable_url_markers = ["/pluginfile.php/"]

[pool]
default_file_size = 100
"#;

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

pub fn write_at(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}
