//! MIME mapping table for static responses.
//!
//! Maps file extensions to content-type strings. The table is built at
//! startup (defaults plus any overrides) and consulted by the
//! static-resource filter on every response it serves.

use std::collections::BTreeMap;

const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("eot", "application/vnd.ms-fontobject"),
    ("gif", "image/gif"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ico", "image/x-icon"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("mjs", "text/javascript"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("ttf", "font/ttf"),
    ("txt", "text/plain"),
    ("wasm", "application/wasm"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("xml", "application/xml"),
];

/// Extension → content-type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeMappings {
    map: BTreeMap<String, String>,
}

impl Default for MimeMappings {
    fn default() -> Self {
        Self {
            map: DEFAULT_MAPPINGS
                .iter()
                .map(|(ext, ty)| (ext.to_string(), ty.to_string()))
                .collect(),
        }
    }
}

impl MimeMappings {
    /// Add or override a mapping. Extensions are normalized to lowercase
    /// without a leading dot.
    pub fn add(&mut self, extension: &str, content_type: &str) {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        self.map.insert(ext, content_type.to_string());
    }

    /// Look up the content type for an extension.
    pub fn get(&self, extension: &str) -> Option<&str> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        self.map.get(&ext).map(String::as_str)
    }

    /// Look up the content type for a file path by its extension.
    pub fn for_path(&self, path: &str) -> Option<&str> {
        let (_, ext) = path.rsplit_once('.')?;
        if ext.contains('/') {
            return None;
        }
        self.get(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_common_web_types() {
        let mappings = MimeMappings::default();
        assert_eq!(mappings.get("html"), Some("text/html"));
        assert_eq!(mappings.get("css"), Some("text/css"));
        assert_eq!(mappings.get("woff2"), Some("font/woff2"));
        assert_eq!(mappings.get("exe"), None);
    }

    #[test]
    fn test_add_overrides_and_normalizes() {
        let mut mappings = MimeMappings::default();
        mappings.add(".HTML", "text/html;charset=utf-8");
        assert_eq!(mappings.get("html"), Some("text/html;charset=utf-8"));
    }

    #[test]
    fn test_for_path_uses_last_extension() {
        let mappings = MimeMappings::default();
        assert_eq!(mappings.for_path("/assets/app.min.js"), Some("text/javascript"));
        assert_eq!(mappings.for_path("/assets/archive.tar.unknown"), None);
        assert_eq!(mappings.for_path("/noextension"), None);
        assert_eq!(mappings.for_path("/dotted.dir/file"), None);
    }
}
