//! Utility functions for the templating system.

use crate::constants::TEMPLATE_EXTENSION;

/// Canonicalize a template name into a path-safe cache key.
///
/// - Leading `/` is dropped
/// - A trailing `.html` is stripped
/// - Every remaining `.` becomes `_`
/// - `.html` is appended
///
/// # Examples
///
/// ```
/// use docs_server::templating::format_key;
///
/// assert_eq!(format_key("tabs"), "tabs.html");
/// assert_eq!(format_key("tabs.html"), "tabs.html");
/// assert_eq!(format_key("experimental.devtools"), "experimental_devtools.html");
/// assert_eq!(format_key("/apps/about_apps"), "apps/about_apps.html");
/// ```
#[must_use]
pub fn format_key(name: &str) -> String {
    let name = name.trim_start_matches('/');
    let stem = name.strip_suffix(TEMPLATE_EXTENSION).unwrap_or(name);
    format!("{}{}", stem.replace('.', "_"), TEMPLATE_EXTENSION)
}

/// Build the cache/file path for `name` under `base_path`.
///
/// # Examples
///
/// ```
/// use docs_server::templating::template_path;
///
/// assert_eq!(template_path("templates/private", "intro_table"), "templates/private/intro_table.html");
/// assert_eq!(template_path("templates/public/", "/tabs.html"), "templates/public/tabs.html");
/// ```
#[must_use]
pub fn template_path(base_path: &str, name: &str) -> String {
    format!("{}/{}", base_path.trim_end_matches('/'), format_key(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_key_normalizes_dots() {
        assert_eq!(format_key("app.window"), "app_window.html");
        assert_eq!(format_key("app.window.html"), "app_window.html");
    }

    #[test]
    fn test_format_key_empty_name() {
        // An empty name still produces a key; it simply never matches a file.
        assert_eq!(format_key(""), ".html");
        assert_eq!(template_path("public", ""), "public/.html");
    }

    #[test]
    fn test_template_path_keeps_subdirectories() {
        assert_eq!(template_path("public", "extensions/tabs"), "public/extensions/tabs.html");
    }
}
