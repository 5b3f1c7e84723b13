//! Helpers shared by the CLI commands

use crate::constants::TEMPLATE_EXTENSION;
use crate::core::Result;
use crate::fs::FileSystem;
use crate::sources::Request;
use crate::templating::format_key;

/// Build the request a page render is specialized on.
///
/// The path mirrors what a browser would ask for (`/tabs.html`); `lang`
/// becomes the `Accept-Language` header.
pub fn request_for(template: &str, lang: Option<&str>) -> Request {
    let request = Request::new(format!("/{}", format_key(template)));
    match lang {
        Some(lang) => request.with_header("Accept-Language", lang),
        None => request,
    }
}

/// Names of the templates stored below `dir`, without the `.html` extension.
///
/// Files with other extensions are skipped.
pub fn template_names(fs: &dyn FileSystem, dir: &str) -> Result<Vec<String>> {
    let names = fs
        .list(dir)?
        .into_iter()
        .filter_map(|path| path.strip_suffix(TEMPLATE_EXTENSION).map(str::to_string))
        .collect();
    Ok(names)
}
