//! Global constants used throughout the docs server.
//!
//! URL constants are injected into every render context; the context key
//! names are the contract between this crate and the templates it renders.

/// Base URL of the Chrome Apps samples repository (`apps_samples_url`).
pub const APPS_SAMPLES_URL: &str = "https://github.com/GoogleChrome/chrome-app-samples/tree/master";

/// Base URL of the extension samples tree (`extensions_samples_url`).
pub const EXTENSIONS_SAMPLES_URL: &str =
    "http://src.chromium.org/chrome/trunk/src/chrome/common/extensions/docs/examples";

/// Suffix appended to the configured base path to form the `static` entry.
pub const STATIC_SUFFIX: &str = "static";

/// Extension every template file carries.
pub const TEMPLATE_EXTENSION: &str = ".html";

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "docs-server.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "DOCS_SERVER_CONFIG";

/// Default upper bound for concurrent renders in `render-all`.
pub const DEFAULT_MAX_PARALLEL: usize = 8;

/// Names of the fixed render context entries.
pub mod context_keys {
    /// Request-independent list of APIs
    pub const API_LIST: &str = "api_list";
    /// Per-request API documentation
    pub const APIS: &str = "apis";
    /// Intro pages
    pub const INTROS: &str = "intros";
    /// Partial template lookup
    pub const PARTIALS: &str = "partials";
    /// Permission descriptions
    pub const PERMISSIONS: &str = "permissions";
    /// Per-request samples listing
    pub const SAMPLES: &str = "samples";
    /// [`APPS_SAMPLES_URL`](super::APPS_SAMPLES_URL)
    pub const APPS_SAMPLES_URL: &str = "apps_samples_url";
    /// [`EXTENSIONS_SAMPLES_URL`](super::EXTENSIONS_SAMPLES_URL)
    pub const EXTENSIONS_SAMPLES_URL: &str = "extensions_samples_url";
    /// Static asset base path
    pub const STATIC: &str = "static";
    /// Literal `true`
    pub const TRUE: &str = "true";
    /// Literal `false`
    pub const FALSE: &str = "false";

    /// Every fixed key, in context construction order.
    pub const ALL: [&str; 11] = [
        API_LIST,
        APIS,
        INTROS,
        PARTIALS,
        PERMISSIONS,
        SAMPLES,
        APPS_SAMPLES_URL,
        EXTENSIONS_SAMPLES_URL,
        STATIC,
        TRUE,
        FALSE,
    ];
}
