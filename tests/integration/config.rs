//! Configuration discovery.

use docs_server::config::ServerConfig;
use serial_test::serial;
use std::path::PathBuf;

use crate::common::TestSite;

/// Sets an environment variable for the lifetime of the guard.
struct EnvGuard {
    key: &'static str,
    previous: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let previous = std::env::var_os(key);
        // SAFETY: tests touching the environment are #[serial]
        unsafe { std::env::set_var(key, value) };
        Self {
            key,
            previous,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests touching the environment are #[serial]
        unsafe {
            match &self.previous {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

#[tokio::test]
#[serial]
async fn test_env_var_selects_config_file() {
    let site = TestSite::standard().unwrap();
    let _guard = EnvGuard::set("DOCS_SERVER_CONFIG", site.config_path());

    assert_eq!(ServerConfig::default_path(), site.config_path());
    let config = ServerConfig::load_with_optional(None).await.unwrap();
    assert_eq!(config.root, site.path().join("."));
    assert_eq!(config.data.references.as_deref(), Some("data/references.json"));
}

#[tokio::test]
#[serial]
async fn test_env_var_pointing_nowhere_is_an_error() {
    let site = TestSite::standard().unwrap();
    let _guard = EnvGuard::set("DOCS_SERVER_CONFIG", site.path().join("missing.toml"));

    let err = ServerConfig::load_with_optional(None).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read configuration"), "got {err:#}");
}

#[tokio::test]
#[serial]
async fn test_explicit_path_wins_over_env_var() {
    let site = TestSite::standard().unwrap();
    let other = TestSite::standard().unwrap();
    let _guard = EnvGuard::set("DOCS_SERVER_CONFIG", other.config_path());

    let config = ServerConfig::load_with_optional(Some(site.config_path())).await.unwrap();
    assert_eq!(config.root, site.path().join("."));
}

#[tokio::test]
async fn test_loaded_config_builds_a_working_factory() {
    let site = TestSite::standard().unwrap();
    let config = ServerConfig::load_from(&site.config_path()).await.unwrap();

    assert_eq!(config.templates.base_path, "/chrome/extensions/");
    let factory = config.build_factory().unwrap();
    assert_eq!(factory.paths().public, "templates/public");
    assert!(factory.cache().is_empty());
}

#[tokio::test]
async fn test_invalid_link_table_fails_factory_construction() {
    let site = TestSite::standard().unwrap();
    site.write("data/references.json", "[1, 2, 3]").unwrap();
    let config = ServerConfig::load_from(&site.config_path()).await.unwrap();

    let err = config.build_factory().err().unwrap();
    let root = err.root_cause().to_string();
    assert!(root.contains("data/references.json"), "got {root}");
}

#[test]
fn test_default_root_is_current_directory() {
    assert_eq!(ServerConfig::default().root, PathBuf::from("."));
}
