//! The `docs-server` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

use crate::common::{TABS_PAGE, TestSite};

fn docs_server(site: &TestSite) -> Command {
    let mut cmd = Command::cargo_bin("docs-server").unwrap();
    cmd.current_dir(site.path()).env_remove("DOCS_SERVER_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_render_prints_page() {
    let site = TestSite::standard().unwrap();

    docs_server(&site)
        .args(["render", "tabs"])
        .assert()
        .success()
        .stdout(format!("{TABS_PAGE}\n"));
}

#[test]
fn test_render_with_language() {
    let site = TestSite::standard().unwrap();

    docs_server(&site)
        .args(["render", "tabs.html", "--lang", "fr-CA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>chrome.tabs (fr)</h1>"));
}

#[test]
fn test_render_to_file() {
    let site = TestSite::standard().unwrap();
    let output = site.path().join("out/pages/tabs.html");

    docs_server(&site)
        .args(["render", "tabs", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output).unwrap(), TABS_PAGE);
}

#[test]
fn test_render_missing_template_fails() {
    let site = TestSite::standard().unwrap();

    docs_server(&site)
        .args(["render", "bookmarks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("templates/public/bookmarks.html"));
}

#[test]
fn test_render_logs_template_errors_but_succeeds() {
    let site = TestSite::standard().unwrap();

    docs_server(&site)
        .args(["render", "broken"])
        .assert()
        .success()
        .stdout("ABC\n")
        .stderr(predicate::str::contains("Template error(s) rendering broken"))
        .stderr(predicate::str::contains("Partial 'nope' not found"));
}

#[test]
fn test_quiet_clean_render_writes_nothing_to_stderr() {
    let site = TestSite::standard().unwrap();

    docs_server(&site)
        .args(["--quiet", "render", "tabs"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_render_all_writes_every_page() {
    let site = TestSite::standard().unwrap();
    let out = site.path().join("site-out");

    docs_server(&site)
        .args(["render-all", "--max-parallel", "2", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 page(s)"));

    assert_eq!(fs::read_to_string(out.join("tabs.html")).unwrap(), TABS_PAGE);
    assert_eq!(fs::read_to_string(out.join("broken.html")).unwrap(), "ABC");
    assert!(fs::read_to_string(out.join("windows.html")).unwrap().contains("<li>windows</li>"));
}

#[test]
fn test_render_all_fails_on_broken_data() {
    let site = TestSite::standard().unwrap();
    site.write("data/api_list.json", "[").unwrap();

    docs_server(&site)
        .args(["render-all", "--output-dir", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in data/api_list.json"));
}

#[test]
fn test_list_pages_and_partials() {
    let site = TestSite::standard().unwrap();

    docs_server(&site).arg("list").assert().success().stdout("broken\ntabs\nwindows\n");

    docs_server(&site)
        .args(["list", "--partials"])
        .assert()
        .success()
        .stdout("footer\nheader\nside_nav\n");
}

#[test]
fn test_explicit_config_from_another_directory() {
    let site = TestSite::standard().unwrap();
    let elsewhere = tempfile::TempDir::new().unwrap();

    Command::cargo_bin("docs-server")
        .unwrap()
        .current_dir(elsewhere.path())
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(site.config_path())
        .args(["render", "windows"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<li>tabs</li><li>windows</li>"));
}

#[test]
fn test_invalid_config_reports_toml_error() {
    let site = TestSite::standard().unwrap();
    site.write("docs-server.toml", "[templates\npublic = 1").unwrap();

    docs_server(&site)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
