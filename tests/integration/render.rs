//! Rendering pages from a site on disk.

use docs_server::config::ServerConfig;
use docs_server::sources::{DataSourceRegistry, Request, StaticDataSource};
use docs_server::templating::{PartialResolver, TemplateDataSourceFactory};
use docs_server::test_utils::TemplateTreeFixture;
use serde_json::json;
use std::sync::Arc;

use crate::common::{TABS_PAGE, TestSite};

async fn factory(site: &TestSite) -> TemplateDataSourceFactory {
    docs_server::test_utils::init_test_logging(None);
    let config = ServerConfig::load_from(&site.config_path()).await.unwrap();
    config.build_factory().unwrap()
}

#[tokio::test]
async fn test_render_page_with_partials_links_and_data() {
    let site = TestSite::standard().unwrap();
    let factory = factory(&site).await;
    let page = factory.create(&Request::new("/tabs.html"), DataSourceRegistry::new());

    let html = page.render("tabs").unwrap().unwrap();
    assert_eq!(html, TABS_PAGE);
    assert!(!html.contains("{%"), "unresolved include in {html}");
    assert!(!html.contains("$ref:"), "unresolved link in {html}");
}

#[tokio::test]
async fn test_render_uses_request_language() {
    let site = TestSite::standard().unwrap();
    let factory = factory(&site).await;

    let french = factory.create(
        &Request::new("/tabs.html").with_header("Accept-Language", "fr"),
        DataSourceRegistry::new(),
    );
    let german = factory.create(
        &Request::new("/tabs.html").with_header("Accept-Language", "de"),
        DataSourceRegistry::new(),
    );

    assert!(french.render("tabs").unwrap().unwrap().contains("<h1>chrome.tabs (fr)</h1>"));
    assert!(german.render("tabs").unwrap().unwrap().contains("<h1>chrome.tabs</h1>"));
}

#[tokio::test]
async fn test_missing_pages_are_absent() {
    let site = TestSite::standard().unwrap();
    let factory = factory(&site).await;
    let page = factory.create(&Request::new("/"), DataSourceRegistry::new());

    for name in ["", "bookmarks", "header", "side.nav", "templates/public/tabs"] {
        assert_eq!(page.render(name).unwrap(), None, "{name} should be absent");
    }
}

#[tokio::test]
async fn test_public_pages_are_not_partials() {
    let site = TestSite::standard().unwrap();
    let factory = factory(&site).await;
    let page = factory.create(&Request::new("/"), DataSourceRegistry::new());

    assert!(page.get("tabs").unwrap().is_none());
    assert!(page.get("header").unwrap().is_some());
    assert!(page.get("side.nav").unwrap().is_some());
}

#[tokio::test]
async fn test_partial_errors_keep_best_effort_text() {
    let site = TestSite::standard().unwrap();
    let factory = factory(&site).await;
    let page = factory.create(&Request::new("/broken.html"), DataSourceRegistry::new());

    assert_eq!(page.render("broken").unwrap().as_deref(), Some("ABC"));
}

#[tokio::test]
async fn test_extras_are_merged_and_override() {
    let site = TestSite::standard().unwrap();
    site.write("templates/public/extra.html", "{{ apis.title }}|{{ channel }}").unwrap();
    let factory = factory(&site).await;

    let extras = DataSourceRegistry::new()
        .with("apis", Arc::new(StaticDataSource::new(json!({"title": "overridden"}))))
        .with("channel", Arc::new(StaticDataSource::new(json!("beta"))));
    let page = factory.create(&Request::new("/extra.html"), extras);

    assert_eq!(page.render("extra").unwrap().as_deref(), Some("overridden|beta"));
}

#[tokio::test]
async fn test_broken_data_document_is_fatal() {
    let site = TestSite::standard().unwrap();
    site.write("data/apis.json", "{ not json").unwrap();
    let factory = factory(&site).await;
    let page = factory.create(&Request::new("/tabs.html"), DataSourceRegistry::new());

    let err = page.render("tabs").unwrap_err();
    assert!(matches!(err, docs_server::core::DocsError::JsonError { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_page_without_data_renders_when_data_documents_are_missing() {
    let fixture = TemplateTreeFixture::new()
        .public("hello", "hello")
        .public("windows", "{% for api in api_list %}{{ api }}{% endfor %}")
        .file("data/references.json", "{}");
    let site = TestSite::with_fixture(fixture).unwrap();
    let factory = factory(&site).await;
    let page = factory.create(&Request::new("/hello.html"), DataSourceRegistry::new());

    assert_eq!(page.render("hello").unwrap().as_deref(), Some("hello"));
    let err = page.render("windows").unwrap_err();
    assert!(matches!(err, docs_server::core::DocsError::DataSourceError { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_compiled_templates_outlive_file_changes() {
    let site = TestSite::standard().unwrap();
    let factory = factory(&site).await;

    let first = factory.create(&Request::new("/"), DataSourceRegistry::new());
    assert_eq!(first.render("tabs").unwrap().as_deref(), Some(TABS_PAGE));

    site.write("templates/public/tabs.html", "changed").unwrap();
    let second = factory.create(&Request::new("/"), DataSourceRegistry::new());
    assert_eq!(second.render("tabs").unwrap().as_deref(), Some(TABS_PAGE));
}

#[tokio::test]
async fn test_missing_template_is_retried_after_it_appears() {
    let site = TestSite::standard().unwrap();
    let factory = factory(&site).await;
    let page = factory.create(&Request::new("/"), DataSourceRegistry::new());

    assert_eq!(page.render("late").unwrap(), None);
    site.write("templates/public/late.html", "here now").unwrap();
    assert_eq!(page.render("late").unwrap().as_deref(), Some("here now"));
}
