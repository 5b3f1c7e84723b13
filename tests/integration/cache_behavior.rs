//! Shared compiled-template cache under concurrent requests.

use docs_server::config::ServerConfig;
use docs_server::sources::{DataSourceRegistry, Request};
use docs_server::templating::TemplateDataSourceFactory;
use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::{TABS_PAGE, TestSite};

async fn shared_factory(site: &TestSite) -> Arc<TemplateDataSourceFactory> {
    let config = ServerConfig::load_from(&site.config_path()).await.unwrap();
    Arc::new(config.build_factory().unwrap())
}

#[tokio::test]
async fn test_concurrent_requests_compile_each_template_once() {
    let site = TestSite::standard().unwrap();
    let factory = shared_factory(&site).await;

    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let factory = Arc::clone(&factory);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let page =
                    factory.create(&Request::new(format!("/tabs.html?{i}")), DataSourceRegistry::new());
                barrier.wait();
                page.render("tabs").unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some(TABS_PAGE));
    }

    // tabs, header, side_nav, footer
    assert_eq!(factory.cache().compile_count(), 4);
    assert_eq!(factory.cache().len(), 4);
    let stats = factory.stats();
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.hits + stats.misses, threads * 4);
}

#[tokio::test]
async fn test_pages_share_partials_through_the_cache() {
    let site = TestSite::standard().unwrap();
    let factory = shared_factory(&site).await;

    let tasks: Vec<_> = ["tabs", "windows", "tabs", "windows"]
        .into_iter()
        .map(|name| {
            let factory = Arc::clone(&factory);
            tokio::task::spawn_blocking(move || {
                factory.create(&Request::new("/"), DataSourceRegistry::new()).render(name)
            })
        })
        .collect();

    for task in futures::future::join_all(tasks).await {
        assert!(task.unwrap().unwrap().is_some());
    }

    // tabs, windows, header, side_nav, footer: header is compiled once for both pages
    assert_eq!(factory.cache().compile_count(), 5);
}

#[tokio::test]
async fn test_missing_templates_are_not_cached() {
    let site = TestSite::standard().unwrap();
    let factory = shared_factory(&site).await;
    let page = factory.create(&Request::new("/"), DataSourceRegistry::new());

    for _ in 0..3 {
        assert_eq!(page.render("bookmarks").unwrap(), None);
    }
    assert!(factory.cache().is_empty());
    assert_eq!(factory.stats().misses, 3);
}
