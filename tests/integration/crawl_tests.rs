//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing pages and run full crawl cycles
//! over real HTTP against a file checkpoint.

use listing_tide::checkpoint::{CheckpointStore, FileCheckpoint};
use listing_tide::config::Config;
use listing_tide::crawler::{Coordinator, RunMode, StopReason};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::for_site(base_url);
    config.checkpoint.path = dir.path().join("latest_id.txt");
    config.crawl.politeness_delay_ms = 0;
    config.fetch.retry_delay_secs = 0.0;
    config.fetch.timeout_secs = 5;
    config.fetch.user_agent = Some("TideTest/1.0".to_string());
    config
}

/// Renders a listing page holding the given article ids
fn listing_page(base_url: &str, ids: &[u64]) -> String {
    let articles: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<article class="post">
                    <header class="entry-header">
                        <h1 class="entry-title"><a href="{base_url}/wp/{id}.html">Article {id}</a></h1>
                    </header>
                    <div class="entry-content"><p><img src="/covers/{id}.jpg">Summary of {id}<br>More text</p></div>
                </article>"#
            )
        })
        .collect();
    format!("<html><head><title>Listing</title></head><body>{articles}</body></html>")
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_first_run_seeds_checkpoint_from_second_article() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", listing_page(&base_url, &[105, 104, 103])).await;

    // First run never paginates
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &dir);
    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let report = coordinator.run_cycle().await;

    assert_eq!(report.mode, RunMode::FirstRun);
    assert_eq!(report.articles.len(), 1);

    let article = &report.articles[0];
    assert_eq!(article.id, 104);
    assert_eq!(article.title, "Article 104");
    assert_eq!(article.url, format!("{}/wp/104.html", base_url));
    assert_eq!(
        article.cover.as_deref(),
        Some(format!("{}/covers/104.jpg", base_url).as_str())
    );
    assert_eq!(article.desc, "Summary of 104\nMore text");

    let stored = std::fs::read_to_string(&config.checkpoint.path).unwrap();
    assert_eq!(stored, "104");
}

#[tokio::test]
async fn test_incremental_run_stops_when_caught_up() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", listing_page(&base_url, &[110, 109, 108])).await;
    mount_page(&mock_server, "/page/2/", listing_page(&base_url, &[100, 99, 98])).await;

    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &dir);
    FileCheckpoint::new(&config.checkpoint.path)
        .save(100)
        .unwrap();

    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let report = coordinator.run_cycle().await;

    let ids: Vec<u64> = report.articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![110, 109, 108]);
    assert_eq!(report.stop_reason, StopReason::CaughtUp { page: 2 });
    assert_eq!(coordinator.checkpoint().load(), Some(110));

    // Nothing new on the second pass
    let again = coordinator.fetch_latest_articles().await;
    assert!(again.is_empty());
    assert_eq!(coordinator.checkpoint().load(), Some(110));
}

#[tokio::test]
async fn test_incremental_run_across_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", listing_page(&base_url, &[130, 129])).await;
    mount_page(&mock_server, "/page/2/", listing_page(&base_url, &[128, 127])).await;
    mount_page(&mock_server, "/page/3/", listing_page(&base_url, &[126, 120])).await;

    let config = create_test_config(&base_url, &dir);
    FileCheckpoint::new(&config.checkpoint.path)
        .save(125)
        .unwrap();

    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let report = coordinator.run_cycle().await;

    let ids: Vec<u64> = report.articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![130, 129, 128, 127, 126]);
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.stop_reason, StopReason::PageLimit);
    assert_eq!(coordinator.checkpoint().load(), Some(130));
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    // Mounted first, so it answers the first two requests
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", listing_page(&base_url, &[42, 41])).await;

    let config = create_test_config(&base_url, &dir);
    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let articles = coordinator.fetch_latest_articles().await;

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, 41);
    assert_eq!(coordinator.checkpoint().load(), Some(41));
}

#[tokio::test]
async fn test_exhausted_retries_leave_checkpoint_untouched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &dir);
    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let report = coordinator.run_cycle().await;

    assert!(report.articles.is_empty());
    assert_eq!(report.stop_reason, StopReason::NothingToSeed);
    assert!(!config.checkpoint.path.exists());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&base_url, &[2, 1]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url, &dir);
    config.fetch.timeout_secs = 1;
    config.fetch.retry = 1;

    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let articles = coordinator.fetch_latest_articles().await;

    assert!(articles.is_empty());
    assert_eq!(coordinator.checkpoint().load(), None);
}

#[tokio::test]
async fn test_corrupt_checkpoint_falls_back_to_first_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", listing_page(&base_url, &[77, 76, 75])).await;

    let config = create_test_config(&base_url, &dir);
    std::fs::write(&config.checkpoint.path, "garbage").unwrap();

    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let report = coordinator.run_cycle().await;

    assert_eq!(report.mode, RunMode::FirstRun);
    assert_eq!(report.articles[0].id, 76);
    assert_eq!(coordinator.checkpoint().load(), Some(76));
}

#[tokio::test]
async fn test_requests_carry_configured_user_agent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TideTest/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_page(&base_url, &[3, 2])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &dir);
    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let articles = coordinator.fetch_latest_articles().await;

    assert_eq!(articles.len(), 1);
}

#[tokio::test]
async fn test_fallback_link_markup() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    // Older theme: no heading wrapper around the link
    let body = format!(
        r#"<html><body>
            <article><a href="{base_url}/wp/301.html">Pinned</a></article>
            <article><a href="/wp/300.html">Bare link article</a><div><p>Plain excerpt</p></div></article>
        </body></html>"#
    );
    mount_page(&mock_server, "/", body).await;

    let config = create_test_config(&base_url, &dir);
    let coordinator = Coordinator::from_config(&config).expect("Failed to create coordinator");
    let articles = coordinator.fetch_latest_articles().await;

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, 300);
    assert_eq!(articles[0].title, "Bare link article");
    assert_eq!(articles[0].url, format!("{}/wp/300.html", base_url));
    assert_eq!(articles[0].desc, "Plain excerpt");
}
