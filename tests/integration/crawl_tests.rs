//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run full passes
//! through the real HTTP fetcher, then query the resulting index.

use knowledge_index::config::{
    Config, CrawlerConfig, SearchConfig, SeedSection, SiteConfig, UserAgentConfig,
};
use knowledge_index::crawler::{build_crawler, crawl_once};
use knowledge_index::search::SearchIndex;
use knowledge_index::store::DocumentStore;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `sections` on the mock server
fn create_test_config(base_url: &str, sections: &[(&str, &str)]) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth: 1,
            pacing_delay_ms: 0,
            fetch_timeout_secs: 5,
            recrawl_interval_hours: 24,
            crawl_on_start: false,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        site: SiteConfig {
            domain_prefix: base_url.to_string(),
        },
        search: SearchConfig::default(),
        sections: sections
            .iter()
            .map(|(name, p)| SeedSection::new(*name, format!("{}{}", base_url, p)))
            .collect(),
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_condeco_section_is_searchable() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/condeco",
        "<html><head><title>Condeco Home</title></head><body>Book a desk with Condeco</body></html>"
            .to_string(),
        1,
    )
    .await;

    let config = create_test_config(&base_url, &[("Condeco", "/condeco")]);
    let store = Arc::new(DocumentStore::new());
    let report = crawl_once(&config, Arc::clone(&store)).await.unwrap();

    assert_eq!(report.total_documents, 1);
    assert_eq!(report.pages_fetched, 1);

    let document = store.get(&format!("{}/condeco", base_url)).unwrap().unwrap();
    assert_eq!(document.title, "Condeco Home");
    assert_eq!(document.content, "Book a desk with Condeco");

    let index = SearchIndex::new(store);
    let hits = index.search("desk", 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Condeco Home");
    assert_eq!(hits[0].excerpt, "Book a desk with Condeco...");
    assert_eq!(hits[0].url, format!("{}/condeco", base_url));

    assert!(index.search("zzz", 5).unwrap().is_empty());
}

#[tokio::test]
async fn test_follows_links_one_level_deep() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/condeco",
        format!(
            r#"<html><head><title>Condeco</title></head><body>
            <a href="{0}/condeco/desks">Desk booking</a>
            <a href="{0}/condeco/rooms">Rooms</a>
            <a href="https://elsewhere.test/offsite">Offsite</a>
            <a href="/condeco/relative">Relative</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;

    mount_page(
        &mock_server,
        "/condeco/desks",
        format!(
            r#"<html><body>Desks <a href="{0}/condeco/deep">Too deep</a>
            <a href="{0}/condeco">Back</a></body></html>"#,
            base_url
        ),
        1,
    )
    .await;

    mount_page(
        &mock_server,
        "/condeco/rooms",
        "<html><head><title>Meeting Rooms</title></head><body>Rooms</body></html>".to_string(),
        1,
    )
    .await;

    // Depth 2: must never be requested
    mount_page(
        &mock_server,
        "/condeco/deep",
        "<html><body>deep</body></html>".to_string(),
        0,
    )
    .await;

    let config = create_test_config(&base_url, &[("Condeco", "/condeco")]);
    let store = Arc::new(DocumentStore::new());
    let report = crawl_once(&config, Arc::clone(&store)).await.unwrap();

    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.total_documents, 3);

    let urls: Vec<String> = store.snapshot().unwrap().into_iter().map(|d| d.url).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/condeco", base_url),
            format!("{}/condeco/desks", base_url),
            format!("{}/condeco/rooms", base_url),
        ]
    );

    // No <title>: the anchor text names the page
    let desks = store
        .get(&format!("{}/condeco/desks", base_url))
        .unwrap()
        .unwrap();
    assert_eq!(desks.title, "Desk booking");
}

#[tokio::test]
async fn test_broken_child_does_not_fail_the_pass() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/archibus",
        format!(
            r#"<html><head><title>Archibus</title></head><body>
            <a href="{0}/archibus/missing">Missing</a>
            <a href="{0}/archibus/spaces">Spaces</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/archibus/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/archibus/spaces",
        "<html><head><title>Spaces</title></head><body>Space planning</body></html>".to_string(),
        1,
    )
    .await;

    let config = create_test_config(&base_url, &[("Archibus", "/archibus")]);
    let store = Arc::new(DocumentStore::new());
    let report = crawl_once(&config, Arc::clone(&store)).await.unwrap();

    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.total_documents, 2);
    assert!(store
        .get(&format!("{}/archibus/missing", base_url))
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_recrawl_failure_keeps_previous_documents() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/proxyclick",
        "<html><head><title>Proxyclick</title></head><body>Visitor sign in</body></html>"
            .to_string(),
        1,
    )
    .await;

    let config = create_test_config(&base_url, &[("Proxyclick", "/proxyclick")]);
    let store = Arc::new(DocumentStore::new());
    let crawler = build_crawler(&config, Arc::clone(&store)).unwrap();

    crawler.crawl(&config.sections).await.unwrap();
    let first_crawl = crawler.last_crawl().unwrap();

    // The site goes down between passes
    mock_server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let report = crawler.crawl(&config.sections).await.unwrap();
    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.total_documents, 1);
    assert!(crawler.last_crawl().unwrap() >= first_crawl);

    let hits = SearchIndex::new(store).search("visitor", 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Proxyclick");
}

#[tokio::test]
async fn test_recrawl_refreshes_changed_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/serraview",
        "<html><head><title>Serraview</title></head><body>Old text</body></html>".to_string(),
        1,
    )
    .await;

    let config = create_test_config(&base_url, &[("Serraview", "/serraview")]);
    let store = Arc::new(DocumentStore::new());
    let crawler = build_crawler(&config, Arc::clone(&store)).unwrap();
    crawler.crawl(&config.sections).await.unwrap();

    mock_server.reset().await;
    mount_page(
        &mock_server,
        "/serraview",
        "<html><head><title>Serraview</title></head><body>New text</body></html>".to_string(),
        1,
    )
    .await;

    let report = crawler.crawl(&config.sections).await.unwrap();
    assert_eq!(report.documents_added, 0);
    assert_eq!(report.total_documents, 1);

    let document = store
        .get(&format!("{}/serraview", base_url))
        .unwrap()
        .unwrap();
    assert_eq!(document.content, "New text");
    assert_eq!(crawler.status().passes_completed, 2);
}

#[tokio::test]
async fn test_shared_link_fetched_once_across_sections() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let shared = format!(r#"<a href="{}/shared/faq">FAQ</a>"#, base_url);
    mount_page(
        &mock_server,
        "/condeco",
        format!("<title>Condeco</title><body>{}</body>", shared),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/archibus",
        format!("<title>Archibus</title><body>{}</body>", shared),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/shared/faq",
        "<title>FAQ</title><body>Answers</body>".to_string(),
        1,
    )
    .await;

    let config = create_test_config(
        &base_url,
        &[("Condeco", "/condeco"), ("Archibus", "/archibus")],
    );
    let store = Arc::new(DocumentStore::new());
    let report = crawl_once(&config, Arc::clone(&store)).await.unwrap();

    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.total_documents, 3);
}

#[tokio::test]
async fn test_non_markup_response_is_not_indexed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/condeco",
        format!(
            r#"<html><head><title>Condeco</title></head><body>
            <a href="{0}/condeco/guide.pdf">Guide</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/condeco/guide.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, &[("Condeco", "/condeco")]);
    let store = Arc::new(DocumentStore::new());
    let report = crawl_once(&config, Arc::clone(&store)).await.unwrap();

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.total_documents, 1);
    assert!(store
        .get(&format!("{}/condeco/guide.pdf", base_url))
        .unwrap()
        .is_none());
}
