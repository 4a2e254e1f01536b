//! Integration tests for the crawler
//!
//! These tests use wiremock to serve catalog detail and similar-items pages
//! and run the full crawl cycle end-to-end, export file included.

use folio_crawl::config::Config;
use folio_crawl::crawler::crawl;
use folio_crawl::{Books, FolioError};
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a detail page in the catalog's markup
fn detail_page(id: &str, title: &str, ratings: &str, reviews: &str, rating: &str) -> String {
    format!(
        r#"<html><body>
<div class="BookCover__image"><img class="ResponsiveImage" role="presentation" src="https://images.example/{id}.jpg"></div>
<h1 class="Text__title1" data-testid="bookTitle" aria-label="Book title: {title}">{title}</h1>
<div class="ContributorLinksList"><span><a href="/author/show/{id}"><span>Author {id}</span></a></span></div>
<div class="RatingStatistics__rating">{rating}</div>
<div class="RatingStatistics__meta" aria-label="{ratings} ratings and {reviews} reviews"></div>
<ul><li><a href="/genres/programming">Programming</a></li><li><a href="/genres/software">Software</a></li></ul>
<a href="/work/quotes/{id}">Quotes</a>
</body></html>"#
    )
}

/// Renders a similar-items page linking to `hrefs`
fn similar_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<div class="Item"><a href="{}">Book</a></div>"#, href))
        .collect();
    format!("<html><body>{}</body></html>", links)
}

async fn serve(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

async fn never_served(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(server)
        .await;
}

/// Serves a seed (id 42) whose similar page lists two more books
async fn mount_catalog(server: &MockServer) {
    serve(
        server,
        "/book/show/1",
        detail_page("42", "The Seed", "1,000", "56", "4.20"),
        1,
    )
    .await;
    serve(
        server,
        "/book/similar/42",
        similar_page(&[
            "/book/show/2",
            "/book/show/3",
            "/book/show/1",
            "/author/show/99",
            "https://elsewhere.example/book/show/4",
        ]),
        1,
    )
    .await;
    serve(
        server,
        "/book/show/2",
        detail_page("7", "Popular", "3,000", "120", "4.00"),
        1,
    )
    .await;
    serve(
        server,
        "/book/show/3",
        detail_page("8", "Steady", "700", "12", "3.90"),
        1,
    )
    .await;
}

fn create_test_config(base_url: &str, export: &Path, max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler.seed_url = format!("{}/book/show/1", base_url);
    config.crawler.max_depth = max_depth;
    config.crawler.workers = 4;
    config.site.base_url = base_url.to_string();
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.timeout_secs = 5;
    config.output.export_path = export.display().to_string();
    config
}

fn read_export(path: &Path) -> Books {
    let content = std::fs::read_to_string(path).expect("export file should exist");
    serde_json::from_str(&content).expect("export should be valid JSON")
}

#[tokio::test]
async fn test_full_crawl_writes_ranked_export() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_catalog(&server).await;
    // Depth 2 is the last level: its entries are never expanded
    never_served(&server, "/book/similar/7").await;
    never_served(&server, "/book/similar/8").await;

    let dir = tempdir().unwrap();
    let export = dir.path().join("books.json");

    let outcome = crawl(create_test_config(&base_url, &export, 2))
        .await
        .unwrap();

    assert_eq!(outcome.exported, 3);
    assert_eq!(outcome.statistics.levels.len(), 2);
    assert_eq!(outcome.statistics.total_failed(), 0);

    let books = read_export(&export);
    let urls: Vec<String> = books.books.iter().map(|e| e.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/book/show/2", base_url),
            format!("{}/book/show/1", base_url),
            format!("{}/book/show/3", base_url),
        ]
    );

    let seed = &books.books[1];
    assert_eq!(seed.title, "The Seed");
    assert_eq!(seed.id, "42");
    assert_eq!(seed.ratings, 1000);
    assert_eq!(seed.reviews, 56);
    assert!((seed.rating - 4.2).abs() < f64::EPSILON);
    assert_eq!(seed.authors, vec!["Author 42"]);
    assert_eq!(seed.genres, vec!["programming", "software"]);
    assert_eq!(seed.cover_url.as_deref(), Some("https://images.example/42.jpg"));
}

#[tokio::test]
async fn test_resume_without_extra_depth_reproduces_export() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_catalog(&server).await;

    let dir = tempdir().unwrap();
    let first = dir.path().join("first.json");
    crawl(create_test_config(&base_url, &first, 2)).await.unwrap();

    // A second server with no routes: any request would be unmatched
    let offline = MockServer::start().await;
    never_served(&offline, "/book/show/1").await;

    let second = dir.path().join("second.json");
    let mut config = create_test_config(&offline.uri(), &second, 0);
    config.crawler.seed_url = format!("{}/book/show/1", base_url);
    config.output.resume_path = first.display().to_string();

    let outcome = crawl(config).await.unwrap();

    assert_eq!(outcome.statistics.resumed_entries, 3);
    assert_eq!(read_export(&second), read_export(&first));
}

#[tokio::test]
async fn test_resume_from_the_export_being_written() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_catalog(&server).await;

    let dir = tempdir().unwrap();
    let export = dir.path().join("books.json");
    crawl(create_test_config(&base_url, &export, 2)).await.unwrap();
    let before = read_export(&export);

    let mut config = create_test_config(&base_url, &export, 0);
    config.output.resume_path = export.display().to_string();
    crawl(config).await.unwrap();

    assert_eq!(read_export(&export), before);
}

#[tokio::test]
async fn test_resume_reexpands_previous_results() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_catalog(&server).await;

    let dir = tempdir().unwrap();
    let export = dir.path().join("books.json");

    // Depth 1 stores only the seed
    let first = crawl(create_test_config(&base_url, &export, 1)).await.unwrap();
    assert_eq!(first.exported, 1);

    // The seed is not fetched again; its similar page is looked up once
    let mut config = create_test_config(&base_url, &export, 1);
    config.output.resume_path = export.display().to_string();
    let second = crawl(config).await.unwrap();

    assert_eq!(second.exported, 3);
    assert_eq!(second.statistics.levels[0].depth, 0);
    assert_eq!(read_export(&export).len(), 3);
}

#[tokio::test]
async fn test_unreachable_seed_writes_empty_export() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/show/1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let export = dir.path().join("books.json");

    let outcome = crawl(create_test_config(&server.uri(), &export, 3))
        .await
        .unwrap();

    assert_eq!(outcome.exported, 0);
    assert_eq!(outcome.statistics.total_failed(), 1);
    assert_eq!(outcome.statistics.errors.len(), 1);
    assert!(read_export(&export).is_empty());
}

#[tokio::test]
async fn test_unwritable_export_fails_before_fetching() {
    let server = MockServer::start().await;
    never_served(&server, "/book/show/1").await;

    let dir = tempdir().unwrap();
    let export = dir.path().join("missing").join("books.json");

    let result = crawl(create_test_config(&server.uri(), &export, 2)).await;

    assert!(matches!(result, Err(FolioError::Output(_))));
}

#[tokio::test]
async fn test_filtered_entries_are_not_exported() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    serve(
        &server,
        "/book/show/1",
        detail_page("42", "The Seed", "1,000", "56", "4.20"),
        1,
    )
    .await;
    serve(
        &server,
        "/book/similar/42",
        similar_page(&["/book/show/2", "/book/show/3"]),
        1,
    )
    .await;
    serve(
        &server,
        "/book/show/2",
        detail_page("7", "Obscure", "40", "2", "4.90"),
        1,
    )
    .await;
    serve(
        &server,
        "/book/show/3",
        detail_page("8", "Mediocre", "9,000", "400", "3.10"),
        1,
    )
    .await;
    never_served(&server, "/book/similar/7").await;
    never_served(&server, "/book/similar/8").await;

    let dir = tempdir().unwrap();
    let export = dir.path().join("books.json");

    let outcome = crawl(create_test_config(&base_url, &export, 3))
        .await
        .unwrap();

    assert_eq!(outcome.exported, 1);
    assert_eq!(outcome.statistics.total_stored(), 3);
    assert_eq!(read_export(&export).books[0].title, "The Seed");
}
