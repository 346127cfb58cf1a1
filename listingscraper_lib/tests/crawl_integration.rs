use std::time::Duration;

use listingscraper_lib::{ListingExtractor, OfficeCrawler, PageFetcher, ScrapeError};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE1: &str = include_str!("fixtures/office_page1.html");
const PAGE2: &str = include_str!("fixtures/office_page2.html");
const DETAIL: &str = include_str!("fixtures/listing_detail.html");

async fn mount_office(mock_server: &MockServer, office_id: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/profile/office/{}/page1", office_id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE1))
        .expect(expected_calls)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/profile/office/{}/page2", office_id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE2))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn crawl_concatenates_pages_in_order() {
    let mock_server = MockServer::start().await;
    mount_office(&mock_server, "3521", 1).await;

    let fetcher = PageFetcher::with_throttle(Duration::ZERO).unwrap();
    let crawler = OfficeCrawler::new(&fetcher).with_base_url(&mock_server.uri());

    let ids = crawler.list_listing_ids("3521").await.unwrap();
    assert_eq!(
        ids,
        vec!["1718302", "1718455", "1720001", "1720877", "1718302"]
    );
}

#[tokio::test]
async fn crawlers_sharing_a_fetcher_share_its_cache() {
    let mock_server = MockServer::start().await;
    mount_office(&mock_server, "3521", 1).await;

    let fetcher = PageFetcher::with_throttle(Duration::ZERO).unwrap();
    let first = OfficeCrawler::new(&fetcher).with_base_url(&mock_server.uri());
    let second = OfficeCrawler::new(&fetcher).with_base_url(&mock_server.uri());

    let a = first.list_listing_ids("3521").await.unwrap();
    let b = second.list_listing_ids("3521").await.unwrap();

    assert_eq!(a, b);
    assert_eq!(fetcher.stats().network_requests, 2);
    assert_eq!(fetcher.stats().cache_hits, 2);
}

#[tokio::test]
async fn crawl_stops_at_page_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/profile/office/9/page\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE1))
        .expect(3)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::with_throttle(Duration::ZERO).unwrap();
    let crawler = OfficeCrawler::new(&fetcher)
        .with_base_url(&mock_server.uri())
        .with_max_pages(Some(3));

    match crawler.list_listing_ids("9").await {
        Err(ScrapeError::PageLimitExceeded { office_id, limit }) => {
            assert_eq!(office_id, "9");
            assert_eq!(limit, 3);
        }
        other => panic!("expected PageLimitExceeded, got {:?}", other),
    }
}

#[tokio::test]
async fn crawl_fails_when_a_page_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile/office/3521/page1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE1))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/profile/office/3521/page2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::with_throttle(Duration::ZERO).unwrap();
    let crawler = OfficeCrawler::new(&fetcher).with_base_url(&mock_server.uri());

    let result = crawler.list_listing_ids("3521").await;
    assert!(matches!(result, Err(ScrapeError::HttpStatus { .. })));
}

#[tokio::test]
async fn get_detail_extracts_listing_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1718302"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::with_throttle(Duration::ZERO).unwrap();
    let extractor = ListingExtractor::new(&fetcher).with_base_url(&mock_server.uri());

    let record = extractor.get_detail("1718302").await.unwrap();
    assert_eq!(record.listing_id, "1718302");
    assert_eq!(record.heading, "3 Bedroom House");
    assert_eq!(record.price, "$450,000");
    assert_eq!(record.address, vec!["Wellington", "Porirua"]);
    assert_eq!(record.agency_id, "3521");

    // Served from cache the second time round.
    let again = extractor.get_detail("1718302").await.unwrap();
    assert_eq!(again, record);
}

#[tokio::test]
async fn get_detail_on_restructured_page_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><h1>Listing withdrawn</h1></body></html>"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::with_throttle(Duration::ZERO).unwrap();
    let extractor = ListingExtractor::new(&fetcher).with_base_url(&mock_server.uri());

    let result = extractor.get_detail("42").await;
    assert!(matches!(result, Err(ScrapeError::MissingElement(_))));
}
