//! Integration tests for the scraping pipeline
//!
//! A wiremock server stands in for bible.usccb.org and serves a saved
//! readings page, so the full fetch -> extract -> validate -> write cycle
//! runs through the public API.

use chrono::NaiveDate;
use liturgy_readings::config::ScraperConfig;
use liturgy_readings::error::ScraperError;
use liturgy_readings::models::DailyPage;
use liturgy_readings::outputs::json::write_daily_page;
use liturgy_readings::retry::RetryPolicy;
use liturgy_readings::scrapers::usccb::UsccbScraper;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAINT_CECILIA: &str = include_str!("fixtures/readings_112225.html");

/// Creates a scraper pointed at the mock server with fast retries
fn create_test_scraper(base_url: &str, max_attempts: u32) -> UsccbScraper {
    UsccbScraper::new(ScraperConfig {
        base_url: format!("{base_url}/bible/readings"),
        timeout_secs: 5,
        user_agent: "TestBot/1.0".to_string(),
        retry: RetryPolicy::new(max_attempts, 0.0),
    })
    .expect("valid test config")
}

fn nov_22() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 22).unwrap()
}

#[tokio::test]
async fn test_scrape_saved_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bible/readings/112225.cfm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAINT_CECILIA))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = create_test_scraper(&mock_server.uri(), 3);
    let daily = scraper.get_readings_for_date(nov_22()).await.unwrap();

    assert_eq!(daily.liturgical_day, "Memorial of Saint Cecilia, Virgin and Martyr");
    assert_eq!(daily.date_display, "Saturday, November 22, 2025");

    let titles: Vec<&str> = daily.readings.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Reading 1", "Responsorial Psalm", "Alleluia", "Gospel"]);
    assert_eq!(daily.readings[1].citation, "Psalms 9:2-3, 4 and 6, 16 and 19");

    // Line breaks inside a paragraph collapse to single spaces
    assert!(daily.readings[0].text[0].starts_with(
        "As King Antiochus was traversing the inland provinces, he heard that in Persia"
    ));

    // "View Calendar" inside the Gospel body is not scripture
    let gospel = &daily.readings[3];
    assert_eq!(gospel.text.len(), 2);
    assert!(gospel.text.iter().all(|p| !p.contains("View Calendar")));
}

#[tokio::test]
async fn test_scrape_and_write_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bible/readings/112225.cfm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAINT_CECILIA))
        .mount(&mock_server)
        .await;

    let scraper = create_test_scraper(&mock_server.uri(), 1);
    let readings = scraper.get_readings_for_date(nov_22()).await.unwrap();

    let out = tempfile::tempdir().unwrap();
    let page = DailyPage {
        readings,
        synopses: Vec::new(),
        reflection: None,
        generated_at: "2025-11-22T06:00:00+00:00".to_string(),
    };
    let written = write_daily_page(&page, out.path().to_str().unwrap())
        .await
        .unwrap();

    assert!(written.ends_with("2025-11-22.json"));
    let back: DailyPage =
        serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(back.readings, page.readings);
}

#[tokio::test]
async fn test_persistent_outage_exhausts_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let scraper = create_test_scraper(&mock_server.uri(), 3);
    let err = scraper.get_readings_for_date(nov_22()).await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_page_without_readings_is_parse_error() {
    let mock_server = MockServer::start().await;
    let body = "<html><head><title>Daily Readings - Something Long Enough | USCCB</title></head>\
                <body><h2>Nothing here</h2></body></html>";
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = create_test_scraper(&mock_server.uri(), 3);
    let err = scraper.get_readings_for_date(nov_22()).await.unwrap_err();

    assert!(matches!(err, ScraperError::Parse { .. }));
    assert_eq!(err.element(), Some("readings"));
    assert_eq!(err.exit_code(), 3);
}
