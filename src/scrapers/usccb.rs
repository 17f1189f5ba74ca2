//! USCCB daily readings scraper.
//!
//! Readings live at `https://bible.usccb.org/bible/readings/MMDDYY.cfm`.
//! [`UsccbScraper`] owns one pooled `reqwest::Client` and turns a date into
//! a validated [`DailyReading`].
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> Result<(), liturgy_readings::error::ScraperError> {
//! use chrono::NaiveDate;
//! use liturgy_readings::scrapers::usccb::UsccbScraper;
//!
//! let scraper = UsccbScraper::with_defaults()?;
//! let day = scraper
//!     .get_readings_for_date(NaiveDate::from_ymd_opt(2025, 11, 22).unwrap())
//!     .await?;
//! println!("{}: {} readings", day.liturgical_day, day.readings.len());
//! # Ok(())
//! # }
//! ```

use super::liturgical_day::extract_liturgical_day;
use super::readings::{check_for_multiple_masses, extract_readings};
use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use crate::models::DailyReading;
use chrono::NaiveDate;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Date as the site encodes it in page names: `MMDDYY`.
pub fn date_code(date: NaiveDate) -> String {
    date.format("%m%d%y").to_string()
}

/// `{base_url}/{MMDDYY}.cfm`
pub fn build_url(base_url: &str, date: NaiveDate) -> String {
    format!("{}/{}.cfm", base_url.trim_end_matches('/'), date_code(date))
}

/// e.g. "Saturday, November 22, 2025".
pub fn format_date_display(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

/// Scraper for the USCCB readings pages.
/// Owns its pooled HTTP client; not `Clone`, so the client is never shared.
#[derive(Debug)]
pub struct UsccbScraper {
    config: ScraperConfig,
    client: Client,
}

impl UsccbScraper {
    /// Validate `config` and build the HTTP client it describes.
    pub fn new(config: ScraperConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScraperError::configuration(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ScraperConfig::default())
    }

    pub fn build_url(&self, date: NaiveDate) -> String {
        build_url(self.config.normalized_base_url(), date)
    }

    /// Fetch `url` with the configured retry policy and parse the HTML.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<Html> {
        let body = self
            .config
            .retry
            .retry("fetch_page", ScraperError::is_retryable, || self.fetch_body(url))
            .await?;
        let document = Html::parse_document(&body);
        debug!(bytes = body.len(), "Fetched and parsed page");
        Ok(document)
    }

    /// One GET attempt; every failure becomes a [`ScraperError::Network`].
    async fn fetch_body(&self, url: &str) -> Result<String> {
        debug!(%url, "Fetching URL");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.network_error(url, e))?;
        response.text().await.map_err(|e| self.network_error(url, e))
    }

    fn network_error(&self, url: &str, e: reqwest::Error) -> ScraperError {
        if e.is_timeout() {
            ScraperError::network(
                format!("Request timed out after {}s: {url}", self.config.timeout_secs),
                url,
            )
        } else if let Some(status) = e.status() {
            ScraperError::Network {
                message: format!("HTTP error {} for {url}", status.as_u16()),
                url: url.to_string(),
                status_code: Some(status.as_u16()),
            }
        } else if e.is_connect() {
            ScraperError::network(format!("Connection error for {url}: {e}"), url)
        } else {
            ScraperError::network(format!("Request failed for {url}: {e}"), url)
        }
    }

    /// Warning text when the page links to several Masses for `date`.
    pub fn check_for_multiple_masses(&self, document: &Html, date: NaiveDate) -> Option<String> {
        check_for_multiple_masses(document, &date_code(date))
    }

    /// Fetch, extract and validate the readings for `date`.
    ///
    /// Network errors are retried inside [`UsccbScraper::fetch_page`];
    /// parse and validation errors abort immediately.
    #[instrument(level = "info", skip_all, fields(%date))]
    pub async fn get_readings_for_date(&self, date: NaiveDate) -> Result<DailyReading> {
        let url = self.build_url(date);
        info!(%url, "Fetching readings");

        let document = self.fetch_page(&url).await?;
        let daily = self.readings_from_document(&document, date, &url)?;

        info!(
            count = daily.readings.len(),
            liturgical_day = %daily.liturgical_day,
            "Scraped readings"
        );
        Ok(daily)
    }

    /// Extraction half of [`UsccbScraper::get_readings_for_date`], for an
    /// already-fetched document.
    pub fn readings_from_document(
        &self,
        document: &Html,
        date: NaiveDate,
        source_url: &str,
    ) -> Result<DailyReading> {
        if let Some(warning) = self.check_for_multiple_masses(document, date) {
            warn!(%warning, "Feast day with several Masses");
        }

        let liturgical_day = extract_liturgical_day(document)?;
        let readings = extract_readings(document)?;

        let daily = DailyReading {
            date,
            date_display: format_date_display(date),
            liturgical_day,
            readings,
            source_url: source_url.to_string(),
        };

        if let Err(e) = daily.validate() {
            error!(error = %e, field = ?e.field(), "Validation failed for readings");
            return Err(e);
        }
        Ok(daily)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use crate::scrapers::fixtures::{page, weekday_page};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scraper_for(base_url: &str, max_attempts: u32) -> UsccbScraper {
        UsccbScraper::new(ScraperConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            user_agent: "TestBot/1.0".to_string(),
            retry: RetryPolicy::new(max_attempts, 2.0),
        })
        .unwrap()
    }

    #[test]
    fn test_build_url() {
        let scraper = UsccbScraper::with_defaults().unwrap();
        assert_eq!(
            scraper.build_url(date(2025, 11, 22)),
            "https://bible.usccb.org/bible/readings/112225.cfm"
        );
        assert_eq!(
            scraper.build_url(date(2025, 1, 1)),
            "https://bible.usccb.org/bible/readings/010125.cfm"
        );
        assert_eq!(
            scraper.build_url(date(2024, 12, 25)),
            "https://bible.usccb.org/bible/readings/122524.cfm"
        );
    }

    #[test]
    fn test_build_url_leap_day_and_determinism() {
        let a = build_url("https://bible.usccb.org/bible/readings", date(2024, 2, 29));
        let b = build_url("https://bible.usccb.org/bible/readings/", date(2024, 2, 29));
        assert_eq!(a, "https://bible.usccb.org/bible/readings/022924.cfm");
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_date_display() {
        assert_eq!(format_date_display(date(2025, 11, 22)), "Saturday, November 22, 2025");
        assert_eq!(format_date_display(date(2025, 1, 5)), "Sunday, January 05, 2025");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = UsccbScraper::new(ScraperConfig {
            timeout_secs: 0,
            ..ScraperConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_readings_from_document_is_idempotent() {
        let scraper = UsccbScraper::with_defaults().unwrap();
        let document = Html::parse_document(&weekday_page());
        let url = scraper.build_url(date(2025, 11, 22));
        let first = scraper
            .readings_from_document(&document, date(2025, 11, 22), &url)
            .unwrap();
        let second = scraper
            .readings_from_document(&document, date(2025, 11, 22), &url)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.liturgical_day, "Memorial of Saint Cecilia, Virgin and Martyr");
        assert_eq!(first.readings.len(), 4);
        assert_eq!(first.source_url, url);
    }

    #[tokio::test]
    async fn test_get_readings_for_date_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bible/readings/112225.cfm"))
            .and(header("user-agent", "TestBot/1.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(weekday_page())
                    .insert_header("content-type", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let scraper = scraper_for(&format!("{}/bible/readings", server.uri()), 3);
        let daily = scraper.get_readings_for_date(date(2025, 11, 22)).await.unwrap();

        assert_eq!(daily.readings.len(), 4);
        assert_eq!(daily.date_display, "Saturday, November 22, 2025");
        assert_eq!(
            daily.source_url,
            format!("{}/bible/readings/112225.cfm", server.uri())
        );
    }

    #[tokio::test]
    async fn test_http_error_status_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = scraper_for(&server.uri(), 1);
        let err = scraper.get_readings_for_date(date(2025, 11, 22)).await.unwrap_err();

        assert!(matches!(err, ScraperError::Network { .. }));
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.url(), Some(format!("{}/112225.cfm", server.uri()).as_str()));
    }

    #[tokio::test]
    async fn test_server_error_is_retried_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(weekday_page()))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = scraper_for(&server.uri(), 2);
        let daily = scraper.get_readings_for_date(date(2025, 11, 22)).await.unwrap();
        assert_eq!(daily.readings.len(), 4);
    }

    #[tokio::test]
    async fn test_parse_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page("USCCB", "")))
            .expect(1)
            .mount(&server)
            .await;

        let scraper = scraper_for(&server.uri(), 3);
        let err = scraper.get_readings_for_date(date(2025, 11, 22)).await.unwrap_err();
        assert_eq!(err.element(), Some("liturgical_day"));
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(weekday_page())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let scraper = UsccbScraper::new(ScraperConfig {
            base_url: server.uri(),
            timeout_secs: 1,
            user_agent: "TestBot/1.0".to_string(),
            retry: RetryPolicy::new(1, 2.0),
        })
        .unwrap();
        let err = scraper.get_readings_for_date(date(2025, 11, 22)).await.unwrap_err();

        assert!(matches!(err, ScraperError::Network { status_code: None, .. }));
        assert!(err.to_string().starts_with("Request timed out after 1s"));
        assert_eq!(err.url(), Some(format!("{}/112225.cfm", server.uri()).as_str()));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop a listener so the port is very likely closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let scraper = scraper_for(&format!("http://{addr}"), 1);
        let err = scraper.get_readings_for_date(date(2025, 11, 22)).await.unwrap_err();
        assert!(matches!(err, ScraperError::Network { status_code: None, .. }));
    }
}
