//! # Liturgy Readings
//!
//! Scrapes the daily Catholic Mass readings from the USCCB website into a
//! validated [`models::DailyReading`], optionally enriched with LLM-written
//! synopses and a daily reflection, and writes the result as JSON.
//!
//! ## Architecture
//!
//! 1. **Fetching**: [`scrapers::usccb::UsccbScraper`] builds the `MMDDYY.cfm`
//!    URL and fetches it with retry on network errors
//! 2. **Extraction**: the liturgical day and the readings are pulled from the
//!    parsed HTML
//! 3. **Validation**: the assembled day is checked before it is returned
//! 4. **Enrichment** (optional): [`ai::client::LiturgyAssistant`] asks an
//!    OpenAI-compatible model through `awful_aj`
//! 5. **Output**: [`outputs::json`] writes one JSON file per date

pub mod ai;
pub mod api;
pub mod ccc;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod outputs;
pub mod retry;
pub mod scrapers;
pub mod utils;
