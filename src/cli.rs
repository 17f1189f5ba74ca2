//! Command-line interface definitions.
//!
//! Every option can also be given through an environment variable.

use chrono::NaiveDate;
use clap::Parser;

/// Scrape the USCCB daily readings for one date.
///
/// # Examples
///
/// ```sh
/// # Today's readings
/// liturgy_readings -j ./json
///
/// # A given date, with LLM synopses and a reflection
/// liturgy_readings -j ./json --date 2025-11-22 --synopses --reflection
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Date to scrape (YYYY-MM-DD); defaults to today in local time
    #[arg(long, env = "LITURGY_DATE")]
    pub date: Option<NaiveDate>,

    /// Output directory for the JSON file
    #[arg(short, long, env = "LITURGY_JSON_OUTPUT_DIR")]
    pub json_output_dir: String,

    /// Optional path to a scraper config YAML file
    #[arg(short, long, env = "LITURGY_CONFIG")]
    pub config: Option<String>,

    /// Directory URL the readings pages live under
    #[arg(long, env = "LITURGY_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "LITURGY_TIMEOUT")]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, env = "LITURGY_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Total attempts per request, including the first
    #[arg(long, env = "LITURGY_MAX_ATTEMPTS")]
    pub max_attempts: Option<u32>,

    /// Base of the exponential backoff between attempts, in seconds
    #[arg(long, env = "LITURGY_BACKOFF_FACTOR")]
    pub backoff_factor: Option<f64>,

    /// Generate a one-line synopsis for each reading
    #[arg(long)]
    pub synopses: bool,

    /// Generate a unified daily reflection with Catechism citations
    #[arg(long)]
    pub reflection: bool,

    /// Path to the awful_aj config.yaml (defaults to its config directory)
    #[arg(long, env = "LITURGY_AI_CONFIG")]
    pub ai_config: Option<String>,
}

impl Cli {
    pub fn wants_ai(&self) -> bool {
        self.synopses || self.reflection
    }
}
