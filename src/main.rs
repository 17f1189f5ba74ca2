//! # Liturgy Readings
//!
//! Scrapes the USCCB daily readings for one date and writes them as JSON,
//! optionally with LLM-written synopses and a daily reflection.
//!
//! ## Usage
//!
//! ```sh
//! liturgy_readings -j ./json --date 2025-11-22 --synopses --reflection
//! ```
//!
//! ## Exit codes
//!
//! | code | meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | success                                   |
//! | 1    | network failure after all retries         |
//! | 2    | invalid configuration                     |
//! | 3    | page could not be parsed or validated     |
//! | 4    | output directory or file not writable     |

use awful_aj::{config, config_dir, template};
use chrono::{Local, Utc};
use clap::Parser;
use liturgy_readings::ai::client::LiturgyAssistant;
use liturgy_readings::ai::models::{DailyReflection, ReadingSynopsis};
use liturgy_readings::api::{AskFnWrapper, RetryAsk};
use liturgy_readings::cli::Cli;
use liturgy_readings::config::ScraperConfig;
use liturgy_readings::error::ScraperError;
use liturgy_readings::models::{DailyPage, DailyReading};
use liturgy_readings::outputs::json;
use liturgy_readings::retry::RetryPolicy;
use liturgy_readings::scrapers::usccb::UsccbScraper;
use liturgy_readings::utils::ensure_writable_dir;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

const OUTPUT_EXIT_CODE: u8 = 4;
const REFLECTION_ATTEMPTS: u32 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("liturgy_readings starting up");

    let args = Cli::parse();
    debug!(?args.date, ?args.json_output_dir, ?args.config, "Parsed CLI arguments");

    let code = match run(&args).await {
        Ok(path) => {
            info!(path = %path.display(), "Wrote daily readings");
            0
        }
        Err(code) => code,
    };

    let elapsed = start_time.elapsed();
    info!(?elapsed, exit_code = code, "Execution complete");
    ExitCode::from(code)
}

/// The whole pipeline; on failure the error is logged and its exit code returned.
async fn run(args: &Cli) -> Result<PathBuf, u8> {
    let config = build_config(args).map_err(scraper_failure)?;

    // Early check: ensure JSON output dir is writable
    if let Err(e) = ensure_writable_dir(&args.json_output_dir).await {
        error!(
            path = %args.json_output_dir,
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(OUTPUT_EXIT_CODE);
    }

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let retry = config.retry;
    let scraper = UsccbScraper::new(config).map_err(scraper_failure)?;
    let readings = scraper
        .get_readings_for_date(date)
        .await
        .map_err(scraper_failure)?;

    let (synopses, reflection) = if args.wants_ai() {
        match enrich(args, &readings, retry).await {
            Ok(parts) => parts,
            Err(e) => {
                warn!(error = %e, "LLM enrichment unavailable; writing readings only");
                (Vec::new(), None)
            }
        }
    } else {
        (Vec::new(), None)
    };

    let page = DailyPage {
        readings,
        synopses,
        reflection,
        generated_at: Utc::now().to_rfc3339(),
    };

    json::write_daily_page(&page, &args.json_output_dir)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to write JSON");
            OUTPUT_EXIT_CODE
        })
}

/// Defaults, then the YAML file, then individual flags.
fn build_config(args: &Cli) -> Result<ScraperConfig, ScraperError> {
    let mut config = match &args.config {
        Some(path) => ScraperConfig::load(path)?,
        None => ScraperConfig::default(),
    };

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(user_agent) = &args.user_agent {
        config.user_agent = user_agent.clone();
    }
    if let Some(max_attempts) = args.max_attempts {
        config.retry.max_attempts = max_attempts;
    }
    if let Some(backoff_factor) = args.backoff_factor {
        config.retry.backoff_factor = backoff_factor;
    }

    config.validate()?;
    Ok(config)
}

fn scraper_failure(e: ScraperError) -> u8 {
    match &e {
        ScraperError::Network { url, status_code, .. } => {
            error!(%url, ?status_code, error = %e, "Could not fetch readings")
        }
        ScraperError::Parse { element, .. } => {
            error!(%element, error = %e, "Could not parse readings page; the site layout may have changed")
        }
        ScraperError::Validation { field, value, .. } => {
            error!(%field, %value, error = %e, "Scraped readings failed validation")
        }
        ScraperError::Configuration { .. } => error!(error = %e, "Invalid configuration"),
    }
    e.exit_code()
}

/// Ask the LLM for whichever of synopses and reflection were requested.
async fn enrich(
    args: &Cli,
    readings: &DailyReading,
    retry: RetryPolicy,
) -> Result<(Vec<ReadingSynopsis>, Option<DailyReflection>), Box<dyn Error>> {
    // ---- Load template & config ----
    // awful_aj's error types vary by call, so they are flattened to strings.
    let conf_file = match &args.ai_config {
        Some(path) => PathBuf::from(path),
        None => config_dir().map_err(|e| e.to_string())?.join("config.yaml"),
    };
    let config_path = conf_file.to_str().ok_or("Not a valid config filename")?;
    let ai_config = config::load_config(config_path).map_err(|e| e.to_string())?;
    info!(config_path, "Loaded LLM configuration");

    let synopsis_template = template::load_template("liturgy_synopsis")
        .await
        .map_err(|e| e.to_string())?;
    let reflection_template = template::load_template("liturgy_reflection")
        .await
        .map_err(|e| e.to_string())?;
    info!("Loaded templates: liturgy_synopsis, liturgy_reflection");

    let assistant = LiturgyAssistant::new(
        RetryAsk::new(
            AskFnWrapper {
                config: &ai_config,
                template: &synopsis_template,
            },
            retry,
        ),
        RetryAsk::new(
            AskFnWrapper {
                config: &ai_config,
                template: &reflection_template,
            },
            retry,
        ),
    );

    let synopses = if args.synopses {
        assistant.generate_synopses(readings).await
    } else {
        Vec::new()
    };

    let reflection = if args.reflection {
        match assistant
            .generate_reflection(readings, None, REFLECTION_ATTEMPTS)
            .await
        {
            Ok(reflection) => Some(reflection),
            Err(e) => {
                warn!(error = %e, "Reflection generation failed; continuing without it");
                None
            }
        }
    } else {
        None
    };

    Ok((synopses, reflection))
}
