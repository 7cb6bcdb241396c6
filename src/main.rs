use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use amzscraper::core::{RemoteApiConfig, DEFAULT_REMOTE_ENDPOINT};
use amzscraper::parser::SelectorConfig;
use amzscraper::report;
use amzscraper::scrapers::{HttpScraper, RemoteApiScraper};
use amzscraper::storage::{DiskStorage, StorageItem};
use amzscraper::{Pipeline, ProductParser, Scraper, ScraperConfig, ScraperError, ScraperResult};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

const DEFAULT_PRODUCT_URL: &str =
    "https://www.amazon.com/Logitech-Master-Bluetooth-Wireless-Receiver/dp/B0FB21526X";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FetchMode {
    /// Single HTTP GET, parse the returned markup
    Static,
    /// Headless Chromium, parse the rendered DOM (needs the `browser` feature)
    Rendered,
    /// Hosted scraping API
    Remote,
}

impl FetchMode {
    fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Static => "static",
            FetchMode::Rendered => "rendered",
            FetchMode::Remote => "remote",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "amzscraper", version, about = "Scrape an Amazon product page into JSON")]
struct Cli {
    /// Product page URL
    #[arg(default_value = DEFAULT_PRODUCT_URL)]
    url: String,

    #[arg(long, value_enum, default_value_t = FetchMode::Static)]
    mode: FetchMode,

    /// Key for the remote scraping API
    #[arg(long, env = "ZENROWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Remote scraping API endpoint
    #[arg(long, default_value = DEFAULT_REMOTE_ENDPOINT)]
    api_endpoint: String,

    #[arg(long)]
    no_js_render: bool,

    #[arg(long)]
    no_premium_proxy: bool,

    /// Return the API's HTML and run the local extractor on it
    #[arg(long)]
    no_autoparse: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// JSON file overriding the CSS selector table
    #[arg(long)]
    selectors: Option<PathBuf>,

    /// Also save the record under this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .parse_default_env()
        .init();
}

#[cfg(feature = "browser")]
fn rendered_scraper(config: ScraperConfig) -> ScraperResult<Box<dyn Scraper>> {
    Ok(Box::new(amzscraper::scrapers::BrowserScraper::new(config)))
}

#[cfg(not(feature = "browser"))]
fn rendered_scraper(_config: ScraperConfig) -> ScraperResult<Box<dyn Scraper>> {
    Err(ScraperError::Config(
        "rendered mode requires building with the `browser` feature".to_string(),
    ))
}

fn remote_scraper(cli: &Cli) -> ScraperResult<RemoteApiScraper> {
    let api_key = cli.api_key.as_deref().ok_or_else(|| {
        ScraperError::Config("--api-key or ZENROWS_API_KEY is required in remote mode".to_string())
    })?;
    let config = RemoteApiConfig::new(api_key)
        .with_endpoint(&cli.api_endpoint)
        .with_js_render(!cli.no_js_render)
        .with_premium_proxy(!cli.no_premium_proxy)
        .with_autoparse(!cli.no_autoparse);
    RemoteApiScraper::new(config)
}

fn save_output<T: Serialize>(cli: &Cli, data: &T) -> ScraperResult<()> {
    let Some(dir) = &cli.output_dir else {
        return Ok(());
    };
    let storage = DiskStorage::new(dir)?.with_prefix("product_");
    let item = StorageItem::new(Url::parse(&cli.url)?, data)
        .with_metadata(json!({ "mode": cli.mode.as_str() }));
    let path = storage.store(&item)?;
    info!("Saved record to {}", path.display());
    Ok(())
}

async fn run<W: Write>(cli: &Cli, out: &mut W) -> ScraperResult<()> {
    let config =
        ScraperConfig::default().with_request_timeout(Duration::from_secs(cli.timeout));

    let selectors = match &cli.selectors {
        Some(path) => SelectorConfig::from_file(path)?,
        None => SelectorConfig::default(),
    };
    let parser = ProductParser::with_selectors(&selectors)?;

    let scraper: Box<dyn Scraper> = match cli.mode {
        FetchMode::Static => Box::new(HttpScraper::with_config(config)?),
        FetchMode::Rendered => rendered_scraper(config)?,
        FetchMode::Remote => {
            let remote = remote_scraper(cli)?;
            if remote.config().autoparse {
                // the service extracts the record itself
                let response = remote.fetch(&Url::parse(&cli.url)?).await?;
                report::write_body(out, &response.decoded_body)?;
                let parsed = serde_json::from_str::<Value>(&response.decoded_body)
                    .unwrap_or_else(|_| Value::String(response.decoded_body.clone()));
                save_output(cli, &parsed)?;
                remote.stats().finish();
                remote.stats().log_summary();
                return Ok(());
            }
            Box::new(remote)
        }
    };

    let pipeline = Pipeline::new(scraper, parser);
    let record = pipeline.run(&cli.url).await?;
    report::write_record(out, &record)?;
    save_output(cli, &record)?;

    pipeline.stats().finish();
    pipeline.stats().log_summary();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("scraping: {}", cli.url);
    match run(&cli, &mut io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.diagnostic());
            eprintln!("failed to scrape product data");
            ExitCode::FAILURE
        }
    }
}
