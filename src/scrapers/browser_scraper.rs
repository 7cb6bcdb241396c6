use async_trait::async_trait;
use log::{debug, info, warn};
use playwright::api::Viewport;
use playwright::Playwright;
use std::fmt::Display;
use std::sync::Arc;
use url::Url;

use super::Scraper;
use crate::core::ScraperConfig;
use crate::http::ResponseType;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};

const LAUNCH_ARGS: [&str; 2] = ["--disable-blink-features=AutomationControlled", "--no-sandbox"];

/// Renders the page in headless Chromium and returns the live DOM.
///
/// Every fetch launches its own browser and closes it before returning,
/// whether rendering succeeded or not. Playwright's handles are not `Send`,
/// so the session runs on a blocking thread with its own single-threaded
/// runtime.
#[derive(Clone)]
pub struct BrowserScraper {
    config: ScraperConfig,
    stats: Arc<StatsTracker>,
}

impl BrowserScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            stats: Arc::new(StatsTracker::new()),
        }
    }
}

#[async_trait]
impl Scraper for BrowserScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<HttpResponse> {
        let config = self.config.clone();
        let target = url.clone();

        let html = tokio::task::spawn_blocking(move || -> ScraperResult<String> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(render(&target, &config))
        })
        .await
        .map_err(|e| ScraperError::Browser(format!("render task failed: {}", e)))??;

        let mut response = HttpResponse::new(url.clone(), 200, html);
        response.response_type = ResponseType::Html;
        Ok(response)
    }

    fn name(&self) -> &'static str {
        "rendered"
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}

async fn render(url: &Url, config: &ScraperConfig) -> ScraperResult<String> {
    let playwright = Playwright::initialize().await.map_err(browser_error)?;
    let args: Vec<String> = LAUNCH_ARGS.iter().map(|a| a.to_string()).collect();

    let browser = playwright
        .chromium()
        .launcher()
        .headless(true)
        .args(&args)
        .launch()
        .await
        .map_err(browser_error)?;
    debug!("Launched headless chromium for {}", url);

    let result = async {
        let context = browser
            .context_builder()
            .user_agent(&config.user_agent)
            .viewport(Some(Viewport {
                width: config.viewport.0 as i32,
                height: config.viewport.1 as i32,
            }))
            .locale(&config.locale)
            .build()
            .await
            .map_err(browser_error)?;
        let page = context.new_page().await.map_err(browser_error)?;

        info!("navigating to: {}", url);
        page.goto_builder(url.as_str())
            .timeout(config.navigation_timeout.as_millis() as f64)
            .goto()
            .await
            .map_err(browser_error)?;

        page.wait_for_selector_builder(&config.ready_selector)
            .timeout(config.selector_timeout.as_millis() as f64)
            .wait_for_selector()
            .await
            .map_err(browser_error)?;

        // late widgets (price block, image strip) render after the title
        tokio::time::sleep(config.settle_delay).await;

        page.content().await.map_err(browser_error)
    }
    .await;

    if let Err(e) = browser.close().await {
        warn!("Failed to close browser: {}", e);
    }

    result
}

fn browser_error<E: Display>(err: E) -> ScraperError {
    let message = err.to_string();
    if message.to_lowercase().contains("timeout") {
        ScraperError::Timeout(message)
    } else {
        ScraperError::Browser(message)
    }
}
