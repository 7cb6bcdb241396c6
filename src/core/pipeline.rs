use crate::http::ResponseType;
use crate::parser::Parser;
use crate::scrapers::Scraper;
use crate::stats::StatsTracker;
use crate::ScraperResult;
use log::{info, warn};
use std::sync::Arc;
use url::Url;

/// URL -> fetch -> parse, for a single page.
///
/// A fetch failure ends the run before parsing; parsing itself cannot fail.
pub struct Pipeline<P: Parser> {
    scraper: Box<dyn Scraper>,
    parser: P,
    stats: Arc<StatsTracker>,
}

impl<P: Parser> Pipeline<P> {
    pub fn new(scraper: Box<dyn Scraper>, parser: P) -> Self {
        info!("Initializing pipeline with {} backend", scraper.name());
        let stats = Arc::new(StatsTracker::new());
        let mut scraper = scraper;
        scraper.set_stats(Arc::clone(&stats));

        Self {
            scraper,
            parser,
            stats,
        }
    }

    /// `url` is copied into the output as given, not as re-serialized by `Url`.
    pub async fn run(&self, url: &str) -> ScraperResult<P::Output> {
        let target = Url::parse(url)?;
        let response = self.scraper.fetch(&target).await?;

        if response.response_type != ResponseType::Html {
            warn!(
                "Expected HTML from {}, got {:?}; parsing anyway",
                url, response.response_type
            );
        }

        let output = self.parser.parse_html(&response.decoded_body, url);
        info!("Extracted record for {}", url);
        Ok(output)
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}
