use crate::core::FailureKind;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::sleep;
use url::Url;

use super::Scraper;

#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<std::time::Duration>,
    /// Fail instead of answering.
    pub failure: Option<FailureKind>,
}

impl MockResponse {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: None,
            failure: None,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            ..Self::ok(body)
        }
    }

    pub fn failing(kind: FailureKind) -> Self {
        Self {
            failure: Some(kind),
            ..Self::ok("")
        }
    }
}

/// Serves canned responses in order, wrapping around.
#[derive(Clone)]
pub struct MockScraper {
    responses: Arc<Vec<MockResponse>>,
    current_response: Arc<AtomicUsize>,
    stats: Arc<StatsTracker>,
}

impl MockScraper {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            current_response: Arc::new(AtomicUsize::new(0)),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.current_response.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<HttpResponse> {
        if self.responses.is_empty() {
            return Err(ScraperError::InvalidResponse(
                "mock scraper has no responses configured".to_string(),
            ));
        }
        let index = self.current_response.fetch_add(1, Ordering::SeqCst);
        let response = &self.responses[index % self.responses.len()];

        if let Some(delay) = response.delay {
            sleep(delay).await;
        }

        match response.failure {
            Some(FailureKind::Timeout) => Err(ScraperError::Timeout("mock timeout".to_string())),
            Some(FailureKind::Connection) => {
                Err(ScraperError::Connection("mock connection refused".to_string()))
            }
            Some(FailureKind::HttpStatus) => Err(ScraperError::HttpStatus {
                status: response.status,
                url: url.to_string(),
            }),
            Some(FailureKind::Other) => Err(ScraperError::Browser("mock failure".to_string())),
            None => Ok(HttpResponse::new(
                url.clone(),
                response.status,
                response.body.clone(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
