use crate::core::FailureKind;
use chrono::{DateTime, Duration, Utc};
use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapingStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub bytes_downloaded: usize,
    pub status_codes: HashMap<u16, usize>,
    pub failures: HashMap<String, usize>,
    pub average_response_time: f64, // in milliseconds
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapingStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapingStats {
                start_time: Utc::now(),
                end_time: None,
                total_requests: 0,
                successful_requests: 0,
                failed_requests: 0,
                bytes_downloaded: 0,
                status_codes: HashMap::new(),
                failures: HashMap::new(),
                average_response_time: 0.0,
            })),
        }
    }

    pub fn record_request(&self, status: u16, size: usize, duration: Duration) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;

        if (200..300).contains(&status) {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }

        *stats.status_codes.entry(status).or_insert(0) += 1;
        stats.bytes_downloaded += size;

        let current_total = stats.average_response_time * (stats.total_requests - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_response_time = (current_total + new_duration) / stats.total_requests as f64;
    }

    /// Records a fetch that never produced a response (timeout, refused connection...).
    pub fn record_failure(&self, kind: FailureKind) {
        let mut stats = self.stats.write();
        if kind != FailureKind::HttpStatus {
            stats.total_requests += 1;
            stats.failed_requests += 1;
        }
        *stats.failures.entry(format!("{:?}", kind)).or_insert(0) += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ScrapingStats {
        self.stats.read().clone()
    }

    pub fn log_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        info!(
            "Scraping finished in {} ms: requests={} ok={} failed={} bytes={} avg_response={:.2}ms",
            duration.num_milliseconds(),
            stats.total_requests,
            stats.successful_requests,
            stats.failed_requests,
            stats.bytes_downloaded,
            stats.average_response_time
        );
        for (code, count) in &stats.status_codes {
            info!("  status {}: {}", code, count);
        }
        for (kind, count) in &stats.failures {
            info!("  failure {}: {}", kind, count);
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
