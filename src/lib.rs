pub mod core;
pub mod http;
pub mod parser;
pub mod report;
pub mod scrapers;
pub mod stats;
pub mod storage;

pub use crate::core::{FailureKind, Pipeline, ScraperConfig, ScraperError, ScraperResult};
pub use http::{HttpResponse, ResponseType};
pub use parser::{Parser, ProductParser, ProductRecord};
pub use scrapers::Scraper;
pub use stats::StatsTracker;
pub use storage::DiskStorage;
