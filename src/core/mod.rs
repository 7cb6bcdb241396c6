mod config;
mod errors;
mod pipeline;

pub use config::{RemoteApiConfig, ScraperConfig, DEFAULT_REMOTE_ENDPOINT, DEFAULT_USER_AGENT};
pub use errors::{FailureKind, ScraperError, ScraperResult};
pub use pipeline::Pipeline;
