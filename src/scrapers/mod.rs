pub mod http_scraper;
pub mod mock_scraper;
pub mod remote_api;

#[cfg(feature = "browser")]
pub mod browser_scraper;

mod scraper;
pub use scraper::Scraper;
pub use http_scraper::HttpScraper;
pub use mock_scraper::{MockResponse, MockScraper};
pub use remote_api::RemoteApiScraper;

#[cfg(feature = "browser")]
pub use browser_scraper::BrowserScraper;
