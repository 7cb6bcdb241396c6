//! CSS selector table for Amazon product pages.
//!
//! `SelectorConfig` is the plain-string form, loadable from JSON so a changed
//! page layout can be handled without a rebuild. `ProductSelectors` is the
//! compiled form the extractor runs against; compiling fails on the first
//! invalid selector and names the field it belongs to.

use crate::{ScraperError, ScraperResult};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub title: String,
    pub price: String,
    pub avg_rating: String,
    pub review_count: String,
    pub availability: String,
    pub description: String,
    pub features: String,
    pub main_image: String,
    pub thumbnails: String,
    pub category: String,
    pub ships_from: String,
    pub sold_by: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: "#productTitle".to_string(),
            price: "span.a-price span.a-offscreen".to_string(),
            avg_rating: "span.a-icon-alt".to_string(),
            review_count: "#acrCustomerReviewText".to_string(),
            availability: "#availability span".to_string(),
            description: "#productDescription p".to_string(),
            features: "#feature-bullets ul li span.a-list-item".to_string(),
            main_image: "#imgTagWrapperId img".to_string(),
            thumbnails: "#altImages img.a-dynamic-image".to_string(),
            category: "#wayfinding-breadcrumbs_feature_div ul li a".to_string(),
            ships_from: "#tabular-buybox-truncate-0 span.tabular-buybox-text".to_string(),
            sold_by: "#tabular-buybox-truncate-1 span.tabular-buybox-text".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Parses a JSON object; keys left out keep their default selector.
    pub fn from_json(json: &str) -> ScraperResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ScraperResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[derive(Debug, Clone)]
pub struct ProductSelectors {
    pub title: Selector,
    pub price: Selector,
    pub avg_rating: Selector,
    pub review_count: Selector,
    pub availability: Selector,
    pub description: Selector,
    pub features: Selector,
    pub main_image: Selector,
    pub thumbnails: Selector,
    pub category: Selector,
    pub ships_from: Selector,
    pub sold_by: Selector,
}

impl ProductSelectors {
    pub fn compile(config: &SelectorConfig) -> ScraperResult<Self> {
        Ok(Self {
            title: compile("title", &config.title)?,
            price: compile("price", &config.price)?,
            avg_rating: compile("avg_rating", &config.avg_rating)?,
            review_count: compile("review_count", &config.review_count)?,
            availability: compile("availability", &config.availability)?,
            description: compile("description", &config.description)?,
            features: compile("features", &config.features)?,
            main_image: compile("main_image", &config.main_image)?,
            thumbnails: compile("thumbnails", &config.thumbnails)?,
            category: compile("category", &config.category)?,
            ships_from: compile("ships_from", &config.ships_from)?,
            sold_by: compile("sold_by", &config.sold_by)?,
        })
    }
}

fn compile(field: &'static str, css: &str) -> ScraperResult<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Selector {
        field,
        message: format!("{:?}", e),
    })
}
