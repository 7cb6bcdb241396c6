use super::base::Parser;
use super::product::ProductRecord;
use super::selectors::{ProductSelectors, SelectorConfig};
use crate::ScraperResult;
use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const OUT_OF_STOCK_KEYWORDS: [&str; 3] = ["out of stock", "unavailable", "currently unavailable"];
const LARGE_IMAGE_CODE: &str = "._AC_SL1500_.";
const MIN_FEATURE_CHARS: usize = 5;
const CATEGORY_SEPARATOR: &str = " > ";
const HIRES_ATTR: &str = "data-old-hires";
const SRC_ATTR: &str = "src";

/// Extracts a `ProductRecord` from an Amazon product page.
///
/// Every field is looked up on its own; a missing element, attribute or
/// pattern match leaves that field `None` (or empty) and the rest of the
/// record untouched.
pub struct ProductParser {
    selectors: ProductSelectors,
    rating: Regex,
    review_count: Regex,
    resolution_code: Regex,
}

impl ProductParser {
    pub fn new() -> ScraperResult<Self> {
        Self::with_selectors(&SelectorConfig::default())
    }

    pub fn with_selectors(config: &SelectorConfig) -> ScraperResult<Self> {
        Ok(Self {
            selectors: ProductSelectors::compile(config)?,
            rating: Regex::new(r"(\d+\.?\d*)\s*out of")?,
            review_count: Regex::new(r"([\d,]+)")?,
            resolution_code: Regex::new(r"\._[A-Z]+\d+_\.")?,
        })
    }

    pub fn extract_title(&self, document: &Html) -> Option<String> {
        first_text(document, &self.selectors.title)
    }

    /// Strikethrough and current prices share markup; the first one wins.
    pub fn extract_price(&self, document: &Html) -> Option<String> {
        first_text(document, &self.selectors.price)
    }

    /// "4.5 out of 5 stars" -> "4.5"
    pub fn extract_avg_rating(&self, document: &Html) -> Option<String> {
        let text = first_text(document, &self.selectors.avg_rating)?;
        self.rating
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// "12,847 ratings" -> "12847"
    pub fn extract_review_count(&self, document: &Html) -> Option<String> {
        let text = first_text(document, &self.selectors.review_count)?;
        self.review_count
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().replace(',', ""))
    }

    pub fn extract_availability(&self, document: &Html) -> Option<String> {
        first_text(document, &self.selectors.availability)
    }

    /// Reads the availability element again rather than taking a
    /// previously extracted value.
    pub fn extract_out_of_stock(&self, document: &Html) -> bool {
        match self.extract_availability(document) {
            Some(availability) => {
                let availability = availability.to_lowercase();
                OUT_OF_STOCK_KEYWORDS
                    .iter()
                    .any(|keyword| availability.contains(keyword))
            }
            None => false,
        }
    }

    pub fn extract_description(&self, document: &Html) -> Option<String> {
        first_text(document, &self.selectors.description)
    }

    pub fn extract_features(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.selectors.features)
            .filter_map(element_text)
            .filter(|text| text.chars().count() > MIN_FEATURE_CHARS)
            .collect()
    }

    pub fn extract_images(&self, document: &Html) -> Vec<String> {
        let mut images = Vec::new();

        if let Some(main) = document.select(&self.selectors.main_image).next() {
            let url = main
                .value()
                .attr(HIRES_ATTR)
                .filter(|v| !v.is_empty())
                .or_else(|| main.value().attr(SRC_ATTR));
            if let Some(url) = url.filter(|u| u.starts_with("http")) {
                images.push(url.to_string());
            }
        }

        for thumb in document.select(&self.selectors.thumbnails) {
            let Some(src) = thumb.value().attr(SRC_ATTR) else {
                continue;
            };
            if !src.starts_with("http") {
                continue;
            }
            let large = self
                .resolution_code
                .replace_all(src, LARGE_IMAGE_CODE)
                .into_owned();
            if !images.contains(&large) {
                images.push(large);
            }
        }

        images
    }

    pub fn extract_category(&self, document: &Html) -> Option<String> {
        let segments: Vec<String> = document
            .select(&self.selectors.category)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect();
        // blank segments stay in the path; an all-blank trail counts as missing
        if segments.iter().all(|s| s.is_empty()) {
            None
        } else {
            Some(segments.join(CATEGORY_SEPARATOR))
        }
    }

    pub fn extract_ships_from(&self, document: &Html) -> Option<String> {
        first_text(document, &self.selectors.ships_from)
    }

    pub fn extract_sold_by(&self, document: &Html) -> Option<String> {
        first_text(document, &self.selectors.sold_by)
    }
}

impl Parser for ProductParser {
    type Output = ProductRecord;

    fn parse(&self, document: &Html, url: &str) -> ProductRecord {
        let record = ProductRecord {
            title: self.extract_title(document),
            price: self.extract_price(document),
            avg_rating: self.extract_avg_rating(document),
            review_count: self.extract_review_count(document),
            availability: self.extract_availability(document),
            out_of_stock: self.extract_out_of_stock(document),
            description: self.extract_description(document),
            features: self.extract_features(document),
            images: self.extract_images(document),
            category: self.extract_category(document),
            ships_from: self.extract_ships_from(document),
            sold_by: self.extract_sold_by(document),
            url: url.to_string(),
        };

        let missing = record.missing_fields();
        if !missing.is_empty() {
            debug!("No value found for {} on {}", missing.join(", "), url);
        }
        record
    }
}

fn element_text(element: ElementRef) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().and_then(element_text)
}
