use serde::{Deserialize, Serialize};

/// Normalized data for one product page.
///
/// Optional fields are `None` when the page lacks them; they are never an
/// empty string. `features` and `images` are always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: Option<String>,
    pub price: Option<String>,
    pub avg_rating: Option<String>,
    pub review_count: Option<String>,
    pub availability: Option<String>,
    pub out_of_stock: bool,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub category: Option<String>,
    pub ships_from: Option<String>,
    pub sold_by: Option<String>,
    pub url: String,
}

impl ProductRecord {
    pub fn empty(url: &str) -> Self {
        Self {
            title: None,
            price: None,
            avg_rating: None,
            review_count: None,
            availability: None,
            out_of_stock: false,
            description: None,
            features: Vec::new(),
            images: Vec::new(),
            category: None,
            ships_from: None,
            sold_by: None,
            url: url.to_string(),
        }
    }

    /// Names of the optional fields that came back absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_none()),
            ("price", self.price.is_none()),
            ("avg_rating", self.avg_rating.is_none()),
            ("review_count", self.review_count.is_none()),
            ("availability", self.availability.is_none()),
            ("description", self.description.is_none()),
            ("features", self.features.is_empty()),
            ("images", self.images.is_empty()),
            ("category", self.category.is_none()),
            ("ships_from", self.ships_from.is_none()),
            ("sold_by", self.sold_by.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}
