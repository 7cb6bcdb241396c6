use super::*;
use scraper::Html;

const PRODUCT_URL: &str =
    "https://www.amazon.com/Logitech-Master-Bluetooth-Wireless-Receiver/dp/B0FB21526X";
const FIXTURE: &str = include_str!("fixtures/product_page.html");

fn parser() -> ProductParser {
    ProductParser::new().unwrap()
}

fn page(body: &str) -> Html {
    Html::parse_document(&format!("<!DOCTYPE html><html><body>{}</body></html>", body))
}

#[test]
fn test_full_product_page() {
    let record = parser().parse_html(FIXTURE, PRODUCT_URL);

    assert_eq!(
        record.title.as_deref(),
        Some("Logitech MX Master 4 Wireless Performance Mouse")
    );
    assert_eq!(record.price.as_deref(), Some("$119.99"));
    assert_eq!(record.avg_rating.as_deref(), Some("4.5"));
    assert_eq!(record.review_count.as_deref(), Some("12847"));
    assert_eq!(record.availability.as_deref(), Some("In Stock"));
    assert!(!record.out_of_stock);
    assert_eq!(
        record.description.as_deref(),
        Some("Meet MX Master 4, the most advanced master series mouse yet.")
    );
    assert_eq!(
        record.features,
        vec![
            "8K DPI optical sensor tracks on any surface, even glass",
            "Quiet clicks with the same tactile feel",
            "Quiet clicks with the same tactile feel",
        ]
    );
    assert_eq!(
        record.images,
        vec![
            "https://m.media-amazon.com/images/I/61main._AC_SL1500_.jpg",
            "https://m.media-amazon.com/images/I/41abc._AC_SL1500_.jpg",
            "https://m.media-amazon.com/images/I/51def._AC_US40_.jpg",
        ]
    );
    assert_eq!(
        record.category.as_deref(),
        Some("Electronics > Computers & Accessories > Mice")
    );
    assert_eq!(record.ships_from.as_deref(), Some("Amazon.com"));
    assert_eq!(record.sold_by.as_deref(), Some("Amazon.com"));
    assert_eq!(record.url, PRODUCT_URL);
}

#[test]
fn test_empty_document_degrades_every_field() {
    let record = parser().parse(&page("<div id=\"nothing\"></div>"), PRODUCT_URL);
    assert_eq!(record, ProductRecord::empty(PRODUCT_URL));
    assert_eq!(record.missing_fields().len(), 11);
}

#[test]
fn test_url_is_echoed_verbatim() {
    let url = "https://www.amazon.com/dp/B0FB21526X?th=1&psc=1";
    let record = parser().parse(&page(""), url);
    assert_eq!(record.url, url);
}

#[test]
fn test_rating_keeps_leading_number() {
    let doc = page(r#"<span class="a-icon-alt">4.5 out of 5 stars</span>"#);
    assert_eq!(parser().extract_avg_rating(&doc).as_deref(), Some("4.5"));

    let doc = page(r#"<span class="a-icon-alt">5 out of 5 stars</span>"#);
    assert_eq!(parser().extract_avg_rating(&doc).as_deref(), Some("5"));
}

#[test]
fn test_rating_without_phrase_is_absent() {
    let doc = page(r#"<span class="a-icon-alt">Previous page</span>"#);
    assert_eq!(parser().extract_avg_rating(&doc), None);
}

#[test]
fn test_review_count_strips_separators() {
    let doc = page(r#"<span id="acrCustomerReviewText">12,847 ratings</span>"#);
    assert_eq!(parser().extract_review_count(&doc).as_deref(), Some("12847"));

    let doc = page(r#"<span id="acrCustomerReviewText">1,234,567 global ratings</span>"#);
    assert_eq!(parser().extract_review_count(&doc).as_deref(), Some("1234567"));
}

#[test]
fn test_review_count_without_digits_is_absent() {
    let doc = page(r#"<span id="acrCustomerReviewText">No ratings yet</span>"#);
    assert_eq!(parser().extract_review_count(&doc), None);
}

#[test]
fn test_out_of_stock_keywords() {
    let p = parser();

    let doc = page(r#"<div id="availability"><span>Currently unavailable.</span></div>"#);
    assert!(p.extract_out_of_stock(&doc));

    let doc = page(r#"<div id="availability"><span>Temporarily OUT OF STOCK.</span></div>"#);
    assert!(p.extract_out_of_stock(&doc));

    let doc = page(r#"<div id="availability"><span>In Stock.</span></div>"#);
    assert!(!p.extract_out_of_stock(&doc));
    assert_eq!(p.extract_availability(&doc).as_deref(), Some("In Stock."));

    assert!(!p.extract_out_of_stock(&page("")));
}

#[test]
fn test_whitespace_only_text_is_absent() {
    let doc = page("<span id=\"productTitle\">  \n\t </span>");
    assert_eq!(parser().extract_title(&doc), None);
}

#[test]
fn test_first_price_wins() {
    let doc = page(
        r#"<span class="a-price"><span class="a-offscreen">$24.99</span></span>
           <span class="a-price"><span class="a-offscreen">$19.99</span></span>"#,
    );
    assert_eq!(parser().extract_price(&doc).as_deref(), Some("$24.99"));
}

#[test]
fn test_main_image_is_not_rewritten() {
    let doc = page(
        r#"<div id="imgTagWrapperId">
             <img data-old-hires="https://m.media-amazon.com/images/I/61x._SX300_.jpg" src="https://example.com/small.jpg">
           </div>"#,
    );
    assert_eq!(
        parser().extract_images(&doc),
        vec!["https://m.media-amazon.com/images/I/61x._SX300_.jpg"]
    );
}

#[test]
fn test_main_image_falls_back_to_src() {
    let doc = page(
        r#"<div id="imgTagWrapperId">
             <img data-old-hires="" src="https://m.media-amazon.com/images/I/61x._SX300_.jpg">
           </div>"#,
    );
    assert_eq!(
        parser().extract_images(&doc),
        vec!["https://m.media-amazon.com/images/I/61x._SX300_.jpg"]
    );
}

#[test]
fn test_relative_main_image_is_dropped() {
    let doc = page(r#"<div id="imgTagWrapperId"><img src="/images/local.jpg"></div>"#);
    assert!(parser().extract_images(&doc).is_empty());
}

#[test]
fn test_thumbnails_rewrite_and_deduplicate() {
    let doc = page(
        r#"<div id="altImages">
             <img class="a-dynamic-image" src="https://m.media-amazon.com/images/I/41q._SS40_.jpg">
             <img class="a-dynamic-image" src="https://m.media-amazon.com/images/I/41q._SR38_.jpg">
             <img class="a-dynamic-image" src="https://m.media-amazon.com/images/I/71z._SS40_.jpg">
           </div>"#,
    );
    assert_eq!(
        parser().extract_images(&doc),
        vec![
            "https://m.media-amazon.com/images/I/41q._AC_SL1500_.jpg",
            "https://m.media-amazon.com/images/I/71z._AC_SL1500_.jpg",
        ]
    );
}

#[test]
fn test_thumbnail_matching_main_image_is_skipped() {
    let doc = page(
        r#"<div id="imgTagWrapperId"><img data-old-hires="https://m.media-amazon.com/images/I/41q._AC_SL1500_.jpg"></div>
           <div id="altImages"><img class="a-dynamic-image" src="https://m.media-amazon.com/images/I/41q._SS40_.jpg"></div>"#,
    );
    assert_eq!(
        parser().extract_images(&doc),
        vec!["https://m.media-amazon.com/images/I/41q._AC_SL1500_.jpg"]
    );
}

#[test]
fn test_category_breadcrumbs() {
    let doc = page(
        r#"<div id="wayfinding-breadcrumbs_feature_div"><ul>
             <li><a> Electronics </a></li>
             <li><a>Computers</a></li>
             <li><a>Mice</a></li>
           </ul></div>"#,
    );
    assert_eq!(
        parser().extract_category(&doc).as_deref(),
        Some("Electronics > Computers > Mice")
    );
}

#[test]
fn test_category_keeps_blank_middle_segment() {
    let doc = page(
        r#"<div id="wayfinding-breadcrumbs_feature_div"><ul>
             <li><a>Electronics</a></li>
             <li><a>  </a></li>
             <li><a>Mice</a></li>
           </ul></div>"#,
    );
    assert_eq!(
        parser().extract_category(&doc).as_deref(),
        Some("Electronics >  > Mice")
    );
}

#[test]
fn test_category_all_blank_is_absent() {
    let doc = page(
        r#"<div id="wayfinding-breadcrumbs_feature_div"><ul>
             <li><a>  </a></li>
             <li><a></a></li>
           </ul></div>"#,
    );
    assert_eq!(parser().extract_category(&doc), None);
}

#[test]
fn test_feature_length_filter() {
    let doc = page(
        r#"<div id="feature-bullets"><ul>
             <li><span class="a-list-item"></span></li>
             <li><span class="a-list-item">OK</span></li>
             <li><span class="a-list-item">8K DPI optical sensor</span></li>
           </ul></div>"#,
    );
    assert_eq!(
        parser().extract_features(&doc),
        vec!["8K DPI optical sensor"]
    );
}

#[test]
fn test_feature_length_counts_characters() {
    // five characters, ten bytes: still too short
    let doc = page(
        r#"<div id="feature-bullets"><ul>
             <li><span class="a-list-item">ééééé</span></li>
             <li><span class="a-list-item">éééééé</span></li>
           </ul></div>"#,
    );
    assert_eq!(parser().extract_features(&doc), vec!["éééééé"]);
}

#[test]
fn test_custom_selectors() {
    let config = SelectorConfig {
        title: "h1.name".to_string(),
        ..SelectorConfig::default()
    };
    let parser = ProductParser::with_selectors(&config).unwrap();
    let doc = page(r#"<h1 class="name">Renamed Title</h1><span id="productTitle">Old</span>"#);
    assert_eq!(parser.extract_title(&doc).as_deref(), Some("Renamed Title"));
}

#[test]
fn test_extraction_is_idempotent() {
    let p = parser();
    let doc = Html::parse_document(FIXTURE);
    assert_eq!(p.parse(&doc, PRODUCT_URL), p.parse(&doc, PRODUCT_URL));
}

#[test]
fn test_record_serializes_absent_fields_as_null() {
    let record = ProductRecord::empty(PRODUCT_URL);
    let value = serde_json::to_value(&record).unwrap();
    assert!(value["title"].is_null());
    assert_eq!(value["out_of_stock"], false);
    assert_eq!(value["features"], serde_json::json!([]));
    assert_eq!(value["url"], PRODUCT_URL);
}
