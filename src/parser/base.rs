use scraper::Html;

/// Turns a parsed document into a typed record.
///
/// Implementations are pure: no I/O, no interior state, so the same
/// document always yields the same output.
pub trait Parser: Send + Sync {
    type Output;

    fn parse(&self, document: &Html, url: &str) -> Self::Output;

    fn parse_html(&self, html: &str, url: &str) -> Self::Output {
        let document = Html::parse_document(html);
        self.parse(&document, url)
    }
}
