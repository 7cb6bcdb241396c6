//! Writes results to an output stream as pretty-printed JSON.

use crate::ScraperResult;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

pub fn write_record<W: Write, T: Serialize>(out: &mut W, record: &T) -> ScraperResult<()> {
    serde_json::to_writer_pretty(&mut *out, record)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Pretty-prints a body that should be JSON; anything else is written as is.
pub fn write_body<W: Write>(out: &mut W, body: &str) -> ScraperResult<()> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => write_record(out, &value),
        Err(_) => {
            writeln!(out, "{}", body)?;
            out.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ProductRecord;

    #[test]
    fn test_record_layout() {
        let mut record = ProductRecord::empty("https://www.amazon.com/dp/B0FB21526X");
        record.title = Some("Mouse".to_string());
        record.features = vec!["Quiet clicks".to_string()];

        let mut out = Vec::new();
        write_record(&mut out, &record).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("{\n  \"title\": \"Mouse\",\n  \"price\": null,"));
        assert!(text.contains("\"out_of_stock\": false"));
        assert!(text.contains("\"features\": [\n    \"Quiet clicks\"\n  ]"));
        assert!(text.ends_with("\"url\": \"https://www.amazon.com/dp/B0FB21526X\"\n}\n"));
    }

    #[test]
    fn test_field_order() {
        let record = ProductRecord::empty("u");
        let mut out = Vec::new();
        write_record(&mut out, &record).unwrap();
        let text = String::from_utf8(out).unwrap();

        let order = [
            "title", "price", "avg_rating", "review_count", "availability", "out_of_stock",
            "description", "features", "images", "category", "ships_from", "sold_by", "url",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|k| text.find(&format!("\"{}\"", k)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_body_passthrough() {
        let mut out = Vec::new();
        write_body(&mut out, "{\"title\":\"Mouse\"}").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"title\": \"Mouse\"\n}\n");

        let mut out = Vec::new();
        write_body(&mut out, "<html></html>").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<html></html>\n");
    }
}
