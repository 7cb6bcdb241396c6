use chrono::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Html,
    Json,
    Text,
    Binary,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub decoded_body: String,
    pub timestamp: DateTime<Utc>,
    pub meta: Option<Value>,
    pub response_type: ResponseType,
}

impl HttpResponse {
    pub fn new(url: Url, status: u16, decoded_body: String) -> Self {
        let headers = HashMap::new();
        let response_type = ResponseType::detect(&headers, &decoded_body);
        Self {
            url,
            status,
            headers,
            decoded_body,
            timestamp: Utc::now(),
            meta: None,
            response_type,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl ResponseType {
    pub fn detect(headers: &HashMap<String, String>, body: &str) -> Self {
        if let Some(content_type) = headers.get("content-type") {
            if content_type.contains("text/html") {
                ResponseType::Html
            } else if content_type.contains("application/json") {
                ResponseType::Json
            } else if content_type.contains("text/") {
                ResponseType::Text
            } else {
                ResponseType::Binary
            }
        } else {
            // No header, sniff the body
            let start = body.trim_start();
            if start.starts_with('{') || start.starts_with('[') {
                ResponseType::Json
            } else if start.starts_with("<!DOCTYPE")
                || start.starts_with("<!doctype")
                || start.starts_with("<html")
            {
                ResponseType::Html
            } else {
                ResponseType::Text
            }
        }
    }
}
