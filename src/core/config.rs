use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://api.zenrows.com/v1/";

/// Settings shared by the fetch backends.
///
/// Defaults mirror what a desktop Chrome sends, so static fetches see the
/// same markup a browser would.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub request_timeout: Duration,
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
    pub settle_delay: Duration,
    /// Element the rendered fetch waits for before reading the DOM.
    pub ready_selector: String,
    pub viewport: (u32, u32),
    pub locale: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: vec![
                (
                    "Accept".to_string(),
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8".to_string(),
                ),
                ("Accept-Language".to_string(), "en-US,en;q=0.9".to_string()),
                ("Accept-Encoding".to_string(), "gzip, deflate, br".to_string()),
                ("Connection".to_string(), "keep-alive".to_string()),
                ("Upgrade-Insecure-Requests".to_string(), "1".to_string()),
            ],
            request_timeout: Duration::from_secs(30),
            navigation_timeout: Duration::from_secs(60),
            selector_timeout: Duration::from_secs(30),
            settle_delay: Duration::from_secs(2),
            ready_selector: "#productTitle".to_string(),
            viewport: (1920, 1080),
            locale: "en-US".to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Adds headers, replacing any existing header of the same name.
    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Self {
        for (key, value) in headers {
            self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
            self.headers.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn with_selector_timeout(mut self, timeout: Duration) -> Self {
        self.selector_timeout = timeout;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

/// Query parameters for the remote scraping API.
#[derive(Debug, Clone)]
pub struct RemoteApiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub js_render: bool,
    pub premium_proxy: bool,
    pub autoparse: bool,
}

impl RemoteApiConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            endpoint: DEFAULT_REMOTE_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
            js_render: true,
            premium_proxy: true,
            autoparse: true,
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_js_render(mut self, enabled: bool) -> Self {
        self.js_render = enabled;
        self
    }

    pub fn with_premium_proxy(mut self, enabled: bool) -> Self {
        self.premium_proxy = enabled;
        self
    }

    pub fn with_autoparse(mut self, enabled: bool) -> Self {
        self.autoparse = enabled;
        self
    }

    /// The query string pairs, in the order the API documents them.
    pub fn query_params(&self, target: &str) -> Vec<(&'static str, String)> {
        vec![
            ("url", target.to_string()),
            ("apikey", self.api_key.clone()),
            ("js_render", self.js_render.to_string()),
            ("premium_proxy", self.premium_proxy.to_string()),
            ("autoparse", self.autoparse.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_headers_replaces_case_insensitively() {
        let config = ScraperConfig::default().with_headers(vec![("accept-language", "de-DE")]);
        let langs: Vec<_> = config
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("accept-language"))
            .collect();
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].1, "de-DE");
    }

    #[test]
    fn test_remote_params_are_boolean_strings() {
        let config = RemoteApiConfig::new("KEY").with_premium_proxy(false);
        let params = config.query_params("https://www.amazon.com/dp/B0FB21526X");
        assert_eq!(
            params,
            vec![
                ("url", "https://www.amazon.com/dp/B0FB21526X".to_string()),
                ("apikey", "KEY".to_string()),
                ("js_render", "true".to_string()),
                ("premium_proxy", "false".to_string()),
                ("autoparse", "true".to_string()),
            ]
        );
    }
}
