use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)";
pub const DEFAULT_FAVICON_SERVICE: &str = "http://www.google.com/s2/favicons?domain_url=";

/// Settings shared by every extraction an [`Artext`](crate::Artext) performs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sent with page, image and favicon requests. Social preview crawlers
    /// get served the full article by most publishers.
    pub user_agent: String,
    /// Prefix the page url is appended to in order to build the favicon url.
    pub favicon_service: String,
    pub timeout: Duration,
    pub fallback_timeout: Duration,
    /// Upper bound of bytes read from an image response to determine its size.
    pub probe_max_bytes: u64,
    /// Download the favicon and compute its dominant color.
    pub sample_theme: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.into(),
            favicon_service: DEFAULT_FAVICON_SERVICE.into(),
            timeout: Duration::from_secs(20),
            fallback_timeout: Duration::from_secs(40),
            probe_max_bytes: 512 * 1024,
            sample_theme: true,
        }
    }
}

impl Config {
    pub fn favicon_url(&self, page_url: &url::Url) -> String {
        format!("{}{}", self.favicon_service, page_url.as_str())
    }
}
