pub mod error;

use self::error::FetchError;
use crate::config::Config;
use crate::constants;
use encoding_rs::Encoding;
use log::{debug, error, warn};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

/// A downloaded page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where the request ended up after redirects.
    pub url: Url,
    pub content_type: Option<String>,
    /// Empty for image responses.
    pub html: String,
}

impl FetchedPage {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|content_type| content_type.trim().to_lowercase().starts_with("image/"))
            .unwrap_or(false)
    }
}

pub struct Fetcher {
    client: Client,
    fallback: Client,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                error!("Building the http client failed - '{}'", err);
                FetchError::Client
            })?;

        // second chance for servers that choke on pooled or http2 connections
        let fallback = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.fallback_timeout)
            .http1_only()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|err| {
                error!("Building the fallback http client failed - '{}'", err);
                FetchError::Client
            })?;

        Ok(Self { client, fallback })
    }

    /// The primary client, for requests beyond the page itself.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Download `url`. A failed attempt is repeated once with the fallback
    /// client; its error is the one reported when that fails too.
    pub fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        match Self::attempt(&self.client, url, |status| status == StatusCode::OK) {
            Ok(page) => Ok(page),
            Err(err) => {
                warn!("GET '{}' failed ({}) - trying once more", url.as_str(), err);
                Self::attempt(&self.fallback, url, |status| status.is_success()).map_err(|err| {
                    error!("Downloading HTML failed: GET '{}' - '{}'", url.as_str(), err);
                    err
                })
            }
        }
    }

    fn attempt(
        client: &Client,
        url: &Url,
        accept: impl Fn(StatusCode) -> bool,
    ) -> Result<FetchedPage, FetchError> {
        let response = client.get(url.clone()).send().map_err(|err| {
            debug!("GET '{}' failed - '{}'", url.as_str(), err);
            FetchError::Http
        })?;

        let status = response.status();
        if !accept(status) {
            debug!("GET '{}': response {}", url.as_str(), status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|header| header.to_str().ok())
            .map(str::to_owned);

        let mut page = FetchedPage {
            url: final_url,
            content_type,
            html: String::new(),
        };
        if page.is_image() {
            return Ok(page);
        }

        let bytes = response.bytes().map_err(|err| {
            debug!("Reading the body of '{}' failed - '{}'", url.as_str(), err);
            FetchError::Http
        })?;
        page.html = Self::decode(&bytes, page.content_type.as_deref())?;
        Ok(page)
    }

    /// Bytes to text: UTF-8 when valid, else the charset the page or the
    /// `Content-Type` header announce.
    pub(crate) fn decode(bytes: &[u8], content_type: Option<&str>) -> Result<String, FetchError> {
        let utf8_error = match std::str::from_utf8(bytes) {
            Ok(html) => return Ok(html.to_owned()),
            Err(err) => err,
        };

        let lossy = String::from_utf8_lossy(bytes);
        let labels = [
            Self::get_encoding_from_html(&lossy),
            content_type.and_then(Self::get_encoding_from_http_header),
        ];

        for label in labels.into_iter().flatten() {
            if let Some(decoded_html) = Self::decode_html(bytes, label) {
                return Ok(decoded_html);
            }
        }

        warn!("No usable encoding of HTML detected");
        Err(FetchError::Utf8(utf8_error))
    }

    fn get_encoding_from_http_header(content_type: &str) -> Option<&str> {
        constants::CHARSET_HEADER
            .captures(content_type)
            .and_then(|captures| captures.get(1))
            .map(|regex_match| regex_match.as_str().trim())
    }

    fn get_encoding_from_html(html: &str) -> Option<&str> {
        constants::CHARSET_HTML
            .captures(html)
            .and_then(|captures| captures.get(1))
            .map(|regex_match| regex_match.as_str().trim())
    }

    fn decode_html(bytes: &[u8], encoding: &str) -> Option<String> {
        if let Some(encoding) = Encoding::for_label(encoding.as_bytes()) {
            let (decoded_html, _, invalid_chars) = encoding.decode(bytes);

            if !invalid_chars {
                return Some(decoded_html.into_owned());
            }
        }
        warn!("Could not decode HTML. Encoding: '{}'", encoding);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchedPage, Fetcher};
    use crate::config::Config;
    use crate::fetch::error::FetchError;
    use url::Url;

    #[test]
    fn utf8_passes_through() {
        let html = "<html><body>Grüße</body></html>";
        assert_eq!(Fetcher::decode(html.as_bytes(), None).unwrap(), html);
    }

    #[test]
    fn charset_from_meta() {
        let bytes = b"<html><head><meta charset=\"iso-8859-1\"></head><body>caf\xe9</body></html>";
        let html = Fetcher::decode(bytes, Some("text/html")).unwrap();
        assert!(html.contains("caf\u{e9}"));
    }

    #[test]
    fn unquoted_meta_charset() {
        let bytes = b"<html><head><meta charset=iso-8859-1><link rel=\"icon\" href=\"/i.png\"></head><body>caf\xe9</body></html>";
        let html = Fetcher::decode(bytes, None).unwrap();
        assert!(html.contains("caf\u{e9}"));
    }

    #[test]
    fn both_attempts_fail() {
        let fetcher = Fetcher::new(&Config::default()).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        assert!(matches!(fetcher.fetch(&url), Err(FetchError::Http)));
    }

    #[test]
    fn charset_from_header() {
        let bytes = b"<html><body>na\xefve</body></html>";
        let html = Fetcher::decode(bytes, Some("text/html; charset=ISO-8859-1")).unwrap();
        assert!(html.contains("na\u{ef}ve"));
    }

    #[test]
    fn unknown_charset() {
        let bytes = b"<html><body>caf\xe9</body></html>";
        assert!(matches!(
            Fetcher::decode(bytes, Some("text/html")),
            Err(FetchError::Utf8(_))
        ));
    }

    #[test]
    fn image_content_type() {
        let page = FetchedPage {
            url: Url::parse("http://pics.test/cat.png").unwrap(),
            content_type: Some("Image/PNG".into()),
            html: String::new(),
        };
        assert!(page.is_image());

        let page = FetchedPage {
            content_type: Some("text/html; charset=utf-8".into()),
            ..page
        };
        assert!(!page.is_image());
    }
}
