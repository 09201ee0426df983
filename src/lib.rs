//! Pulls the readable article out of a web page: sanitized body html, plain
//! text, representative images and a confidence score, together with the
//! metadata a link preview needs (title, tags, og:type, lead image, favicon
//! and theme color).

mod article;
pub mod config;
mod constants;
mod error;
pub mod extractor;
pub mod fetch;
pub mod images;
pub mod metadata;
pub mod theme;
mod util;

#[cfg(test)]
mod tests;

pub use article::{Article, Clip};
pub use config::Config;
pub use error::ArtextError;
pub use extractor::ArticleExtractor;
pub use images::{HttpImageProbe, ImageInfo, ImageKind, ImageProbe, ImageSelector, StaticProbe};

use fetch::Fetcher;
use libxml::parser::Parser;
use libxml::tree::Document;
use libxml::xpath::Context;
use url::Url;

pub struct Artext {
    config: Config,
    fetcher: Fetcher,
    probe: Box<dyn ImageProbe>,
}

impl Artext {
    pub fn new(config: Config) -> Result<Self, ArtextError> {
        let fetcher = Fetcher::new(&config)?;
        let probe = HttpImageProbe::new(fetcher.client().clone(), config.probe_max_bytes);

        Ok(Self {
            config,
            fetcher,
            probe: Box::new(probe),
        })
    }

    /// Look up image dimensions with `probe` instead of downloading them.
    pub fn with_probe(config: Config, probe: Box<dyn ImageProbe>) -> Result<Self, ArtextError> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self {
            config,
            fetcher,
            probe,
        })
    }

    /// Prefix `http://` when there is no scheme and reject everything that
    /// doesn't look like a web address.
    pub fn normalize_url(url: &str) -> Result<Url, ArtextError> {
        let url = url.trim();
        let url = if constants::HAS_SCHEME.is_match(url) {
            url.to_owned()
        } else {
            format!("http://{url}")
        };

        if !constants::VALID_URL.is_match(&url) {
            log::warn!("Refusing to extract from '{}'", url);
            return Err(ArtextError::InvalidUrl(url));
        }

        Ok(Url::parse(&url)?)
    }

    pub fn extract(&self, url: &str) -> Result<Clip, ArtextError> {
        let url = Self::normalize_url(url)?;
        log::info!("Extracting article: '{}'", url.as_str());

        let page = self.fetcher.fetch(&url)?;
        if page.url != url {
            log::debug!("Url '{}' redirects to '{}'", url.as_str(), page.url.as_str());
        }

        let mut clip = if page.is_image() {
            log::info!("'{}' is an image", page.url.as_str());
            self.image_clip(&page.url)
        } else {
            self.extract_html(&page.html, &page.url)?
        };
        clip.url = url.as_str().to_owned();

        Ok(clip)
    }

    /// Extract from html that is already at hand. `url` is where it was
    /// served from.
    pub fn extract_html(&self, html: &str, url: &Url) -> Result<Clip, ArtextError> {
        let document = match Self::parse_html(html) {
            Some(document) => document,
            None => {
                log::info!("No html document at '{}', treating it as image", url.as_str());
                return Ok(self.image_clip(url));
            }
        };

        let xpath_ctx = Context::new(&document).map_err(|()| {
            log::error!("Creating xpath context failed for downloaded HTML");
            ArtextError::Xml
        })?;
        let metadata = metadata::extract(&xpath_ctx, url);

        let selector = ImageSelector::new(self.probe.as_ref()).with_base_url(url);
        let article = ArticleExtractor::new(&selector).extract(&document, metadata.kind.as_deref())?;

        let mut clip = Clip::new(url, article);
        if clip.kind.is_none() {
            clip.kind = metadata.kind;
        }
        clip.title = metadata.title;
        clip.tags = metadata.tags;
        clip.image = selector.pick_best(&metadata.images);
        self.decorate(&mut clip, url);

        Ok(clip)
    }

    fn parse_html(html: &str) -> Option<Document> {
        if html.trim().is_empty() {
            return None;
        }

        let document = Parser::default_html()
            .parse_string(html)
            .map_err(|err| {
                log::warn!("Parsing html failed: {:?}", err);
            })
            .ok()?;
        document.get_root_element()?;
        Some(document)
    }

    fn image_clip(&self, url: &Url) -> Clip {
        let mut clip = Clip::new(url, Article::image(url));
        self.decorate(&mut clip, url);
        clip
    }

    fn decorate(&self, clip: &mut Clip, url: &Url) {
        let favicon = self.config.favicon_url(url);

        if self.config.sample_theme {
            clip.theme = theme::dominant_color(self.fetcher.client(), &favicon)
                .map_err(|err| {
                    log::warn!("No theme color from '{}': {}", favicon, err);
                })
                .ok();
        }
        clip.favicon = Some(favicon);
    }
}
