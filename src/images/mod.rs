mod error;
mod probe;


pub use self::error::ImageProbeError;
pub use self::probe::{HttpImageProbe, ImageInfo, ImageKind, ImageProbe, StaticProbe};

use crate::constants;
use crate::util::Util;
use libxml::tree::Node;
use url::Url;

/// Decides which images are worth keeping.
pub struct ImageSelector<'a> {
    probe: &'a dyn ImageProbe,
    base_url: Option<&'a Url>,
}

impl<'a> ImageSelector<'a> {
    pub fn new(probe: &'a dyn ImageProbe) -> Self {
        Self {
            probe,
            base_url: None,
        }
    }

    /// Relative image urls get completed with `base_url` before they are probed.
    pub fn with_base_url(mut self, base_url: &'a Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Url of the image `node` shows, if it is big enough to be content.
    ///
    /// Images whose size can't be determined are rejected.
    pub fn validate(&self, node: &Node) -> Option<String> {
        let source = Self::image_source(node)?;
        let source = self.normalize(&source);

        match self.probe.probe(&Self::escape(&source)) {
            Ok(info)
                if info.width > constants::MIN_IMAGE_DIMENSION
                    || info.height > constants::MIN_IMAGE_DIMENSION =>
            {
                Some(source)
            }
            Ok(info) => {
                log::debug!(
                    "Image '{}' too small: {}x{}",
                    source,
                    info.width,
                    info.height
                );
                None
            }
            Err(error) => {
                log::debug!("Probing image '{}' failed: {}", source, error);
                None
            }
        }
    }

    /// Pick the most representative image out of several candidates.
    pub fn pick_best(&self, urls: &[String]) -> Option<String> {
        match urls {
            [] => return None,
            [single] => return Some(single.clone()),
            _ => {}
        }

        let refined = urls
            .iter()
            .filter(|url| !constants::LOGO_OR_FALLBACK.is_match(url))
            .collect::<Vec<_>>();
        if let [single] = refined.as_slice() {
            return Some((*single).clone());
        }
        let candidates = if refined.is_empty() {
            urls.iter().collect::<Vec<_>>()
        } else {
            refined
        };

        let mut widest: Option<(&String, u32)> = None;
        for url in candidates {
            let info = match self.probe.probe(&Self::escape(url)) {
                Ok(info) => info,
                Err(error) => {
                    log::debug!("Probing image '{}' failed: {}", url, error);
                    continue;
                }
            };

            // big animations beat any still image
            if info.kind == ImageKind::Gif
                && info.width > constants::MIN_GIF_WIDTH
                && info.height > constants::MIN_GIF_HEIGHT
            {
                return Some(url.clone());
            }

            if widest.map(|(_, width)| info.width > width).unwrap_or(true) {
                widest = Some((url, info.width));
            }
        }

        widest.map(|(url, _)| url.clone())
    }

    fn image_source(node: &Node) -> Option<String> {
        constants::IMAGE_SOURCE_ATTRIBUTES
            .iter()
            .find_map(|attribute| {
                let value = Util::non_blank_attribute(node, attribute)?;
                if *attribute == "srcset" {
                    value
                        .split(',')
                        .next()
                        .and_then(|candidate| candidate.split_whitespace().next())
                        .map(str::to_owned)
                } else {
                    Some(value.trim().to_owned())
                }
            })
    }

    fn normalize(&self, source: &str) -> String {
        let source = if source.starts_with("//") {
            format!("http:{source}")
        } else {
            source.to_owned()
        };

        let is_relative_url = Url::parse(&source)
            .err()
            .map(|err| err == url::ParseError::RelativeUrlWithoutBase)
            .unwrap_or(false);

        match self.base_url {
            Some(base_url) if is_relative_url => base_url
                .join(&source)
                .map(|url| url.as_str().to_owned())
                .unwrap_or(source),
            _ => source,
        }
    }

    /// Percent-escape a url the way the probe expects it. Values that aren't
    /// absolute urls are handed over untouched.
    fn escape(url: &str) -> String {
        Url::parse(url)
            .map(|url| url.as_str().to_owned())
            .unwrap_or_else(|_| url.to_owned())
    }
}
