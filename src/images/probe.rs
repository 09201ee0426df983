use super::error::ImageProbeError;
use image::{ImageFormat, ImageReader};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::collections::HashMap;
use std::io::{Cursor, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Gif,
    Png,
    Jpeg,
    Webp,
    Bmp,
    Ico,
    Other,
}

impl From<ImageFormat> for ImageKind {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Gif => Self::Gif,
            ImageFormat::Png => Self::Png,
            ImageFormat::Jpeg => Self::Jpeg,
            ImageFormat::WebP => Self::Webp,
            ImageFormat::Bmp => Self::Bmp,
            ImageFormat::Ico => Self::Ico,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn new(kind: ImageKind, width: u32, height: u32) -> Self {
        Self {
            kind,
            width,
            height,
        }
    }
}

/// Looks up type and dimensions of a remote image.
///
/// Urls are expected to be percent-escaped already. Implementations block
/// until they have an answer and never retry.
pub trait ImageProbe {
    fn probe(&self, url: &str) -> Result<ImageInfo, ImageProbeError>;
}

/// Downloads the head of the image and reads type and size from its header.
pub struct HttpImageProbe {
    client: Client,
    max_bytes: u64,
}

impl HttpImageProbe {
    pub fn new(client: Client, max_bytes: u64) -> Self {
        Self { client, max_bytes }
    }
}

impl ImageProbe for HttpImageProbe {
    fn probe(&self, url: &str) -> Result<ImageInfo, ImageProbeError> {
        let url = url::Url::parse(url)?;
        let response = self.client.get(url.clone()).send().map_err(|err| {
            log::debug!("GET '{}' failed - '{}'", url.as_str(), err);
            ImageProbeError::Http
        })?;

        let status_code = response.status();
        if !status_code.is_success() {
            log::debug!("probing '{}': response {}", url.as_str(), status_code);
            return Err(ImageProbeError::Http);
        }

        let is_image = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|val| val.to_str().ok())
            .map(|content_type| content_type.contains("image"))
            .unwrap_or(true);
        if !is_image {
            log::debug!("'{}' is not an image", url.as_str());
            return Err(ImageProbeError::ContentType);
        }

        let mut buffer = Vec::new();
        response.take(self.max_bytes).read_to_end(&mut buffer)?;

        let reader = ImageReader::new(Cursor::new(buffer)).with_guessed_format()?;
        let kind = reader
            .format()
            .map(ImageKind::from)
            .ok_or(ImageProbeError::Decode)?;
        let (width, height) = reader.into_dimensions()?;

        Ok(ImageInfo::new(kind, width, height))
    }
}

/// Answers from a fixed table. Useful when dimensions are known upfront or
/// when the network must stay out of the picture.
#[derive(Debug, Default, Clone)]
pub struct StaticProbe {
    images: HashMap<String, ImageInfo>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: &str, info: ImageInfo) {
        self.images.insert(url.into(), info);
    }

    pub fn with(mut self, url: &str, info: ImageInfo) -> Self {
        self.insert(url, info);
        self
    }
}

impl ImageProbe for StaticProbe {
    fn probe(&self, url: &str) -> Result<ImageInfo, ImageProbeError> {
        self.images
            .get(url)
            .copied()
            .ok_or(ImageProbeError::NotFound)
    }
}
