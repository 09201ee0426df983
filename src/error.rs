use crate::extractor::error::ExtractorError;
use crate::fetch::error::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtextError {
    #[error("Invalid Url '{0}'")]
    InvalidUrl(String),
    #[error("Url Error")]
    Url(#[from] url::ParseError),
    #[error("Fetching the page failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Extracting the article failed: {0}")]
    Extractor(#[from] ExtractorError),
    #[error("libXml Error")]
    Xml,
}
