use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageProbeError {
    #[error("Invalid URL")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Http error")]
    Http,
    #[error("Content-type suggest no image")]
    ContentType,
    #[error("IO error")]
    IO(#[from] std::io::Error),
    #[error("Reading the image header failed")]
    Decode,
    #[error("No image known for this url")]
    NotFound,
}

impl From<reqwest::Error> for ImageProbeError {
    fn from(_value: reqwest::Error) -> Self {
        Self::Http
    }
}

impl From<image::ImageError> for ImageProbeError {
    fn from(_value: image::ImageError) -> Self {
        Self::Decode
    }
}
