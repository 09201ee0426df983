use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("libXml Error")]
    Xml,
}
