use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Building the http client failed")]
    Client,
    #[error("Http request failed")]
    Http,
    #[error("Unexpected response status {0}")]
    Status(u16),
    #[error("Invalid UTF8 Text")]
    Utf8(#[from] std::str::Utf8Error),
}
