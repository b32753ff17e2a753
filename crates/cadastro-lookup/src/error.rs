use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid cep: {0}")]
    InvalidCep(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[cfg(feature = "viacep")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "viacep")]
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, LookupError>;
