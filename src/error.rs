use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("invalid base64 image payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("empty image payload")]
    EmptyImage,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type HelperResult<T> = Result<T, HelperError>;
