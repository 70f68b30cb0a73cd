use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("unknown codec type: {0}")]
#[non_exhaustive]
pub struct UnknownCodecTypeError(pub String);

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("{kind} not found: {key}")]
#[non_exhaustive]
pub struct NotFoundError {
    pub kind: &'static str,
    pub key: String,
}

impl NotFoundError {
    #[inline]
    pub(crate) fn new(kind: &'static str, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    #[error("bad format: {0}")]
    Format(String),
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    UnknownCodecType(#[from] UnknownCodecTypeError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
