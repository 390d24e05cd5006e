use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid scale: {0}")]
    InvalidScale(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown accessor key `{0}`")]
    UnknownKey(String),

    #[error("unknown scene node #{0}")]
    UnknownNode(usize),
}
