use thiserror::Error;
use xvs_types::TypesError;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed extra_vars payload: {0}")]
    Payload(#[from] TypesError),
}

impl ProtocolError {
    /// Returns `true` if the failure is a content parse error rather than a
    /// response of the wrong shape.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Self::UnexpectedShape(_))
    }
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
