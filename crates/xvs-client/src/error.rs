use http::{Method, StatusCode, Uri};
use thiserror::Error;
use xvs_protocol::ProtocolError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("building request: {0}")]
    Request(#[from] http::Error),

    #[error("request failed: {0}")]
    Connection(#[from] hyper_util::client::legacy::Error),

    #[error("reading response body: {0}")]
    Body(#[from] hyper::Error),

    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: Uri,
        status: StatusCode,
    },

    #[error("{status} redirect from {url} has no usable Location header")]
    MissingLocation { url: Uri, status: StatusCode },

    #[error("{method} {url} was redirected with {status} to {location}, which would turn it into a GET without a body")]
    MethodChangingRedirect {
        method: Method,
        url: Uri,
        location: Uri,
        status: StatusCode,
    },

    #[error("stopped after {max} redirects at {url}")]
    TooManyRedirects { url: Uri, max: usize },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    /// Returns `true` for network, TLS and HTTP status failures.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Protocol(_) | Self::InvalidUrl(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
