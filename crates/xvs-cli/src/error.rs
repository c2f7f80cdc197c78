use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use xvs_client::ClientError;
use xvs_types::TypesError;

/// Category of a fatal failure, reported alongside the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    File,
    Parse,
    Protocol,
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Usage => "usage",
            Self::File => "file",
            Self::Parse => "parse",
            Self::Protocol => "protocol",
            Self::Transport => "transport",
        })
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{0}")]
    Usage(String),

    #[error("file '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("'{}' is not a file", .0.display())]
    NotAFile(PathBuf),

    #[error("reading '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: TypesError,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::FileNotFound(_) | Self::NotAFile(_) | Self::Read { .. } => ErrorKind::File,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Client(ClientError::Protocol(err)) if err.is_parse_error() => ErrorKind::Parse,
            Self::Client(ClientError::Protocol(_)) => ErrorKind::Protocol,
            Self::Client(ClientError::InvalidUrl(_)) => ErrorKind::Usage,
            Self::Client(_) => ErrorKind::Transport,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
