use thiserror::Error;

/// Errors produced while building or converting foundation types.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping at the top level, found {0}")]
    NotAMapping(&'static str),

    #[error("unsupported top-level key of type {0}")]
    UnsupportedKey(&'static str),

    #[error("unknown merge strategy '{0}': expected one of append, update, replace, delete")]
    UnknownStrategy(String),
}

pub type TypesResult<T> = Result<T, TypesError>;
