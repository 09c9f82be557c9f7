use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("field `{0}` is not registered")]
    UnknownField(String),
    #[error("profile `{0}` lists no fields")]
    EmptyProfile(&'static str),
    #[error("profile `{profile}` lists field `{field}` twice")]
    DuplicateField { profile: &'static str, field: String },
    #[error("local storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("failed to (de)serialize submissions: {0}")]
    Serialization(#[from] serde_json::Error),
}
