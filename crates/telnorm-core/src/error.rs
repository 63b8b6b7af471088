use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("missing ':' separator in field line: {0}")]
    MissingSeparator(String),
    #[error("invalid {kind}: {value}")]
    InvalidOption { kind: &'static str, value: String },
}
