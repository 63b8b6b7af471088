use std::path::PathBuf;
use telnorm_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcfError {
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed field on line {line_number}: {source}")]
    MalformedLine {
        line_number: usize,
        #[source]
        source: CoreError,
    },
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("input path has no file name: {0}")]
    InvalidFileName(PathBuf),
}

pub type Result<T> = std::result::Result<T, VcfError>;
