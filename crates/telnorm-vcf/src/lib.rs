pub mod document;
pub mod error;
pub mod rewrite;
pub mod segment;

pub use document::{
    normalize_bytes, normalize_document, processed_file_name, NormalizeOptions,
    NormalizeReport, Normalized,
};
pub use error::{Result, VcfError};
