pub mod field;
pub mod phone;

pub use field::{extract_value, is_phone_field, FieldValue, PHONE_FIELD_PREFIXES};
pub use phone::compact_phone;

/// Prepended to an input file name to name its processed copy.
pub const DEFAULT_OUTPUT_PREFIX: &str = "processed_";
