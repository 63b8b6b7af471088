use crate::error::CoreError;
use std::ops::Range;

/// Line prefixes that mark a field as phone-bearing.
///
/// `item` covers vendor-grouped properties (`item1.TEL:...`). `FN` holds a
/// display name, not a number; it stays in the list for compatibility with
/// files already processed by the legacy tool.
pub const PHONE_FIELD_PREFIXES: [&str; 3] = ["TEL", "item", "FN"];

pub fn is_phone_field(line: &str) -> bool {
    PHONE_FIELD_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// A value located inside a field line, kept as a byte range into that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValue<'a> {
    line: &'a str,
    start: usize,
    end: usize,
}

impl<'a> FieldValue<'a> {
    pub fn line(&self) -> &'a str {
        self.line
    }

    pub fn as_str(&self) -> &'a str {
        &self.line[self.start..self.end]
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Locates the value of a field line: the text between the first and the
/// second `:`, trimmed. A value that itself contains `:` is truncated there.
pub fn extract_value(line: &str) -> Result<FieldValue<'_>, CoreError> {
    let start = line
        .find(':')
        .map(|idx| idx + 1)
        .ok_or_else(|| CoreError::MissingSeparator(line.to_string()))?;
    let end = line[start..]
        .find(':')
        .map_or(line.len(), |idx| start + idx);

    let segment = &line[start..end];
    let leading = segment.len() - segment.trim_start().len();
    let start = start + leading;
    let end = start + segment.trim().len();

    Ok(FieldValue { line, start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_phone_field_matches_plain_prefixes() {
        assert!(is_phone_field("TEL;TYPE=CELL:123"));
        assert!(is_phone_field("item1.TEL:123"));
        assert!(is_phone_field("FN:Jane Doe"));
        assert!(is_phone_field("FNsomething:abc"));
        assert!(!is_phone_field("EMAIL:jane@example.com"));
        assert!(!is_phone_field("tel:123"));
        assert!(!is_phone_field(" TEL:123"));
    }

    #[test]
    fn extract_value_trims_second_segment() {
        let value = extract_value("TEL;TYPE=CELL:  00229 12 34 56 78 ").unwrap();
        assert_eq!(value.as_str(), "00229 12 34 56 78");
        assert_eq!(value.span(), 16..33);
    }

    #[test]
    fn extract_value_stops_at_second_colon() {
        let value = extract_value("item1.TEL:229 1234:ext").unwrap();
        assert_eq!(value.as_str(), "229 1234");
    }

    #[test]
    fn extract_value_allows_empty_value() {
        let value = extract_value("TEL:").unwrap();
        assert!(value.is_empty());
        assert_eq!(value.span(), 4..4);
    }

    #[test]
    fn extract_value_rejects_missing_separator() {
        let err = extract_value("TEL-no-colon-here").unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingSeparator("TEL-no-colon-here".to_string())
        );
    }
}
