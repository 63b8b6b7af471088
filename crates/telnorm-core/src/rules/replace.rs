use crate::domain::field::FieldValue;
use crate::error::CoreError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Strategy for putting a rewritten value back into its line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplaceMode {
    /// Replace exactly the byte range the value was extracted from.
    #[default]
    Span,
    /// Replace the first textual occurrence of the value in the line.
    FirstMatch,
    /// Replace every textual occurrence of the value in the line.
    AllMatches,
}

impl FromStr for ReplaceMode {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "span" => Ok(ReplaceMode::Span),
            "first-match" => Ok(ReplaceMode::FirstMatch),
            "all-matches" => Ok(ReplaceMode::AllMatches),
            _ => Err(CoreError::InvalidOption {
                kind: "replace mode (expected span|first-match|all-matches)",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReplaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReplaceMode::Span => "span",
            ReplaceMode::FirstMatch => "first-match",
            ReplaceMode::AllMatches => "all-matches",
        })
    }
}

/// Builds the line that results from substituting `replacement` for `value`.
pub fn splice_value(value: &FieldValue<'_>, replacement: &str, mode: ReplaceMode) -> String {
    let line = value.line();
    match mode {
        ReplaceMode::Span => {
            let span = value.span();
            let mut out = String::with_capacity(line.len() - span.len() + replacement.len());
            out.push_str(&line[..span.start]);
            out.push_str(replacement);
            out.push_str(&line[span.end..]);
            out
        }
        // An empty needle would match between every character.
        _ if value.is_empty() => line.to_string(),
        ReplaceMode::FirstMatch => line.replacen(value.as_str(), replacement, 1),
        ReplaceMode::AllMatches => line.replace(value.as_str(), replacement),
    }
}
