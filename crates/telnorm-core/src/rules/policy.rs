use crate::error::CoreError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// What to do with an eligible line that has no `:` separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// Fail the whole document on the first malformed line.
    #[default]
    Abort,
    /// Keep the line verbatim and report it.
    Skip,
}

/// How BEGIN/END marker lines are recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerMatch {
    /// The line must equal the marker.
    #[default]
    Exact,
    /// The line must start with the marker.
    Prefix,
}

impl MarkerMatch {
    pub fn matches(self, line: &str, marker: &str) -> bool {
        match self {
            MarkerMatch::Exact => line == marker,
            MarkerMatch::Prefix => line.starts_with(marker),
        }
    }
}

impl FromStr for MalformedPolicy {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(MalformedPolicy::Abort),
            "skip" => Ok(MalformedPolicy::Skip),
            _ => Err(CoreError::InvalidOption {
                kind: "malformed-line policy (expected abort|skip)",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MalformedPolicy::Abort => "abort",
            MalformedPolicy::Skip => "skip",
        })
    }
}

impl FromStr for MarkerMatch {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(MarkerMatch::Exact),
            "prefix" => Ok(MarkerMatch::Prefix),
            _ => Err(CoreError::InvalidOption {
                kind: "marker match (expected exact|prefix)",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for MarkerMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarkerMatch::Exact => "exact",
            MarkerMatch::Prefix => "prefix",
        })
    }
}
