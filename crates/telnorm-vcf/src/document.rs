use crate::error::{Result, VcfError};
use crate::rewrite::{rewrite_block, RewriteOptions};
use crate::segment::segment;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use telnorm_core::{MalformedPolicy, MarkerMatch, ReplaceMode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub replace: ReplaceMode,
    pub on_malformed: MalformedPolicy,
    pub markers: MarkerMatch,
}

impl NormalizeOptions {
    fn rewrite(&self) -> RewriteOptions {
        RewriteOptions {
            replace: self.replace,
            on_malformed: self.on_malformed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub blocks: usize,
    pub eligible: usize,
    pub rewritten: usize,
    pub skipped: usize,
    pub discarded_lines: usize,
    pub dropped_lines: usize,
    pub rules: BTreeMap<String, usize>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub output: String,
    pub report: NormalizeReport,
}

/// Decodes `data` as UTF-8 and normalizes it.
pub fn normalize_bytes(data: &[u8], options: &NormalizeOptions) -> Result<Normalized> {
    let text = std::str::from_utf8(data)?;
    normalize_document(text, options)
}

/// Normalizes every phone-bearing line of every closed block in `text`.
/// Output lines are joined with `\n`, without a trailing line ending.
pub fn normalize_document(text: &str, options: &NormalizeOptions) -> Result<Normalized> {
    let segmented = segment(text, options.markers);
    let mut report = NormalizeReport {
        blocks: segmented.blocks.len(),
        discarded_lines: segmented.discarded.len(),
        dropped_lines: segmented.dropped.len(),
        ..NormalizeReport::default()
    };

    let mut lines: Vec<String> = Vec::new();
    for block in segmented.blocks {
        let rewritten = rewrite_block(block, options.rewrite())?;
        report.eligible += rewritten.applied.len() + rewritten.skipped.len();
        report.rewritten += rewritten.changed;
        report.skipped += rewritten.skipped.len();
        for (_, rule) in &rewritten.applied {
            *report.rules.entry(rule.label().to_string()).or_default() += 1;
        }
        for skipped in &rewritten.skipped {
            report.warnings.push(format!(
                "line {}: skipped: {}",
                skipped.line_number, skipped.reason
            ));
        }
        lines.extend(rewritten.lines);
    }

    if report.discarded_lines > 0 {
        report.warnings.push(format!(
            "{} line(s) outside BEGIN:VCARD/END:VCARD discarded",
            report.discarded_lines
        ));
    }
    if report.dropped_lines > 0 {
        report.warnings.push(format!(
            "missing END:VCARD at end of file; {} line(s) dropped",
            report.dropped_lines
        ));
    }

    Ok(Normalized {
        output: lines.join("\n"),
        report,
    })
}

/// Path of the processed copy of `input`: same directory, name prefixed.
pub fn processed_file_name(input: &Path, prefix: &str) -> Result<PathBuf> {
    let name = input
        .file_name()
        .ok_or_else(|| VcfError::InvalidFileName(input.to_path_buf()))?;
    let mut processed = prefix.to_string();
    processed.push_str(&name.to_string_lossy());
    Ok(input.with_file_name(processed))
}
