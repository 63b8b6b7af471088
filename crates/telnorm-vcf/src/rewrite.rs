use crate::error::{Result, VcfError};
use crate::segment::Block;
use telnorm_core::{
    extract_value, is_phone_field, normalize_phone, splice_value, CoreError, MalformedPolicy,
    NumberingRule, ReplaceMode,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    pub replace: ReplaceMode,
    pub on_malformed: MalformedPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Not a phone-bearing field.
    Ineligible,
    Rewritten {
        line: String,
        rule: NumberingRule,
        changed: bool,
    },
    /// Eligible but unusable; the line is kept verbatim.
    Skipped { reason: CoreError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: CoreError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrittenBlock {
    pub lines: Vec<String>,
    /// Rule applied to each eligible line, with its source line number.
    pub applied: Vec<(usize, NumberingRule)>,
    /// Number of lines whose text changed.
    pub changed: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Rewrites a single line. Extraction failures are returned as errors so the
/// caller can apply its [`MalformedPolicy`].
pub fn rewrite_line(
    line: &str,
    replace: ReplaceMode,
) -> std::result::Result<LineOutcome, CoreError> {
    if !is_phone_field(line) {
        return Ok(LineOutcome::Ineligible);
    }

    let value = extract_value(line)?;
    let phone = normalize_phone(value.as_str());
    let rewritten = splice_value(&value, &phone.value, replace);
    let changed = rewritten != line;
    Ok(LineOutcome::Rewritten {
        line: rewritten,
        rule: phone.rule,
        changed,
    })
}

/// Like [`rewrite_line`], with malformed lines resolved by `options.on_malformed`.
pub fn classify_line(
    line: &str,
    options: RewriteOptions,
) -> std::result::Result<LineOutcome, CoreError> {
    match rewrite_line(line, options.replace) {
        Ok(outcome) => Ok(outcome),
        Err(reason) => match options.on_malformed {
            MalformedPolicy::Abort => Err(reason),
            MalformedPolicy::Skip => Ok(LineOutcome::Skipped { reason }),
        },
    }
}

/// Rewrites every phone-bearing line of a block. The output has the same
/// length and order as the input.
pub fn rewrite_block(block: Block, options: RewriteOptions) -> Result<RewrittenBlock> {
    let mut out = RewrittenBlock {
        lines: Vec::with_capacity(block.lines.len()),
        ..RewrittenBlock::default()
    };

    for (line_number, line) in (block.first_line..).zip(block.lines) {
        let outcome = classify_line(&line, options).map_err(|source| VcfError::MalformedLine {
            line_number,
            source,
        })?;
        match outcome {
            LineOutcome::Ineligible => out.lines.push(line),
            LineOutcome::Rewritten {
                line: rewritten,
                rule,
                changed,
            } => {
                if changed {
                    out.changed += 1;
                }
                out.applied.push((line_number, rule));
                out.lines.push(rewritten);
            }
            LineOutcome::Skipped { reason } => {
                out.skipped.push(SkippedLine {
                    line_number,
                    reason,
                });
                out.lines.push(line);
            }
        }
    }

    Ok(out)
}
