use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use telnorm_core::{MalformedPolicy, MarkerMatch, ReplaceMode};
use telnorm_vcf::{normalize_bytes, processed_file_name, NormalizeOptions, NormalizeReport};
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// vCard file to read
    pub file: PathBuf,
    /// Where to write the result (default: processed_<name> next to the input)
    #[arg(long, conflicts_with = "stdout")]
    pub out: Option<PathBuf>,
    /// Print the result instead of writing a file
    #[arg(long)]
    pub stdout: bool,
    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
    /// span | first-match | all-matches
    #[arg(long, value_name = "MODE")]
    pub replace: Option<ReplaceMode>,
    /// abort | skip
    #[arg(long, value_name = "POLICY")]
    pub on_malformed: Option<MalformedPolicy>,
    /// exact | prefix
    #[arg(long, value_name = "MATCH")]
    pub markers: Option<MarkerMatch>,
}

#[derive(Debug, Serialize)]
struct ProcessReport {
    input: String,
    output: Option<String>,
    dry_run: bool,
    #[serde(flatten)]
    normalize: NormalizeReport,
}

pub fn process_file(ctx: &Context<'_>, args: ProcessArgs) -> Result<()> {
    if ctx.json && args.stdout && !args.dry_run {
        return Err(invalid_input("--json cannot be combined with --stdout"));
    }
    if !args.file.is_file() {
        return Err(not_found(format!("vcf file {}", args.file.display())));
    }

    let options = resolve_options(ctx, &args);
    debug!(
        replace = %options.replace,
        on_malformed = %options.on_malformed,
        markers = %options.markers,
        "rewrite options"
    );

    let data =
        fs::read(&args.file).with_context(|| format!("read vcf file {}", args.file.display()))?;
    let normalized = normalize_bytes(&data, &options)
        .with_context(|| format!("process vcf file {}", args.file.display()))?;

    let output = if args.stdout {
        None
    } else {
        Some(match &args.out {
            Some(path) => path.clone(),
            None => processed_file_name(&args.file, &ctx.config.output_prefix)?,
        })
    };

    if !args.dry_run {
        match output.as_deref() {
            Some(path) => write_output(path, &normalized.output)?,
            None => {
                for warning in &normalized.report.warnings {
                    warn!("{warning}");
                }
                let mut stdout = io::stdout().lock();
                stdout.write_all(normalized.output.as_bytes())?;
                writeln!(stdout)?;
                return Ok(());
            }
        }
    }

    let report = ProcessReport {
        input: args.file.display().to_string(),
        output: output.as_ref().map(|path| path.display().to_string()),
        dry_run: args.dry_run,
        normalize: normalized.report,
    };
    if ctx.json {
        return print_json(&report);
    }
    print_report(&report);
    Ok(())
}

fn resolve_options(ctx: &Context<'_>, args: &ProcessArgs) -> NormalizeOptions {
    let defaults = ctx.config.rewrite;
    NormalizeOptions {
        replace: args.replace.unwrap_or(defaults.replace),
        on_malformed: args.on_malformed.unwrap_or(defaults.on_malformed),
        markers: args.markers.unwrap_or(defaults.markers),
    }
}

fn write_output(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    fs::write(path, data).with_context(|| format!("write output file {}", path.display()))
}

fn print_report(report: &ProcessReport) {
    let summary = &report.normalize;
    println!(
        "Processed {}: {} vCard(s), {} phone line(s) rewritten, {} skipped",
        report.input, summary.blocks, summary.rewritten, summary.skipped
    );
    match (&report.output, report.dry_run) {
        (Some(output), false) => println!("Wrote {}", output),
        (Some(output), true) => println!("Dry run: {} not written", output),
        (None, _) => {}
    }
    if !summary.warnings.is_empty() {
        println!("Warnings:");
        for warning in &summary.warnings {
            println!("- {}", warning);
        }
    }
}
