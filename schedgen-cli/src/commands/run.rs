//! `schedgen run` — execute one batch pass over the company list.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use schedgen_batch::{run_batch, RowOutcome, RunReport};
use schedgen_convert::{HttpConverter, PdfConverter, SofficeConverter};
use schedgen_core::{ConverterKind, RunConfig};
use schedgen_merge::TemplateIssue;

/// Arguments for `schedgen run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Report what would be generated without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the final report as JSON instead of summary lines.
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let config = RunConfig::default();
        let converter = build_converter(&config);

        let report = match run_batch(&config, converter.as_ref(), self.dry_run) {
            Ok(report) => report,
            Err(err) => {
                let issues = err.template_issues();
                if issues.is_empty() {
                    return Err(err).context("batch run failed");
                }
                print_template_guidance(issues);
                bail!("template markup is broken; fix the template and run again");
            }
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize report")?
            );
        } else {
            print_summary(&report, self.dry_run);
        }
        Ok(())
    }
}

/// The strategy is fixed by [`RunConfig`]; rows never switch converters.
fn build_converter(config: &RunConfig) -> Box<dyn PdfConverter> {
    match &config.converter {
        ConverterKind::Soffice => Box::new(SofficeConverter::new(config.convert_timeout)),
        ConverterKind::Remote(endpoint) => {
            Box::new(HttpConverter::new(endpoint.clone(), config.convert_timeout))
        }
    }
}

/// Step-by-step remediation instead of a raw error chain: the operator has
/// to fix the Word file, not read a backtrace.
fn print_template_guidance(issues: &[TemplateIssue]) {
    eprintln!("{}", "TEMPLATE FORMATTING ERROR".red().bold());
    eprintln!("The Word template has formatting that breaks the merge placeholders.");
    eprintln!();
    eprintln!("To fix:");
    eprintln!("  1. Open the template in your word processor");
    eprintln!("  2. Select all text and clear character formatting");
    eprintln!("  3. Retype each placeholder in one go, e.g. {{{{CompanyHeader}}}}");
    eprintln!("  4. Save and run `schedgen check` to confirm");
    eprintln!();
    eprintln!("Specific issues:");
    for (i, issue) in issues.iter().enumerate() {
        eprintln!("  {}. {issue}", i + 1);
    }
}

fn print_summary(report: &RunReport, dry_run: bool) {
    for row in &report.rows {
        match row {
            RowOutcome::Generated { number, stem } => {
                println!("  {}  {number}: {stem}.docx + .pdf", "✓".green());
            }
            RowOutcome::WouldGenerate { number, stem } => {
                println!("  {}  {number}: would generate {stem}.docx + .pdf", "~".yellow());
            }
            RowOutcome::DocOnly { number, stem, reason } => {
                println!("  {}  {number}: {stem}.docx only ({reason})", "!".yellow());
            }
            RowOutcome::Skipped { number } => {
                println!("  {}  {number}: skipped, missing required data", "·".dimmed());
            }
            RowOutcome::Failed { number, reason } => {
                println!("  {}  {number}: {reason}", "✗".red());
            }
        }
    }

    let prefix = if dry_run { "[dry-run] " } else { "" };
    println!(
        "{prefix}done: {} successful, {} error(s), {} skipped",
        report.success_count, report.error_count, report.skipped_count
    );
}
