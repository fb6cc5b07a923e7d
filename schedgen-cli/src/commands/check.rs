//! `schedgen check` — validate the template without generating anything.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use schedgen_core::RunConfig;
use schedgen_merge::{DocxTemplate, MergeError};

/// Arguments for `schedgen check` (none yet; the template path is fixed).
#[derive(Args, Debug)]
pub struct CheckArgs {}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let config = RunConfig::default();
        let bytes = std::fs::read(&config.template_path).with_context(|| {
            format!("failed to read template at {}", config.template_path.display())
        })?;

        match DocxTemplate::from_bytes(bytes) {
            Ok(_) => {
                println!(
                    "{} template is valid: {}",
                    "✓".green(),
                    config.template_path.display()
                );
                Ok(())
            }
            Err(MergeError::TemplateFormat { issues }) => {
                eprintln!("{} template markup is broken:", "✗".red());
                for (i, issue) in issues.iter().enumerate() {
                    eprintln!("  {}. {issue}", i + 1);
                }
                bail!("{} template issue(s) found", issues.len());
            }
            Err(err) => Err(err).context("template could not be loaded"),
        }
    }
}
