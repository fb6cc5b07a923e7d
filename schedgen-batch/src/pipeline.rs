//! The batch loop: validate → merge → write → convert → write → tally.
//!
//! Strictly sequential; the converter is always awaited before the next
//! row starts, so output ordering is deterministic.

use chrono::Utc;

use schedgen_convert::PdfConverter;
use schedgen_core::{read_company_rows, CompanyRecord, RunConfig};
use schedgen_merge::{DocxTemplate, MergeError, MergeFields};

use crate::error::{io_err, BatchError};
use crate::report::{RowOutcome, RunReport};
use crate::writer::atomic_write;

/// Run one batch pass and return the tally.
///
/// Fatal conditions (unreadable inputs, broken template markup) return a
/// [`BatchError`] before any row is processed. Everything per-row is
/// logged, tallied, and survived.
///
/// Policy: a row whose editable document was written still counts toward
/// `success_count` when its PDF conversion fails; the row is recorded as
/// [`RowOutcome::DocOnly`] so the degradation stays visible.
pub fn run_batch(
    config: &RunConfig,
    converter: &dyn PdfConverter,
    dry_run: bool,
) -> Result<RunReport, BatchError> {
    let started_at = Utc::now();

    let template_bytes =
        std::fs::read(&config.template_path).map_err(|source| BatchError::TemplateRead {
            path: config.template_path.clone(),
            source,
        })?;
    let template = DocxTemplate::from_bytes(template_bytes)?;
    tracing::info!("template ok: {}", config.template_path.display());

    let records = read_company_rows(&config.sheet_path)?;
    tracing::info!(
        "{} data row(s) in {}",
        records.len(),
        config.sheet_path.display()
    );

    if !dry_run {
        std::fs::create_dir_all(&config.output_dir)
            .map_err(|e| io_err(&config.output_dir, e))?;
    }

    let mut rows = Vec::with_capacity(records.len());
    let mut success_count = 0u32;
    let mut error_count = 0u32;
    let mut skipped_count = 0u32;

    for record in &records {
        match process_row(record, &template, converter, config, dry_run)? {
            outcome @ RowOutcome::Skipped { .. } => {
                skipped_count += 1;
                rows.push(outcome);
            }
            outcome @ RowOutcome::Failed { .. } => {
                error_count += 1;
                rows.push(outcome);
            }
            outcome => {
                success_count += 1;
                rows.push(outcome);
            }
        }
    }

    tracing::info!(
        "batch complete: {success_count} ok, {error_count} error(s), {skipped_count} skipped"
    );

    Ok(RunReport {
        started_at,
        finished_at: Utc::now(),
        success_count,
        error_count,
        skipped_count,
        rows,
    })
}

/// One row, one outcome. Only a broken template propagates as `Err`;
/// every other failure is folded into the returned [`RowOutcome`].
fn process_row(
    record: &CompanyRecord,
    template: &DocxTemplate,
    converter: &dyn PdfConverter,
    config: &RunConfig,
    dry_run: bool,
) -> Result<RowOutcome, BatchError> {
    if !record.is_complete() {
        tracing::warn!("skipping row with missing data: '{record}'");
        return Ok(RowOutcome::Skipped {
            number: record.number.clone(),
        });
    }

    let fields = MergeFields::from(record);
    let docx = match template.merge(&fields) {
        Ok(bytes) => bytes,
        // Broken markup is a template problem, not a row problem; no
        // amount of skipping will fix it.
        Err(err @ MergeError::TemplateFormat { .. }) => return Err(BatchError::Template(err)),
        Err(err) => {
            tracing::error!("row {record}: merge failed: {err}");
            return Ok(RowOutcome::Failed {
                number: record.number.clone(),
                reason: err.to_string(),
            });
        }
    };

    let docx_path = config.output_dir.join(record.docx_name());
    if let Err(err) = atomic_write(&docx_path, &docx, dry_run) {
        tracing::error!("row {record}: write failed: {err}");
        return Ok(RowOutcome::Failed {
            number: record.number.clone(),
            reason: err.to_string(),
        });
    }

    if dry_run {
        return Ok(RowOutcome::WouldGenerate {
            number: record.number.clone(),
            stem: record.document_stem(),
        });
    }

    match converter.convert(&docx) {
        Ok(pdf) => {
            let pdf_path = config.output_dir.join(record.pdf_name());
            match atomic_write(&pdf_path, &pdf, false) {
                Ok(_) => {
                    tracing::info!("row {record}: generated {}", record.document_stem());
                    Ok(RowOutcome::Generated {
                        number: record.number.clone(),
                        stem: record.document_stem(),
                    })
                }
                Err(err) => {
                    tracing::warn!(
                        "row {record}: pdf write failed, keeping editable copy: {err}"
                    );
                    Ok(RowOutcome::DocOnly {
                        number: record.number.clone(),
                        stem: record.document_stem(),
                        reason: err.to_string(),
                    })
                }
            }
        }
        Err(err) => {
            tracing::warn!("row {record}: pdf conversion failed, keeping editable copy: {err}");
            Ok(RowOutcome::DocOnly {
                number: record.number.clone(),
                stem: record.document_stem(),
                reason: err.to_string(),
            })
        }
    }
}
