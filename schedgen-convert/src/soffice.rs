//! External-process conversion via headless LibreOffice.
//!
//! Each call stages the docx in a scoped temp directory, runs
//! `soffice --headless --convert-to pdf --outdir <tmp> <input>`, and reads
//! back the produced pdf. The temp directory is removed on every exit path,
//! including timeouts. The timeout is enforced by polling the child and
//! killing it when the deadline passes, so a wedged converter can never
//! stall the batch.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tempfile::tempdir;

use crate::error::ConvertError;
use crate::PdfConverter;

/// File stem used for the staged input; the converter derives the output
/// name from it.
const STAGED_STEM: &str = "document";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// [`PdfConverter`] backed by a LibreOffice binary.
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    binary: PathBuf,
    timeout: Duration,
}

impl SofficeConverter {
    /// Converter using `soffice` from `$PATH`.
    pub fn new(timeout: Duration) -> Self {
        Self::with_binary("soffice", timeout)
    }

    /// Converter using an explicit binary path. Tests point this at a
    /// shell script standing in for LibreOffice.
    pub fn with_binary(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

impl PdfConverter for SofficeConverter {
    fn convert(&self, docx: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let workdir = tempdir().map_err(ConvertError::Stage)?;
        let input = workdir.path().join(format!("{STAGED_STEM}.docx"));
        std::fs::write(&input, docx).map_err(ConvertError::Stage)?;

        let mut child = Command::new(&self.binary)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(workdir.path())
            .arg(&input)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ConvertError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        let status = wait_with_timeout(&mut child, self.timeout)?;
        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            return Err(ConvertError::Exit {
                status,
                stderr: stderr.trim().to_owned(),
            });
        }

        let output = workdir.path().join(format!("{STAGED_STEM}.pdf"));
        if !output.exists() {
            return Err(ConvertError::MissingOutput { path: output });
        }
        std::fs::read(&output).map_err(ConvertError::ReadOutput)
    }
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, ConvertError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().map_err(ConvertError::Wait)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ConvertError::Timeout(timeout));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    /// Stand-in converter script. Invoked as
    /// `script --headless --convert-to pdf --outdir <dir> <input>`,
    /// so `$5` is the outdir and `$6` the staged input.
    fn fake_converter(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-soffice.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn successful_conversion_returns_output_bytes() {
        let dir = TempDir::new().unwrap();
        let script = fake_converter(dir.path(), r#"printf '%s' fake-pdf > "$5/document.pdf""#);
        let converter = SofficeConverter::with_binary(script, Duration::from_secs(5));
        let pdf = converter.convert(b"docx bytes").expect("convert");
        assert_eq!(pdf, b"fake-pdf");
    }

    #[test]
    fn nonzero_exit_surfaces_stderr() {
        let dir = TempDir::new().unwrap();
        let script = fake_converter(dir.path(), "echo boom >&2\nexit 3");
        let converter = SofficeConverter::with_binary(script, Duration::from_secs(5));
        let err = converter.convert(b"docx").expect_err("must fail");
        match err {
            ConvertError::Exit { stderr, .. } => assert!(stderr.contains("boom")),
            other => panic!("expected Exit, got: {other:?}"),
        }
    }

    #[test]
    fn silent_success_without_output_is_reported() {
        let dir = TempDir::new().unwrap();
        let script = fake_converter(dir.path(), "exit 0");
        let converter = SofficeConverter::with_binary(script, Duration::from_secs(5));
        let err = converter.convert(b"docx").expect_err("must fail");
        assert!(matches!(err, ConvertError::MissingOutput { .. }), "got: {err:?}");
    }

    #[test]
    fn timeout_kills_the_converter_within_bounds() {
        let dir = TempDir::new().unwrap();
        let script = fake_converter(dir.path(), "sleep 30");
        let converter = SofficeConverter::with_binary(script, Duration::from_millis(200));

        let started = Instant::now();
        let err = converter.convert(b"docx").expect_err("must time out");
        let elapsed = started.elapsed();

        assert!(matches!(err, ConvertError::Timeout(_)), "got: {err:?}");
        assert!(
            elapsed < Duration::from_secs(5),
            "run must continue promptly after the deadline, took {elapsed:?}"
        );
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let converter =
            SofficeConverter::with_binary("/nonexistent/soffice", Duration::from_secs(1));
        let err = converter.convert(b"docx").expect_err("must fail");
        assert!(matches!(err, ConvertError::Spawn { .. }), "got: {err:?}");
    }
}
