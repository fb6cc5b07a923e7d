//! Binary-level tests: fixed-path inputs under a temp working directory.

use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn write_docx(path: &Path, body: &str) {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let file = std::fs::File::create(path).expect("create docx");
    let mut zip = ZipWriter::new(file);
    let opts = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", opts).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
    )
    .unwrap();

    zip.start_file("_rels/.rels", opts).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#,
    )
    .unwrap();

    zip.start_file("word/document.xml", opts).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn write_xlsx(path: &Path, rows: &[[&str; 3]]) {
    let file = std::fs::File::create(path).expect("create xlsx");
    let mut zip = ZipWriter::new(file);
    let opts = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", opts).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#,
    )
    .unwrap();

    zip.start_file("_rels/.rels", opts).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
    )
    .unwrap();

    zip.start_file("xl/workbook.xml", opts).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
    )
    .unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", opts).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
    )
    .unwrap();

    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>Header</t></is></c><c r="B1" t="inlineStr"><is><t>Number</t></is></c><c r="C1" t="inlineStr"><is><t>Initial</t></is></c></row>"#,
    );
    for (i, [header, number, initial]) in rows.iter().enumerate() {
        let rn = i + 2;
        sheet.push_str(&format!(r#"<row r="{rn}">"#));
        for (col, value) in [("A", header), ("B", number), ("C", initial)] {
            if value.is_empty() {
                continue;
            }
            sheet.push_str(&format!(
                r#"<c r="{col}{rn}" t="inlineStr"><is><t xml:space="preserve">{value}</t></is></c>"#
            ));
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    zip.start_file("xl/worksheets/sheet1.xml", opts).unwrap();
    zip.write_all(sheet.as_bytes()).unwrap();
    zip.finish().unwrap();
}

const GOOD_BODY: &str =
    r#"<w:p><w:r><w:t xml:space="preserve">{{CompanyHeader}} no. {{CompanyNumber}} ({{CompanyInitial}})</w:t></w:r></w:p>"#;

/// Temp working directory with `input/` populated.
fn workspace(rows: &[[&str; 3]], body: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input");
    std::fs::create_dir_all(&input).unwrap();
    write_docx(&input.join("template.docx"), body);
    write_xlsx(&input.join("companyList.xlsx"), rows);
    dir
}

fn schedgen() -> Command {
    Command::cargo_bin("schedgen").expect("binary built")
}

#[test]
fn check_accepts_a_valid_template() {
    let dir = workspace(&[], GOOD_BODY);
    schedgen()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("template is valid"));
}

#[test]
fn check_rejects_broken_markup_with_issue_list() {
    let dir = workspace(&[], r#"<w:p><w:r><w:t>{{CompanyNumber never closes</w:t></w:r></w:p>"#);
    schedgen()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("template markup is broken"))
        .stderr(predicate::str::contains("1."));
}

#[test]
fn check_without_inputs_fails_with_context() {
    let dir = TempDir::new().unwrap();
    schedgen()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input/template.docx"));
}

#[test]
fn run_dry_run_reports_and_writes_nothing() {
    let dir = workspace(
        &[["Acme Corp", "100", "A"], ["", "101", "B"]],
        GOOD_BODY,
    );
    schedgen()
        .current_dir(dir.path())
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 0 error(s), 1 skipped"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn run_writes_the_editable_document() {
    // Conversion may or may not succeed depending on whether LibreOffice
    // is installed; the docx and the tally are unconditional.
    let dir = workspace(
        &[
            ["Acme Corp", "100", "A"],
            ["", "101", "B"],
            ["Beta LLC", "102", ""],
        ],
        GOOD_BODY,
    );
    schedgen()
        .current_dir(dir.path())
        .arg("run")
        .timeout(std::time::Duration::from_secs(120))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 0 error(s), 2 skipped"));
    assert!(dir
        .path()
        .join("output")
        .join("100_A Schedule 9_CC.docx")
        .exists());
}

#[test]
fn run_aborts_on_broken_template_with_guidance() {
    let dir = workspace(
        &[["Acme Corp", "100", "A"]],
        r#"<w:p><w:r><w:t>{{CompanyNumber never closes</w:t></w:r></w:p>"#,
    );
    schedgen()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TEMPLATE FORMATTING ERROR"))
        .stderr(predicate::str::contains("Specific issues:"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn run_json_emits_the_report() {
    let dir = workspace(&[["Acme Corp", "100", "A"]], GOOD_BODY);
    let output = schedgen()
        .current_dir(dir.path())
        .args(["run", "--dry-run", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(report["success_count"], 1);
    assert_eq!(report["rows"][0]["kind"], "would_generate");
}
