//! Docx merge engine — [`DocxTemplate`].
//!
//! # How placeholders are located
//!
//! Word splits visible text across `<w:r>`/`<w:t>` formatting runs at
//! arbitrary points, so `{{CompanyNumber}}` may arrive as
//! `{{Comp` + `anyNumber}}` in two runs. The engine therefore scans the
//! *text layer*, the document text with all tags stripped, and keeps a
//! byte map back into the raw XML. A matched token is spliced out of the
//! XML wholesale; any tags caught inside the span form a balanced
//! close-then-open bridge between two runs, so removing them keeps the
//! document well-formed.

use std::io::{Cursor, Read, Write};

use once_cell::sync::Lazy;
use regex::Regex;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{render_err, MergeError, TemplateIssue};
use crate::fields::{MergeFields, PLACEHOLDER_NAMES};

/// The main document part of a docx archive.
const MAIN_PART: &str = "word/document.xml";

/// `{{ Name }}` with optional inner whitespace.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex"));

// ---------------------------------------------------------------------------
// Text layer
// ---------------------------------------------------------------------------

/// Document text with tags stripped, plus a byte map back into the XML.
///
/// `map[i]` is the XML byte offset of text byte `i`; spans matched on
/// `text` can be spliced out of the XML through it.
struct TextLayer {
    text: String,
    map: Vec<usize>,
}

impl TextLayer {
    fn build(xml: &str) -> Self {
        let mut text = String::with_capacity(xml.len() / 4);
        let mut map = Vec::with_capacity(xml.len() / 4);
        let mut in_tag = false;
        for (offset, ch) in xml.char_indices() {
            match ch {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                c if !in_tag => {
                    text.push(c);
                    for k in 0..c.len_utf8() {
                        map.push(offset + k);
                    }
                }
                _ => {}
            }
        }
        TextLayer { text, map }
    }

    /// XML byte range covered by `text[start..end]`. The final byte must be
    /// ASCII, which holds for every placeholder match (`}` terminated).
    fn xml_span(&self, start: usize, end: usize) -> (usize, usize) {
        (self.map[start], self.map[end - 1] + 1)
    }
}

/// Up to ~24 characters of text either side of `pos`, for issue context.
fn snippet(text: &str, pos: usize) -> String {
    let mut start = pos;
    for _ in 0..24 {
        if start == 0 {
            break;
        }
        start -= 1;
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }
    }
    let mut end = pos;
    for _ in 0..24 {
        if end >= text.len() {
            break;
        }
        end += 1;
        while end < text.len() && !text.is_char_boundary(end) {
            end += 1;
        }
    }
    text[start..end].trim().to_owned()
}

// ---------------------------------------------------------------------------
// DocxTemplate
// ---------------------------------------------------------------------------

/// An immutable docx template, loaded once per run.
///
/// Construction validates the placeholder markup, so a structurally broken
/// template fails before any row is processed. Each [`merge`](Self::merge)
/// call works on a fresh copy of the document XML and rebuilds the archive
/// from the original bytes; the template itself is never mutated.
#[derive(Debug)]
pub struct DocxTemplate {
    archive_bytes: Vec<u8>,
    document_xml: String,
}

impl DocxTemplate {
    /// Parse and validate template bytes.
    ///
    /// Returns [`MergeError::TemplateFormat`] with the ordered issue list
    /// when the markup is broken: unterminated delimiters, stray closers,
    /// or unknown placeholder names.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, MergeError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice()))?;
        let mut document_xml = String::new();
        {
            let mut part = archive.by_name(MAIN_PART).map_err(|e| match e {
                ZipError::FileNotFound => MergeError::MissingDocumentPart,
                other => MergeError::Archive(other),
            })?;
            part.read_to_string(&mut document_xml)?;
        }
        drop(archive);

        let template = DocxTemplate {
            archive_bytes: bytes,
            document_xml,
        };
        let issues = template.scan_issues();
        if !issues.is_empty() {
            return Err(MergeError::TemplateFormat { issues });
        }
        Ok(template)
    }

    /// Merge one set of field values into a fresh copy of the template.
    ///
    /// Values are XML-escaped; embedded newlines become `<w:br/>` line
    /// breaks. Failures here are per-row ([`MergeError::Render`]).
    pub fn merge(&self, fields: &MergeFields) -> Result<Vec<u8>, MergeError> {
        let rendered = substitute(&self.document_xml, fields)?;
        rebuild_archive(&self.archive_bytes, &rendered)
    }

    /// All structural problems in the template markup, in document order.
    fn scan_issues(&self) -> Vec<TemplateIssue> {
        let layer = TextLayer::build(&self.document_xml);
        let text = layer.text.as_str();

        let matches: Vec<(usize, usize)> = PLACEHOLDER_RE
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();
        let covered = |pos: usize| matches.iter().any(|&(s, e)| s <= pos && pos < e);

        // (position, issue) so the final list is in document order.
        let mut found: Vec<(usize, TemplateIssue)> = Vec::new();

        for caps in PLACEHOLDER_RE.captures_iter(text) {
            let name = caps.get(1).expect("capture group").as_str();
            if !MergeFields::is_known(name) {
                let pos = caps.get(0).expect("whole match").start();
                found.push((
                    pos,
                    TemplateIssue {
                        message: format!(
                            "unknown placeholder '{{{{{name}}}}}'; expected one of: {}",
                            PLACEHOLDER_NAMES.join(", ")
                        ),
                        context: Some(snippet(text, pos)),
                    },
                ));
            }
        }

        for (pos, _) in text.match_indices("{{") {
            if !covered(pos) {
                found.push((
                    pos,
                    TemplateIssue {
                        message: "unterminated or malformed placeholder: found '{{' \
                                  without a readable '{{Name}}' token"
                            .to_owned(),
                        context: Some(snippet(text, pos)),
                    },
                ));
            }
        }

        for (pos, _) in text.match_indices("}}") {
            if !covered(pos) {
                found.push((
                    pos,
                    TemplateIssue {
                        message: "stray closing delimiter '}}' without a matching '{{'".to_owned(),
                        context: Some(snippet(text, pos)),
                    },
                ));
            }
        }

        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, issue)| issue).collect()
    }
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

fn substitute(xml: &str, fields: &MergeFields) -> Result<String, MergeError> {
    let layer = TextLayer::build(xml);
    let mut out = String::with_capacity(xml.len());
    let mut consumed = 0usize;

    for caps in PLACEHOLDER_RE.captures_iter(&layer.text) {
        let token = caps.get(0).expect("whole match");
        let name = caps.get(1).expect("capture group").as_str();
        let value = fields
            .value_of(name)
            .ok_or_else(|| render_err(format!("no value for placeholder '{name}'")))?;

        let (xml_start, xml_end) = layer.xml_span(token.start(), token.end());
        if xml_start < consumed {
            continue;
        }
        out.push_str(&xml[consumed..xml_start]);
        out.push_str(&field_xml(value));
        consumed = xml_end;
    }

    out.push_str(&xml[consumed..]);
    Ok(out)
}

/// Escaped field value; `\n` becomes a `<w:br/>` between text runs so
/// multi-line values render as line breaks, not literal escapes.
fn field_xml(value: &str) -> String {
    let normalized = value.replace('\r', "");
    normalized
        .split('\n')
        .map(xml_escape)
        .collect::<Vec<_>>()
        .join(r#"</w:t><w:br/><w:t xml:space="preserve">"#)
}

fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Archive rebuild
// ---------------------------------------------------------------------------

/// Copy every entry of the original archive, swapping in the rendered
/// `word/document.xml`. Failures are per-row render errors.
fn rebuild_archive(original: &[u8], document_xml: &str) -> Result<Vec<u8>, MergeError> {
    let mut archive = ZipArchive::new(Cursor::new(original)).map_err(render_err)?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(render_err)?;
        let name = entry.name().to_owned();

        if entry.is_dir() {
            writer.add_directory(name.as_str(), opts).map_err(render_err)?;
            continue;
        }

        writer.start_file(name.as_str(), opts).map_err(render_err)?;
        if name == MAIN_PART {
            writer
                .write_all(document_xml.as_bytes())
                .map_err(render_err)?;
        } else {
            let mut contents = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut contents).map_err(render_err)?;
            writer.write_all(&contents).map_err(render_err)?;
        }
    }

    let cursor = writer.finish().map_err(render_err)?;
    Ok(cursor.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
