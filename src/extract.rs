//! Plain-text extraction from study documents.
//!
//! Extraction is best-effort: pages and paragraphs without text are skipped,
//! only a document that cannot be opened or parsed at all is an error.

use crate::error::ExtractError;
use crate::utils::preview_text;
use lopdf::Document;
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
    Markdown,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::PlainText),
            "md" => Ok(DocumentFormat::Markdown),
            _ => Err(ExtractError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::PlainText => "Text",
            DocumentFormat::Markdown => "Markdown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub text: String,
}

impl ExtractedDocument {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn preview(&self) -> String {
        preview_text(&self.text, PREVIEW_CHARS)
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Supported documents in `dir`, sorted by path.
pub fn get_document_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && DocumentFormat::from_path(&path).is_ok() {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

pub fn extract_text(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    let format = DocumentFormat::from_path(path)?;
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(path)?,
        DocumentFormat::Docx => extract_docx(path)?,
        DocumentFormat::PlainText | DocumentFormat::Markdown => read_utf8(path)?,
    };

    info!(
        path = %path.display(),
        format = format.name(),
        chars = text.chars().count(),
        "extracted document text"
    );

    Ok(ExtractedDocument {
        path: path.to_path_buf(),
        format,
        text,
    })
}

fn failure(path: &Path, detail: impl ToString) -> ExtractError {
    ExtractError::ExtractionFailure {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

fn read_utf8(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|e| failure(path, e))?;
    String::from_utf8(bytes)
        .map_err(|e| failure(path, format!("file is not valid UTF-8: {}", e)))
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    let doc = Document::load(path).map_err(|e| failure(path, e))?;

    let mut text = String::new();
    for (page_num, _page_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(content) if !content.trim().is_empty() => {
                text.push_str(&content);
                text.push('\n');
            }
            Ok(_) => debug!(page = page_num, "skipping PDF page without text"),
            Err(e) => debug!(page = page_num, error = %e, "skipping unreadable PDF page"),
        }
    }

    Ok(text.trim().to_string())
}

fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let file = fs::File::open(path).map_err(|e| failure(path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| failure(path, e))?;
    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| failure(path, format!("missing word/document.xml: {}", e)))?
        .read_to_string(&mut document_xml)
        .map_err(|e| failure(path, e))?;

    Ok(docx_paragraphs(&document_xml).join("\n"))
}

lazy_static::lazy_static! {
    static ref PARAGRAPH_RE: Regex = Regex::new(r"(?s)<w:p[ >].*?</w:p>").unwrap();
    static ref RUN_TEXT_RE: Regex = Regex::new(r"(?s)<w:t(?:\s[^>/]*)?>(.*?)</w:t>").unwrap();
    static ref CHAR_REF_RE: Regex = Regex::new(r"&#(?:x([0-9a-fA-F]+)|([0-9]+));").unwrap();
}

/// Text of every non-empty `<w:p>` paragraph in a WordprocessingML body.
fn docx_paragraphs(xml: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    for paragraph in PARAGRAPH_RE.find_iter(xml) {
        let text: String = RUN_TEXT_RE
            .captures_iter(paragraph.as_str())
            .filter_map(|caps| caps.get(1))
            .map(|m| decode_xml_entities(m.as_str()))
            .collect();
        if !text.trim().is_empty() {
            paragraphs.push(text);
        }
    }
    paragraphs
}

/// Decode character references and the five predefined XML entities.
///
/// `&amp;` goes last so "&amp;lt;" stays the literal text "&lt;".
fn decode_xml_entities(text: &str) -> String {
    let text = CHAR_REF_RE.replace_all(text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            (None, None) => None,
        };
        match code.and_then(char::from_u32) {
            Some(ch) => ch.to_string(),
            None => caps[0].to_string(),
        }
    });

    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
