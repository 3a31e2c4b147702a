//! Format-specific text extraction capabilities.
//!
//! Each file classification resolves to exactly one [`Extractor`]; the
//! mapping lives in [`extractor_for`] as an exhaustive match, so adding a
//! classification without an extractor fails to compile. Extractors test
//! containment unit-by-unit (page, slide paragraph, cell, text node) and
//! stop at the first hit, which bounds worst-case work on large documents.

pub mod data;
pub mod markup;
pub mod office;
pub mod pdf;
pub mod sheet;
pub mod text;

use std::path::Path;

use crate::classify::FileKind;
use crate::errors::SearchResult;
use crate::matcher::SearchTerm;

/// A capability that tests whether a file's visible text contains a term.
///
/// Implementations must confine failures to the file at hand: any parse or
/// read problem is returned as an `ExtractionFailed` error, never a panic,
/// and the caller converts it into a non-match plus a diagnostic.
pub trait Extractor: Send + Sync {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool>;
}

/// Resolves the extractor for a classification.
///
/// Total over every classification except `Ignored`, which never reaches a
/// worker because the scanner filters it out of the candidate list.
pub fn extractor_for(kind: FileKind) -> Option<&'static dyn Extractor> {
    match kind {
        FileKind::Pdf => Some(&pdf::PdfExtractor),
        FileKind::Presentation => Some(&office::SlideExtractor),
        FileKind::Spreadsheet => Some(&sheet::SheetExtractor),
        FileKind::WordDoc => Some(&office::WordExtractor),
        FileKind::PlainText | FileKind::LargeUnclassified => Some(&text::TextExtractor),
        FileKind::Csv => Some(&data::CsvExtractor),
        FileKind::Xml => Some(&markup::XmlExtractor),
        FileKind::Html => Some(&markup::HtmlExtractor),
        FileKind::Markdown => Some(&markup::MarkdownExtractor),
        FileKind::Json => Some(&data::JsonExtractor),
        FileKind::Ignored => None,
    }
}
