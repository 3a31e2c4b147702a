use lopdf::Document;
use std::path::Path;
use tracing::trace;

use super::Extractor;
use crate::errors::{SearchError, SearchResult};
use crate::matcher::SearchTerm;

/// PDF extractor: page text, tested page by page.
///
/// Stops at the first page containing the term, so a hit near the front of
/// a thousand-page document never decodes the rest.
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let doc = Document::load(path).map_err(|e| SearchError::extraction_failed(path, &e))?;

        let pages = doc.get_pages();
        if pages.is_empty() {
            return Ok(term.is_empty());
        }

        for page_number in pages.keys() {
            let text = doc
                .extract_text(&[*page_number])
                .map_err(|e| SearchError::extraction_failed(path, &e))?;
            if term.is_contained_in(&text) {
                trace!("Match on page {} of {}", page_number, path.display());
                return Ok(true);
            }
        }
        Ok(false)
    }
}
