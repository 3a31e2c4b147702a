use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::trace;

use super::Extractor;
use crate::errors::{SearchError, SearchResult};
use crate::matcher::SearchTerm;

/// Spreadsheet extractor: cell values across all sheets.
///
/// Values only: a formula cell contributes its computed value, not its
/// source. Tested cell by cell, stopping at the first hit.
pub struct SheetExtractor;

impl Extractor for SheetExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| SearchError::extraction_failed(path, &e))?;

        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| SearchError::extraction_failed(path, &e))?;
            for row in range.rows() {
                for cell in row {
                    if matches!(cell, Data::Empty) {
                        continue;
                    }
                    if term.is_contained_in(&cell.to_string()) {
                        trace!("Match in sheet '{}' of {}", name, path.display());
                        return Ok(true);
                    }
                }
            }
        }
        Ok(term.is_empty())
    }
}
