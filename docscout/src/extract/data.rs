use std::fs;
use std::path::Path;

use super::Extractor;
use crate::errors::{SearchError, SearchResult};
use crate::matcher::SearchTerm;

/// CSV extractor: every field of every record, tested field by field.
///
/// The reader runs in flexible mode so ragged rows don't fail the file,
/// and the first record is searched like any other rather than being
/// treated as a header.
pub struct CsvExtractor;

/// JSON extractor: the full serialized document, keys included.
pub struct JsonExtractor;

impl Extractor for CsvExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| SearchError::extraction_failed(path, &e))?;

        for record in reader.records() {
            let record = record.map_err(|e| SearchError::extraction_failed(path, &e))?;
            for field in record.iter() {
                if term.is_contained_in(field) {
                    return Ok(true);
                }
            }
        }
        Ok(term.is_empty())
    }
}

impl Extractor for JsonExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let bytes = fs::read(path).map_err(|e| SearchError::extraction_failed(path, &e))?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| SearchError::extraction_failed(path, &e))?;
        let serialized =
            serde_json::to_string(&value).map_err(|e| SearchError::extraction_failed(path, &e))?;
        Ok(term.is_contained_in(&serialized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_csv_fields_and_header_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(&path, "Category,Amount\nTravel,120\nOffice SUPPLIES,45\n").unwrap();

        assert!(CsvExtractor
            .contains_term(&path, &SearchTerm::new("supplies"))
            .unwrap());
        // The header row is data too.
        assert!(CsvExtractor
            .contains_term(&path, &SearchTerm::new("category"))
            .unwrap());
        assert!(!CsvExtractor
            .contains_term(&path, &SearchTerm::new("payroll"))
            .unwrap());
    }

    #[test]
    fn test_csv_ragged_rows_are_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "a,b,c\nd,e\nf,g,h,i,needle\n").unwrap();

        assert!(CsvExtractor
            .contains_term(&path, &SearchTerm::new("needle"))
            .unwrap());
    }

    #[test]
    fn test_json_serialized_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"project": "Atlas", "budget": 1200, "tags": ["internal"]}"#)
            .unwrap();

        assert!(JsonExtractor
            .contains_term(&path, &SearchTerm::new("atlas"))
            .unwrap());
        // Keys are part of the serialized text.
        assert!(JsonExtractor
            .contains_term(&path, &SearchTerm::new("budget"))
            .unwrap());
        assert!(JsonExtractor
            .contains_term(&path, &SearchTerm::new("1200"))
            .unwrap());
        assert!(!JsonExtractor
            .contains_term(&path, &SearchTerm::new("archived"))
            .unwrap());
    }

    #[test]
    fn test_invalid_json_is_an_extraction_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonExtractor
            .contains_term(&path, &SearchTerm::new("x"))
            .unwrap_err();
        assert!(matches!(err, SearchError::ExtractionFailed { .. }));
    }
}
