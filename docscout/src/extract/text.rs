use memmap2::Mmap;
use std::fs::{self, File};
use std::path::Path;
use tracing::trace;

use super::Extractor;
use crate::classify::LARGE_FILE_THRESHOLD;
use crate::errors::{SearchError, SearchResult};
use crate::matcher::SearchTerm;

/// Raw text extractor for plain-text files and large unclassified files.
///
/// Bytes are decoded lossily: invalid UTF-8 sequences are replaced rather
/// than failing the file. Files at or above the large-file threshold are
/// memory-mapped instead of read into a buffer.
pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let size = fs::metadata(path)
            .map_err(|e| SearchError::extraction_failed(path, &e))?
            .len();

        if size >= LARGE_FILE_THRESHOLD {
            trace!("Memory-mapping large file: {}", path.display());
            let file = File::open(path).map_err(|e| SearchError::extraction_failed(path, &e))?;
            let mmap =
                unsafe { Mmap::map(&file) }.map_err(|e| SearchError::extraction_failed(path, &e))?;
            let contents = String::from_utf8_lossy(&mmap);
            Ok(term.is_contained_in(&contents))
        } else {
            let bytes = fs::read(path).map_err(|e| SearchError::extraction_failed(path, &e))?;
            let contents = String::from_utf8_lossy(&bytes);
            Ok(term.is_contained_in(&contents))
        }
    }
}
