use ignore::WalkBuilder;
use std::path::Path;
use tracing::trace;

use crate::classify::{FileKind, FileRecord};

/// Walks a directory tree and yields a classified record for every regular
/// file that is a search candidate.
///
/// The walk is lazy and best-effort: unreadable subdirectories and entries
/// that fail to stat are skipped rather than failing the enumeration, and
/// symlinked directories are not followed, so link cycles terminate. Files
/// classified `Ignored` never leave this function. Hidden files and
/// gitignore rules are deliberately not filtered; every reachable file is a
/// candidate.
///
/// Ordering is depth-first in directory-listing order; each file appears
/// exactly once.
pub fn scan(root: &Path) -> impl Iterator<Item = FileRecord> {
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter_map(|entry| {
            let size = entry.metadata().map(|m| m.len()).ok()?;
            let record = FileRecord::new(entry.into_path(), size);
            if record.kind == FileKind::Ignored {
                trace!("Skipping unclassified file: {}", record.path.display());
                None
            } else {
                Some(record)
            }
        })
}
