use std::path::{Path, PathBuf};

/// Files without a recognized extension are still searched as plain text
/// once they reach this size; below it they are ignored entirely.
pub const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Format classification for a candidate file.
///
/// Closed set: every variant except `Ignored` resolves to exactly one
/// extractor in the registry, and the compiler checks that mapping stays
/// exhaustive when a variant is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Presentation,
    Spreadsheet,
    WordDoc,
    PlainText,
    Csv,
    Xml,
    Html,
    Markdown,
    Json,
    /// No recognized extension, but large enough to be worth a raw text scan.
    LargeUnclassified,
    /// Not a candidate: small file with an unrecognized extension.
    Ignored,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Presentation => "presentation",
            FileKind::Spreadsheet => "spreadsheet",
            FileKind::WordDoc => "word",
            FileKind::PlainText => "text",
            FileKind::Csv => "csv",
            FileKind::Xml => "xml",
            FileKind::Html => "html",
            FileKind::Markdown => "markdown",
            FileKind::Json => "json",
            FileKind::LargeUnclassified => "large-unclassified",
            FileKind::Ignored => "ignored",
        }
    }
}

/// Derives the classification for a file from its extension and size.
///
/// Pure and total: extension lookup is case-insensitive against a fixed
/// table; an unrecognized extension yields `LargeUnclassified` at or above
/// the 10 MiB threshold and `Ignored` below it.
pub fn classify(path: &Path, size: u64) -> FileKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => FileKind::Pdf,
        "pptx" => FileKind::Presentation,
        "xlsx" | "xls" => FileKind::Spreadsheet,
        "docx" | "doc" => FileKind::WordDoc,
        "txt" | "rtf" | "odt" | "ods" => FileKind::PlainText,
        "csv" => FileKind::Csv,
        "xml" => FileKind::Xml,
        "html" | "htm" => FileKind::Html,
        "md" => FileKind::Markdown,
        "json" => FileKind::Json,
        _ if size >= LARGE_FILE_THRESHOLD => FileKind::LargeUnclassified,
        _ => FileKind::Ignored,
    }
}

/// A file discovered by the scanner, classified exactly once.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size: u64,
    pub kind: FileKind,
}

impl FileRecord {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let kind = classify(&path, size);
        Self { path, size, kind }
    }
}
