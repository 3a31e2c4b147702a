use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::trace;
use zip::ZipArchive;

use super::Extractor;
use crate::errors::{SearchError, SearchResult};
use crate::matcher::SearchTerm;

/// Word document extractor: paragraph text from `word/document.xml`.
pub struct WordExtractor;

/// Presentation extractor: text runs from every `ppt/slides/slide*.xml`.
pub struct SlideExtractor;

impl Extractor for WordExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let mut archive = open_archive(path)?;
        let xml = read_entry(&mut archive, "word/document.xml", path)?;
        paragraphs_contain(&xml, b"w:p", term)
            .map_err(|e| SearchError::extraction_failed(path, &e))
    }
}

impl Extractor for SlideExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let mut archive = open_archive(path)?;

        let slide_names: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
            .map(String::from)
            .collect();
        if slide_names.is_empty() {
            return Ok(term.is_empty());
        }

        for name in slide_names {
            let xml = read_entry(&mut archive, &name, path)?;
            if paragraphs_contain(&xml, b"a:p", term)
                .map_err(|e| SearchError::extraction_failed(path, &e))?
            {
                trace!("Match in {} of {}", name, path.display());
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn open_archive(path: &Path) -> SearchResult<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| SearchError::extraction_failed(path, &e))?;
    ZipArchive::new(file).map_err(|e| SearchError::extraction_failed(path, &e))
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str, path: &Path) -> SearchResult<String> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| SearchError::extraction_failed(path, &e))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| SearchError::extraction_failed(path, &e))?;
    Ok(xml)
}

/// Tests text runs accumulated per paragraph, stopping at the first
/// paragraph that contains the term.
///
/// Runs within one paragraph are concatenated before testing, so a term
/// split across formatting runs still matches. The trailing buffer is
/// tested at end of input, which also makes an empty term match a part
/// with no paragraphs at all.
fn paragraphs_contain(
    xml: &str,
    paragraph_tag: &[u8],
    term: &SearchTerm,
) -> Result<bool, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraph = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => paragraph.push_str(&t.unescape()?),
            Event::End(e) if e.name().as_ref() == paragraph_tag => {
                if term.is_contained_in(&paragraph) {
                    return Ok(true);
                }
                paragraph.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(term.is_contained_in(&paragraph))
}
