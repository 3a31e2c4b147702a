use quick_xml::events::Event;
use quick_xml::Reader;
use scraper::Html;
use std::fs;
use std::path::Path;

use super::Extractor;
use crate::errors::{SearchError, SearchResult};
use crate::matcher::SearchTerm;

/// XML extractor: element text nodes, tested node by node.
///
/// Attribute values and tag names are not searched; only text content is.
pub struct XmlExtractor;

/// HTML extractor: visible text after markup removal.
pub struct HtmlExtractor;

/// Markdown extractor: converted to HTML, then searched as visible text.
pub struct MarkdownExtractor;

impl Extractor for XmlExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let contents = read_lossy(path)?;
        let mut reader = Reader::from_str(&contents);
        loop {
            let event = reader
                .read_event()
                .map_err(|e| SearchError::extraction_failed(path, &e))?;
            match event {
                Event::Text(t) => {
                    let text = t
                        .unescape()
                        .map_err(|e| SearchError::extraction_failed(path, &e))?;
                    if term.is_contained_in(&text) {
                        return Ok(true);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(term.is_empty())
    }
}

impl Extractor for HtmlExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let contents = read_lossy(path)?;
        Ok(term.is_contained_in(&visible_text(&contents)))
    }
}

impl Extractor for MarkdownExtractor {
    fn contains_term(&self, path: &Path, term: &SearchTerm) -> SearchResult<bool> {
        let contents = read_lossy(path)?;
        let parser = pulldown_cmark::Parser::new(&contents);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);
        Ok(term.is_contained_in(&visible_text(&html)))
    }
}

fn read_lossy(path: &Path) -> SearchResult<String> {
    let bytes = fs::read(path).map_err(|e| SearchError::extraction_failed(path, &e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Concatenates the text nodes of an HTML document, dropping all markup.
/// The parser is error-tolerant, so malformed HTML degrades rather than
/// failing the file.
fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document.root_element().text().collect()
}
