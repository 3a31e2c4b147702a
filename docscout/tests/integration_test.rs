use anyhow::Result;
use docscout::{SearchCoordinator, SearchTerm};
use std::fs::{self, File};
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn coordinator(threads: usize) -> SearchCoordinator {
    SearchCoordinator::new(NonZeroUsize::new(threads).unwrap()).unwrap()
}

fn write_docx(path: &Path, paragraphs: &[&str]) -> Result<()> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\"?><w:document><w:body>{}</w:body></w:document>",
        body
    );
    let mut zip = ZipWriter::new(File::create(path)?);
    zip.start_file("word/document.xml", SimpleFileOptions::default())?;
    zip.write_all(xml.as_bytes())?;
    zip.finish()?;
    Ok(())
}

fn write_pptx(path: &Path, slides: &[&str]) -> Result<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    for (i, text) in slides.iter().enumerate() {
        let xml = format!(
            "<?xml version=\"1.0\"?><p:sld><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sld>",
            text
        );
        zip.start_file(
            format!("ppt/slides/slide{}.xml", i + 1),
            SimpleFileOptions::default(),
        )?;
        zip.write_all(xml.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

/// A tree mixing most supported formats, with the term planted in some.
fn build_mixed_tree(root: &Path) -> Result<Vec<&'static str>> {
    fs::create_dir_all(root.join("sub/deeper"))?;

    fs::write(root.join("plain.txt"), "the needle sits in plain text")?;
    fs::write(root.join("other.txt"), "nothing to see")?;
    fs::write(root.join("notes.md"), "# Notes\n\nA **needle** in markdown.\n")?;
    fs::write(root.join("sub/data.json"), r#"{"tool": "needle", "count": 3}"#)?;
    fs::write(root.join("sub/table.csv"), "item,qty\nneedle,12\nthread,3\n")?;
    fs::write(
        root.join("sub/deeper/page.html"),
        "<html><body><p>a <b>nee</b>dle in markup</p></body></html>",
    )?;
    fs::write(
        root.join("sub/deeper/feed.xml"),
        "<feed><entry>no match</entry><entry>needle point</entry></feed>",
    )?;
    write_docx(root.join("memo.docx").as_path(), &["agenda", "bring the Needle"])?;
    write_pptx(root.join("deck.pptx").as_path(), &["intro", "NEEDLE slide"])?;

    // Candidates that never match the planted term.
    fs::write(root.join("sub/readme.md"), "# Empty\n")?;
    fs::write(root.join("sub/clean.json"), r#"{"ok": true}"#)?;

    // Not candidates at all: unrecognized small files.
    fs::write(root.join("binary.bin"), [0u8, 1, 2, 3])?;
    fs::write(root.join("no_extension"), "needle but ignored")?;

    Ok(vec![
        "plain.txt",
        "notes.md",
        "data.json",
        "table.csv",
        "page.html",
        "feed.xml",
        "memo.docx",
        "deck.pptx",
    ])
}

fn matched_names(report: &docscout::SearchReport) -> Vec<String> {
    let mut names: Vec<String> = report
        .matches
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_search_across_formats() -> Result<()> {
    let dir = tempdir()?;
    let mut expected = build_mixed_tree(dir.path())?;
    expected.sort_unstable();

    let report = coordinator(4).search(dir.path(), &SearchTerm::new("needle"))?;

    assert_eq!(matched_names(&report), expected);
    assert!(report.failures.is_empty());
    Ok(())
}

#[test]
fn test_case_insensitivity_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    build_mixed_tree(dir.path())?;

    let c = coordinator(4);
    let lower = c.search(dir.path(), &SearchTerm::new("needle"))?;
    let upper = c.search(dir.path(), &SearchTerm::new("NEEDLE"))?;
    let mixed = c.search(dir.path(), &SearchTerm::new("NeEdLe"))?;

    assert_eq!(lower.matches, upper.matches);
    assert_eq!(lower.matches, mixed.matches);
    Ok(())
}

#[test]
fn test_empty_term_matches_every_candidate() -> Result<()> {
    let dir = tempdir()?;
    build_mixed_tree(dir.path())?;

    let report = coordinator(4).search(dir.path(), &SearchTerm::new(""))?;

    // Every classified file matches, including the ones the planted term
    // never touched; the two unclassified files stay out.
    assert_eq!(report.matches.len(), report.files_searched);
    assert_eq!(report.files_searched, 11);
    Ok(())
}

#[test]
fn test_fault_isolation() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("one.txt"), "needle one")?;
    fs::write(dir.path().join("two.txt"), "needle two")?;
    fs::write(dir.path().join("three.txt"), "unrelated")?;
    // One corrupted file of a recognized format.
    fs::write(dir.path().join("broken.docx"), "not a zip archive at all")?;

    let report = coordinator(4).search(dir.path(), &SearchTerm::new("needle"))?;

    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.files_searched, 4);
    Ok(())
}

#[test]
fn test_pool_sizes_agree() -> Result<()> {
    let dir = tempdir()?;
    build_mixed_tree(dir.path())?;

    let term = SearchTerm::new("needle");
    let single = coordinator(1).search(dir.path(), &term)?;
    let pooled = coordinator(8).search(dir.path(), &term)?;

    assert_eq!(single.matches, pooled.matches);
    Ok(())
}

#[test]
fn test_fresh_scan_sees_new_files() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.txt"), "needle")?;

    let c = coordinator(2);
    let term = SearchTerm::new("needle");
    let first = c.search(dir.path(), &term)?;
    assert_eq!(first.matches.len(), 1);

    // No caching across searches: a file added between searches is found.
    fs::write(dir.path().join("b.txt"), "another needle")?;
    let second = c.search(dir.path(), &term)?;
    assert_eq!(second.matches.len(), 2);
    Ok(())
}

#[test]
fn test_matches_are_absolute_paths_under_root() -> Result<()> {
    let dir = tempdir()?;
    build_mixed_tree(dir.path())?;

    let report = coordinator(2).search(dir.path(), &SearchTerm::new("needle"))?;
    let root: PathBuf = dir.path().to_path_buf();
    for path in &report.matches {
        assert!(path.is_absolute());
        assert!(path.starts_with(&root));
    }
    Ok(())
}
