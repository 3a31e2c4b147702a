use colored::Colorize;
use crossbeam_channel::Receiver;
use indicatif::ProgressBar;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{SearchError, SearchResult};
use crate::matcher::SearchTerm;
use crate::results::SearchReport;
use crate::search::SearchCoordinator;

/// One line of user input, or the interrupt that ends the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    Interrupted,
}

/// Opaque line-input provider.
///
/// Any prompt implementation satisfies the contract as long as it returns a
/// plain string per prompt and maps its interrupt gesture to
/// `InputEvent::Interrupted`. Prompt history and completion are the
/// provider's business.
pub trait LineInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent>;
}

/// Request to change the search directory, delivered on a dedicated channel
/// the session polls between states. Never acted on mid-search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeDirectory;

enum Step {
    Continue,
    Exit,
}

/// Validates that `path` names an existing, readable directory and resolves
/// it to an absolute path.
pub fn validate_directory(path: &Path) -> SearchResult<PathBuf> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SearchError::directory_not_found(path))
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(SearchError::permission_denied(path))
        }
        Err(e) => return Err(SearchError::IoError(e)),
    };
    if !metadata.is_dir() {
        return Err(SearchError::not_a_directory(path));
    }
    // Probe readability up front so the failure surfaces here, where it can
    // be re-prompted, rather than as a failed search later.
    fs::read_dir(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => SearchError::permission_denied(path),
        _ => SearchError::IoError(e),
    })?;
    fs::canonicalize(path).map_err(SearchError::IoError)
}

/// The interactive control loop.
///
/// Owns the current search directory and drives the coordinator: acquire a
/// directory, then repeatedly accept a term, search, display, until the
/// user interrupts. Directory-change requests arrive asynchronously on the
/// channel and are honored once the loop is back at the prompt; an
/// in-flight search always finishes against the directory it started with,
/// and the old directory stays in effect until a replacement validates.
pub struct Session<I: LineInput> {
    input: I,
    coordinator: SearchCoordinator,
    change_requests: Receiver<ChangeDirectory>,
    directory: Option<PathBuf>,
}

impl<I: LineInput> Session<I> {
    pub fn new(
        input: I,
        coordinator: SearchCoordinator,
        change_requests: Receiver<ChangeDirectory>,
    ) -> Self {
        Self {
            input,
            coordinator,
            change_requests,
            directory: None,
        }
    }

    /// Seeds the session with a directory, skipping the initial prompt if
    /// it validates at startup.
    pub fn with_directory(mut self, dir: &Path) -> Self {
        self.directory = Some(dir.to_path_buf());
        self
    }

    /// The directory searches currently run against.
    pub fn current_directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Runs the session until the user interrupts.
    pub fn run(&mut self) -> SearchResult<()> {
        let mut dir = match self.startup_directory()? {
            Some(dir) => dir,
            None => {
                self.farewell();
                return Ok(());
            }
        };
        self.directory = Some(dir.clone());

        println!("\nDirectory set to: {}", dir.display());
        println!("You can now perform repeated case-insensitive searches in this directory.");
        println!(
            "Supported file types: PDF, PPTX, XLSX, XLS, DOCX, DOC, TXT, RTF, ODT, ODS, CSV, XML, HTML, HTM, MD, JSON"
        );
        println!("Press Ctrl+C to exit, or Ctrl+Z to change directory.");

        loop {
            // Honor any change request that arrived since the last prompt,
            // including during the previous search.
            if self.change_requested() {
                match self.change_directory(&mut dir)? {
                    Step::Continue => continue,
                    Step::Exit => break,
                }
            }

            match self
                .input
                .read_line("\nEnter the search term (or press Ctrl+C to exit)")?
            {
                InputEvent::Line(raw) => self.run_search(&dir, raw.trim()),
                InputEvent::Interrupted => {
                    // A change request can knock the prompt out with an
                    // interrupted read; distinguish that from the exit
                    // gesture before ending the session.
                    if self.change_requested() {
                        match self.change_directory(&mut dir)? {
                            Step::Continue => continue,
                            Step::Exit => break,
                        }
                    }
                    break;
                }
            }
        }

        self.farewell();
        Ok(())
    }

    /// Resolves the initial directory: the seed if it validates, otherwise
    /// the acquisition prompt. `None` means the user interrupted.
    fn startup_directory(&mut self) -> SearchResult<Option<PathBuf>> {
        if let Some(seed) = self.directory.take() {
            match validate_directory(&seed) {
                Ok(dir) => return Ok(Some(dir)),
                Err(err) => {
                    eprintln!("{}", format!("Error: {}", err).red());
                }
            }
        }
        self.acquire_directory()
    }

    /// Prompts until a valid directory is obtained or the user interrupts.
    /// Each rejection prints its own diagnostic; the loop never fails.
    fn acquire_directory(&mut self) -> SearchResult<Option<PathBuf>> {
        loop {
            match self.input.read_line("Enter the directory path to search")? {
                InputEvent::Interrupted => return Ok(None),
                InputEvent::Line(raw) => match validate_directory(Path::new(raw.trim())) {
                    Ok(dir) => return Ok(Some(dir)),
                    Err(err) => {
                        eprintln!("{}", format!("Error: {}", err).red());
                        eprintln!("Please try again.");
                    }
                },
            }
        }
    }

    fn change_requested(&self) -> bool {
        let mut requested = false;
        // Drain duplicates; several signals collapse into one change.
        while self.change_requests.try_recv().is_ok() {
            requested = true;
        }
        requested
    }

    /// Replaces the search directory. The old value is kept until a new one
    /// fully validates; an interrupt here ends the session.
    fn change_directory(&mut self, dir: &mut PathBuf) -> SearchResult<Step> {
        println!("\n\nChanging search directory...");
        match self.acquire_directory()? {
            Some(new_dir) => {
                info!("Directory changed from {} to {}", dir.display(), new_dir.display());
                *dir = new_dir.clone();
                self.directory = Some(new_dir);
                println!("\nDirectory changed to: {}", dir.display());
                println!("You can now perform searches in the new directory.");
                println!("Press Ctrl+C to exit, or Ctrl+Z to change directory again.");
                Ok(Step::Continue)
            }
            None => Ok(Step::Exit),
        }
    }

    /// One full search: announce, scatter-gather, display. Search failures
    /// are reported and the loop continues.
    fn run_search(&mut self, dir: &Path, raw_term: &str) {
        let term = SearchTerm::new(raw_term);
        println!(
            "\nSearching for '{}' (case-insensitive) in '{}'...",
            raw_term,
            dir.display()
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Searching...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let outcome = self.coordinator.search(dir, &term);
        spinner.finish_and_clear();

        match outcome {
            Ok(report) => self.display(&report, raw_term),
            Err(err) => {
                eprintln!("{}", format!("Search failed: {}", err).red());
            }
        }
    }

    fn display(&self, report: &SearchReport, raw_term: &str) {
        debug!(
            "Displaying {} matches from {} files",
            report.matches.len(),
            report.files_searched
        );
        if report.has_matches() {
            println!("\nFiles containing '{}' (case-insensitive):", raw_term);
            for path in &report.matches {
                println!("{}", path.display().to_string().blue());
            }
        } else {
            println!(
                "\nNo files containing '{}' (case-insensitive) were found.",
                raw_term
            );
        }
        if !report.failures.is_empty() {
            eprintln!(
                "{}",
                format!(
                    "Note: {} file(s) could not be read and were skipped.",
                    report.failures.len()
                )
                .yellow()
            );
        }
        println!("\n{}", "-".repeat(50));
    }

    fn farewell(&self) {
        println!("\n\nSearch terminated by user. Goodbye!");
    }
}
