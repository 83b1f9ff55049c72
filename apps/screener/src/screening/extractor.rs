//! Resume text extraction — PDF to cleaned, bounded plain text.
//!
//! Cleaning runs in a fixed order; later steps assume the normalisation done by
//! earlier ones. Everything outside printable ASCII is dropped, so accented names
//! and non-Latin scripts do not survive extraction.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

/// Hard ceiling on the text handed to the completion call, in characters.
pub const MAX_RESUME_CHARS: usize = 15_000;

/// Fewer whitespace-delimited tokens than this is not treated as a real resume.
pub const MIN_RESUME_TOKENS: usize = 10;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_PRINTABLE_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x20-\x7E\n]").unwrap());
static BULLET_GLYPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[•●■◆▪]").unwrap());
static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<lower>[a-z])(?P<upper>[A-Z])").unwrap());
static DASH_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-(?:\s*-)+").unwrap());

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF file not found at path: {0}")]
    NotFound(String),

    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    #[error("No text extracted from PDF")]
    Empty,

    #[error("Extracted text appears to be too short to be a valid resume ({tokens} tokens)")]
    TooShort { tokens: usize },

    #[error("PDF extraction timed out after {0:?}")]
    TimedOut(Duration),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Turns a stored resume into cleaned text ready for prompting.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Blocking PDF-to-text step run on the blocking pool.
type PdfReader = fn(&Path) -> Result<String, String>;

fn read_pdf(path: &Path) -> Result<String, String> {
    pdf_extract::extract_text(path).map_err(|e| e.to_string())
}

/// `pdf-extract` backed extractor. Parsing runs on the blocking pool under a deadline.
pub struct PdfTextExtractor {
    timeout: Duration,
    read: PdfReader,
}

impl PdfTextExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            read: read_pdf,
        }
    }

    #[cfg(test)]
    fn with_reader(timeout: Duration, read: PdfReader) -> Self {
        Self { timeout, read }
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ExtractionError::NotFound(path.display().to_string()));
        }

        let owned: PathBuf = path.to_path_buf();
        let read = self.read;
        let raw = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || read(&owned)),
        )
        .await
        .map_err(|_| ExtractionError::TimedOut(self.timeout))?
        .map_err(|e| ExtractionError::Task(e.to_string()))?
        .map_err(ExtractionError::Pdf)?;

        debug!(raw_chars = raw.len(), "PDF text extracted");

        let cleaned = clean_resume_text(&raw)?;
        info!(chars = cleaned.len(), "Resume text cleaned");
        Ok(cleaned)
    }
}

/// Runs the cleaning pipeline over raw extracted text and enforces the length bounds.
pub fn clean_resume_text(raw: &str) -> Result<String, ExtractionError> {
    if raw.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let text = collapse_whitespace(raw);
    let text = NON_PRINTABLE_ASCII.replace_all(&text, "");
    let text = BULLET_GLYPH.replace_all(&text, "- ");
    let text = text.replace('|', "I");
    let text = CASE_BOUNDARY.replace_all(&text, "$lower $upper");
    let text = DASH_RUN.replace_all(&text, "-");
    let text = text.trim();

    let tokens = text.split_whitespace().count();
    if tokens < MIN_RESUME_TOKENS {
        return Err(ExtractionError::TooShort { tokens });
    }

    Ok(truncate_chars(text, MAX_RESUME_CHARS).to_string())
}

/// Collapses every whitespace run, newlines included, to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\nMachine Learning Engineer\n\n\
        Experience:  4 years building   models with PyTorch and TensorFlow.\n\
        Education: MSc Computer Science.";

    #[test]
    fn test_clean_collapses_whitespace_and_newlines() {
        let cleaned = clean_resume_text(RESUME).unwrap();
        assert!(!cleaned.contains('\n'));
        assert!(!cleaned.contains("  "));
        assert!(cleaned.starts_with("Jane Doe Machine Learning Engineer Experience:"));
    }

    #[test]
    fn test_clean_drops_non_ascii() {
        let raw = "José Müller résumé one two three four five six seven eight nine";
        let cleaned = clean_resume_text(raw).unwrap();
        assert!(cleaned.is_ascii());
        assert!(cleaned.starts_with("Jos Mller rsum one"));
    }

    #[test]
    fn test_bullet_glyphs_are_stripped_with_other_non_ascii() {
        // ASCII stripping runs first, so the glyphs are gone before bullet
        // normalisation and their surrounding spaces are left behind.
        let raw = "Skills • Python ● Rust ■ SQL ◆ Git ▪ Docker and Kubernetes too";
        let cleaned = clean_resume_text(raw).unwrap();
        assert_eq!(cleaned, "Skills  Python  Rust  SQL  Git  Docker and Kubernetes too");
    }

    #[test]
    fn test_pipe_becomes_capital_i() {
        let raw = "| built a recommender | deployed it on Kubernetes at scale for users";
        let cleaned = clean_resume_text(raw).unwrap();
        assert!(cleaned.starts_with("I built a recommender I deployed"));
    }

    #[test]
    fn test_run_together_words_are_split() {
        let raw = "ExperienceMachine learningEngineer at AcmeCorp building models for fun";
        let cleaned = clean_resume_text(raw).unwrap();
        assert!(cleaned.starts_with("Experience Machine learning Engineer at Acme Corp"));
    }

    #[test]
    fn test_acronyms_are_not_split() {
        let raw = "Worked with AWS and GCP and NLP pipelines across many ML teams daily";
        let cleaned = clean_resume_text(raw).unwrap();
        assert!(cleaned.contains("AWS and GCP and NLP"));
    }

    #[test]
    fn test_dash_runs_collapse_to_single_dash() {
        let raw = "Summary --- Skills - - - Python -- Rust and a few more words here";
        let cleaned = clean_resume_text(raw).unwrap();
        assert_eq!(cleaned, "Summary - Skills - Python - Rust and a few more words here");
    }

    #[test]
    fn test_single_dash_is_kept() {
        let raw = "2019 - 2023 Senior Engineer at Example Labs working on vision models";
        let cleaned = clean_resume_text(raw).unwrap();
        assert!(cleaned.starts_with("2019 - 2023"));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(matches!(clean_resume_text(""), Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_short_text_is_rejected_regardless_of_length() {
        let long_words = "Supercalifragilisticexpialidocious ".repeat(9);
        let err = clean_resume_text(&long_words).unwrap_err();
        assert!(matches!(err, ExtractionError::TooShort { tokens: 9 }));
    }

    #[test]
    fn test_ten_tokens_is_enough() {
        let raw = "one two three four five six seven eight nine ten";
        assert_eq!(clean_resume_text(raw).unwrap(), raw);
    }

    #[test]
    fn test_output_is_truncated_to_ceiling() {
        let raw = "word ".repeat(10_000);
        let cleaned = clean_resume_text(&raw).unwrap();
        assert_eq!(cleaned.chars().count(), MAX_RESUME_CHARS);
    }

    #[test]
    fn test_whitespace_collapse_is_idempotent() {
        let samples = [RESUME, "  a\t\tb \r\n c  ", "", "\n\n\n", "already single spaced"];
        for sample in samples {
            let once = collapse_whitespace(sample);
            assert_eq!(collapse_whitespace(&once), once);
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let extractor = PdfTextExtractor::new(Duration::from_secs(5));
        let err = extractor
            .extract(Path::new("/nonexistent/resumes/ghost.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NotFound(_)));
        assert!(err.to_string().contains("ghost.pdf"));
    }

    #[tokio::test]
    async fn test_non_pdf_file_fails_to_parse() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        std::fs::write(file.path(), b"this is not a pdf").unwrap();

        let extractor = PdfTextExtractor::new(Duration::from_secs(5));
        let err = extractor.extract(file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Pdf(_) | ExtractionError::Task(_)
        ));
    }

    fn slow_reader(_: &Path) -> Result<String, String> {
        std::thread::sleep(Duration::from_millis(500));
        Ok("never used".to_string())
    }

    fn fixed_reader(_: &Path) -> Result<String, String> {
        Ok("Jane   Doe\nPython|SQL  MachineLearning engineer --- five years building data pipelines".to_string())
    }

    fn blank_reader(_: &Path) -> Result<String, String> {
        Ok(String::new())
    }

    #[tokio::test]
    async fn test_slow_parse_times_out() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let extractor = PdfTextExtractor::with_reader(Duration::from_millis(20), slow_reader);

        let err = extractor.extract(file.path()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::TimedOut(d) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_parsed_text_is_cleaned() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let extractor = PdfTextExtractor::with_reader(Duration::from_secs(5), fixed_reader);

        let text = extractor.extract(file.path()).await.unwrap();
        assert_eq!(
            text,
            "Jane Doe Python ISQL Machine Learning engineer - five years building data pipelines"
        );
    }

    #[tokio::test]
    async fn test_blank_parse_is_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let extractor = PdfTextExtractor::with_reader(Duration::from_secs(5), blank_reader);

        let err = extractor.extract(file.path()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }
}
