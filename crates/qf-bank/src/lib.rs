//! File-backed question bank.
//!
//! A bank is a directory of category JSON files:
//!
//! ```json
//! {
//!   "category": "Math",
//!   "questions": [
//!     { "q": "What is 2 + 2?", "options": ["3", "4", "5"], "answer": "4" }
//!   ]
//! }
//! ```
//!
//! The category name falls back to the file stem when the `category`
//! field is absent. Question records accept the same loose field
//! spellings as the engine's [`RawQuestion`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use qf_engine::{QuestionSource, RawQuestion, SourceError, SourceResult};

/// Result type for bank loading.
pub type BankResult<T> = Result<T, BankError>;

/// Errors raised while opening a bank directory.
#[derive(Debug, Error)]
pub enum BankError {
    /// The bank path is not a readable directory.
    #[error("not a bank directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Directory scanning failed.
    #[error("failed to scan bank directory")]
    Io(#[from] std::io::Error),

    /// The directory holds no category files at all.
    #[error("no category files in {path}")]
    Empty {
        /// The scanned directory.
        path: PathBuf,
    },
}

/// On-disk shape of one category file.
#[derive(Debug, Deserialize)]
struct CategoryFile {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

/// A directory of category JSON files served as a [`QuestionSource`].
///
/// Files are scanned once at open; their contents are read per fetch,
/// so edits between rounds are picked up without reopening.
#[derive(Debug, Clone)]
pub struct FileBank {
    categories: BTreeMap<String, PathBuf>,
}

impl FileBank {
    /// Scan a directory for `*.json` category files.
    ///
    /// When two files declare the same category name, the one scanned
    /// last wins; directory order decides which that is.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::NotADirectory`] for a missing or non-dir
    /// path, [`BankError::Io`] when scanning fails, and
    /// [`BankError::Empty`] when no category file is found. Files that
    /// do not parse are skipped at this stage; they fail on fetch.
    pub fn open(dir: impl AsRef<Path>) -> BankResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(BankError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let mut categories = BTreeMap::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let name = category_name(&path);
            categories.insert(name, path);
        }

        if categories.is_empty() {
            return Err(BankError::Empty {
                path: dir.to_path_buf(),
            });
        }
        Ok(Self { categories })
    }

    /// Number of questions in one category, for listings.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`QuestionSource::fetch_category`].
    pub fn question_count(&self, name: &str) -> SourceResult<usize> {
        Ok(self.fetch_category(name)?.len())
    }
}

impl QuestionSource for FileBank {
    fn list_categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    fn fetch_category(&self, name: &str) -> SourceResult<Vec<RawQuestion>> {
        let path = self
            .categories
            .get(name)
            .ok_or_else(|| SourceError::UnknownCategory(name.to_string()))?;
        let data = fs::read_to_string(path).map_err(|e| SourceError::Fetch {
            category: name.to_string(),
            reason: e.to_string(),
        })?;
        let file: CategoryFile = serde_json::from_str(&data).map_err(|e| SourceError::Fetch {
            category: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(file.questions)
    }
}

/// The declared category name, or the file stem as fallback.
fn category_name(path: &Path) -> String {
    let declared = fs::read_to_string(path)
        .ok()
        .and_then(|data| serde_json::from_str::<CategoryFile>(&data).ok())
        .and_then(|file| file.category);
    declared.unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) {
        let mut f = fs::File::create(dir.path().join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    fn sample_bank() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "math.json",
            r#"{"category": "Math", "questions": [
                {"q": "2+2?", "options": ["3", "4"], "answer": "4"},
                {"q": "3*3?", "options": ["9", "6"], "ans": "9"}
            ]}"#,
        );
        write_file(
            &dir,
            "geography.json",
            r#"{"questions": [
                {"question": "Capital of France?", "options": ["Paris", "Lyon"], "correct": "Paris"}
            ]}"#,
        );
        dir
    }

    #[test]
    fn lists_declared_and_stem_categories() {
        let dir = sample_bank();
        let bank = FileBank::open(dir.path()).unwrap();
        assert_eq!(bank.list_categories(), vec!["Math", "geography"]);
    }

    #[test]
    fn fetches_questions_with_aliases() {
        let dir = sample_bank();
        let bank = FileBank::open(dir.path()).unwrap();

        let math = bank.fetch_category("Math").unwrap();
        assert_eq!(math.len(), 2);
        assert_eq!(math[1].answer, "9");

        let geo = bank.fetch_category("geography").unwrap();
        assert_eq!(geo[0].prompt, "Capital of France?");
    }

    #[test]
    fn question_count_matches_fetch() {
        let dir = sample_bank();
        let bank = FileBank::open(dir.path()).unwrap();
        assert_eq!(bank.question_count("Math").unwrap(), 2);
    }

    #[test]
    fn unknown_category_errors() {
        let dir = sample_bank();
        let bank = FileBank::open(dir.path()).unwrap();
        assert!(matches!(
            bank.fetch_category("History"),
            Err(SourceError::UnknownCategory(_))
        ));
    }

    #[test]
    fn duplicate_category_names_collapse_to_one() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "math_a.json",
            r#"{"category": "Math", "questions": [
                {"q": "2+2?", "options": ["4", "5"], "answer": "4"}
            ]}"#,
        );
        write_file(
            &dir,
            "math_b.json",
            r#"{"category": "Math", "questions": [
                {"q": "3*3?", "options": ["9", "6"], "answer": "9"},
                {"q": "5-1?", "options": ["4", "3"], "answer": "4"}
            ]}"#,
        );

        let bank = FileBank::open(dir.path()).unwrap();
        assert_eq!(bank.list_categories(), vec!["Math"]);
        // Last scanned file wins; either way the fetch serves exactly
        // one of the two files, never a merge.
        let count = bank.question_count("Math").unwrap();
        assert!(count == 1 || count == 2, "unexpected count: {count}");
    }

    #[test]
    fn non_json_files_ignored() {
        let dir = sample_bank();
        write_file(&dir, "notes.txt", "not a bank file");
        let bank = FileBank::open(dir.path()).unwrap();
        assert_eq!(bank.list_categories().len(), 2);
    }

    #[test]
    fn malformed_file_fails_on_fetch() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "broken.json", "{ not json");
        let bank = FileBank::open(dir.path()).unwrap();
        assert!(matches!(
            bank.fetch_category("broken"),
            Err(SourceError::Fetch { .. })
        ));
    }

    #[test]
    fn missing_directory_errors() {
        assert!(matches!(
            FileBank::open("/definitely/not/here"),
            Err(BankError::NotADirectory { .. })
        ));
    }

    #[test]
    fn empty_directory_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            FileBank::open(dir.path()),
            Err(BankError::Empty { .. })
        ));
    }

    #[test]
    fn builds_a_round_end_to_end() {
        let dir = sample_bank();
        let bank = FileBank::open(dir.path()).unwrap();

        use qf_engine::{RoundConfig, build_round};
        use rand::SeedableRng;
        let config = RoundConfig::mix();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let round = build_round(&config, &bank, &mut rng).unwrap();
        assert_eq!(round.len(), 3);
        assert!(round.iter().all(|q| q.category.is_some()));
    }
}
