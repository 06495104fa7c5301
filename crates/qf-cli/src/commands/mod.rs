//! Subcommand implementations.

pub mod categories;
pub mod play;

use std::path::Path;

use qf_bank::FileBank;

/// Open the question bank directory or explain why it cannot be used.
pub fn open_bank(dir: &Path) -> Result<FileBank, String> {
    FileBank::open(dir).map_err(|e| format!("failed to open question bank: {e}"))
}
