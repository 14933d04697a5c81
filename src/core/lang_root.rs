use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LangRootError {
    #[error("no lang folder found (tried: {})", format_tried(.tried))]
    NotFound { tried: Vec<PathBuf> },
}

fn format_tried(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The first candidate that is an existing directory.
pub fn resolve_lang_root(candidates: &[PathBuf]) -> Result<PathBuf, LangRootError> {
    candidates
        .iter()
        .find(|candidate| candidate.is_dir())
        .cloned()
        .ok_or_else(|| LangRootError::NotFound {
            tried: candidates.to_vec(),
        })
}
