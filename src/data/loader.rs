//! Results Loader Module
//! Loads and decodes survey-results exports from disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis;
use crate::data::SurveyDocument;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to read results file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode results file: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no survey loaded")]
    NoData,
}

/// Holds the currently loaded survey document.
pub struct ResultsLoader {
    document: Option<SurveyDocument>,
    file_path: Option<PathBuf>,
}

impl Default for ResultsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsLoader {
    pub fn new() -> Self {
        Self {
            document: None,
            file_path: None,
        }
    }

    /// Read, decode, and normalize an export so every question carries
    /// ready-to-chart records. Does not touch loader state; used from
    /// background threads.
    pub fn load_from_path(path: &Path) -> Result<SurveyDocument, LoaderError> {
        let text = fs::read_to_string(path)?;
        let mut document: SurveyDocument = serde_json::from_str(&text)?;
        analysis::normalize_document(&mut document);
        Ok(document)
    }

    /// Load an export into this loader.
    pub fn load_file(&mut self, path: &Path) -> Result<&SurveyDocument, LoaderError> {
        let document = Self::load_from_path(path)?;
        self.file_path = Some(path.to_path_buf());
        self.document = Some(document);
        self.document.as_ref().ok_or(LoaderError::NoData)
    }

    /// Set the document directly (used for async loading).
    pub fn set_document(&mut self, document: SurveyDocument, path: PathBuf) {
        self.document = Some(document);
        self.file_path = Some(path);
    }

    pub fn document(&self) -> Option<&SurveyDocument> {
        self.document.as_ref()
    }

    /// Question texts, in export order, for the question selector.
    pub fn question_titles(&self) -> Vec<String> {
        self.document
            .as_ref()
            .map(|doc| doc.questions.iter().map(|q| q.text.clone()).collect())
            .unwrap_or_default()
    }

    pub fn question_count(&self) -> usize {
        self.document
            .as_ref()
            .map(|d| d.questions.len())
            .unwrap_or(0)
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
