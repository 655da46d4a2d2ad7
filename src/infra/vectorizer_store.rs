// ============================================================
// Layer 6 — Vectorizer Store
// ============================================================
// Persists the fitted TF-IDF vectorizer as two files:
//   tokenizer.json — word-level HuggingFace tokenizer (vocabulary)
//   tfidf.json     — term index and idf weights
//
// Layout:
//   <model_dir>/vectorizer/
//     latest/                    ← always the most recent fit
//     archive/20260101_120000/   ← one directory per archived fit
//
// Inference always loads from latest/.

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use tokenizers::Tokenizer;

use crate::ml::vectorizer::{TfIdfState, TfIdfVectorizer};

const TOKENIZER_FILE: &str = "tokenizer.json";
const TFIDF_FILE:     &str = "tfidf.json";

pub struct VectorizerStore {
    latest_dir:  PathBuf,
    archive_dir: PathBuf,
}

impl VectorizerStore {
    pub fn new(model_dir: impl AsRef<Path>) -> Self {
        let base = model_dir.as_ref().join("vectorizer");
        Self {
            latest_dir:  base.join("latest"),
            archive_dir: base.join("archive"),
        }
    }

    /// Write the vectorizer to latest/ and, when `archive` is set, to a
    /// timestamped archive directory as well. Returns the latest/ path.
    pub fn save(&self, vectorizer: &TfIdfVectorizer, archive: bool) -> Result<PathBuf> {
        if archive {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
            let dir   = self.archive_dir.join(stamp);
            write_to(&dir, vectorizer)?;
            tracing::info!("Archived vectorizer to '{}'", dir.display());
        }

        write_to(&self.latest_dir, vectorizer)?;
        Ok(self.latest_dir.clone())
    }

    /// Load the most recent vectorizer.
    pub fn load(&self) -> Result<TfIdfVectorizer> {
        Self::load_from(&self.latest_dir).with_context(|| {
            "No trained vectorizer found. Have you run 'train-vectorizer'?"
        })
    }

    /// Load a vectorizer from any directory holding both files.
    pub fn load_from(dir: &Path) -> Result<TfIdfVectorizer> {
        let tok_path = dir.join(TOKENIZER_FILE);
        let tokenizer = Tokenizer::from_file(&tok_path).map_err(|e| {
            anyhow::anyhow!("Cannot load tokenizer from '{}': {}", tok_path.display(), e)
        })?;

        let tfidf_path = dir.join(TFIDF_FILE);
        let json = fs::read_to_string(&tfidf_path)
            .with_context(|| format!("Cannot read '{}'", tfidf_path.display()))?;
        let state: TfIdfState = serde_json::from_str(&json)
            .with_context(|| format!("Invalid TF-IDF weights in '{}'", tfidf_path.display()))?;

        TfIdfVectorizer::from_parts(tokenizer, state)
    }

    /// Archived fits, oldest first.
    pub fn archived(&self) -> Result<Vec<PathBuf>> {
        if !self.archive_dir.exists() {
            return Ok(Vec::new());
        }
        let mut dirs: Vec<PathBuf> = fs::read_dir(&self.archive_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();
        Ok(dirs)
    }
}

fn write_to(dir: &Path, vectorizer: &TfIdfVectorizer) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create '{}'", dir.display()))?;

    let tok_path = dir.join(TOKENIZER_FILE);
    vectorizer
        .tokenizer()
        .save(&tok_path, true)
        .map_err(|e| anyhow::anyhow!("Cannot write '{}': {e}", tok_path.display()))?;

    let tfidf_path = dir.join(TFIDF_FILE);
    fs::write(&tfidf_path, serde_json::to_string(vectorizer.state())?)
        .with_context(|| format!("Cannot write '{}'", tfidf_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fitted() -> TfIdfVectorizer {
        TfIdfVectorizer::fit(&[
            "quiero latte".to_string(),
            "cuanto cuesta mocha".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_save_then_load_gives_same_vectors() {
        let dir   = TempDir::new().unwrap();
        let store = VectorizerStore::new(dir.path());
        let v     = fitted();

        let path = store.save(&v, false).unwrap();
        assert!(path.join("tokenizer.json").exists());
        assert!(path.join("tfidf.json").exists());
        assert!(store.archived().unwrap().is_empty());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.state(), v.state());
        assert_eq!(
            loaded.transform("quiero mocha").unwrap(),
            v.transform("quiero mocha").unwrap()
        );
    }

    #[test]
    fn test_archive_copy() {
        let dir   = TempDir::new().unwrap();
        let store = VectorizerStore::new(dir.path());
        store.save(&fitted(), true).unwrap();

        let archived = store.archived().unwrap();
        assert_eq!(archived.len(), 1);
        let from_archive = VectorizerStore::load_from(&archived[0]).unwrap();
        assert_eq!(from_archive.n_features(), fitted().n_features());
    }

    #[test]
    fn test_load_without_training_fails() {
        let dir   = TempDir::new().unwrap();
        let store = VectorizerStore::new(dir.path());
        let err   = store.load().unwrap_err();
        assert!(format!("{err:#}").contains("train-vectorizer"));
    }
}
