// ============================================================
// Layer 2 — TrainVectorizerUseCase
// ============================================================
// Fits the TF-IDF vectorizer used by both training and chat:
//
//   Step 1: Load menu.json and intents.json   (Layer 4 - data)
//   Step 2: Build menu and intent corpora     (Layer 4 - data)
//   Step 3: Combine and normalise             (Layer 4 - data)
//   Step 4: Fit tokenizer + idf weights       (Layer 5 - ml)
//   Step 5: Persist latest/ (+ archive/)      (Layer 6 - infra)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    corpus::DataPreparation,
    repositories::{JsonIntentRepository, JsonMenuRepository},
};
use crate::domain::traits::{IntentRepository, MenuRepository};
use crate::infra::vectorizer_store::VectorizerStore;
use crate::ml::vectorizer::TfIdfVectorizer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainVectorizerConfig {
    /// Directory holding menu.json and intents.json
    pub data_dir:  String,
    pub model_dir: String,
    /// Also keep a timestamped copy under vectorizer/archive/
    pub archive:   bool,
}

impl Default for TrainVectorizerConfig {
    fn default() -> Self {
        Self {
            data_dir:  "data".to_string(),
            model_dir: "models".to_string(),
            archive:   false,
        }
    }
}

pub struct TrainVectorizerUseCase {
    config: TrainVectorizerConfig,
}

impl TrainVectorizerUseCase {
    pub fn new(config: TrainVectorizerConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline and return the directory the vectorizer was saved to.
    pub fn execute(&self) -> Result<PathBuf> {
        self.run().map_err(|e| {
            tracing::error!("Vectorizer training failed: {e:#}");
            e
        })
    }

    fn run(&self) -> Result<PathBuf> {
        let cfg  = &self.config;
        let data = PathBuf::from(&cfg.data_dir);

        // ── Step 1: Load source documents ────────────────────────────────────
        let menu_repo   = JsonMenuRepository::new(data.join("menu.json"));
        let intent_repo = JsonIntentRepository::new(data.join("intents.json"));
        let catalog = menu_repo.menu()?;
        let intents = intent_repo.intents()?;

        // ── Step 2-3: Build the corpus ───────────────────────────────────────
        let prep          = DataPreparation::new();
        let menu_corpus   = prep.prepare_menu_data(catalog);
        let intent_corpus = prep.prepare_intent_data(&intents);
        tracing::info!(
            "Prepared {} menu terms and {} intent phrases",
            menu_corpus.len(),
            intent_corpus.len()
        );

        let corpus = prep.combine_datasets(&menu_corpus, &intent_corpus);
        tracing::info!("Combined corpus: {} documents", corpus.len());

        // ── Step 4: Fit ──────────────────────────────────────────────────────
        let vectorizer = TfIdfVectorizer::fit(&corpus)?;
        tracing::info!("Vectorizer fitted: {} features", vectorizer.n_features());

        // ── Step 5: Persist ──────────────────────────────────────────────────
        let store = VectorizerStore::new(&cfg.model_dir);
        let path  = store.save(&vectorizer, cfg.archive)?;
        tracing::info!("Vectorizer saved to '{}'", path.display());

        Ok(path)
    }
}
