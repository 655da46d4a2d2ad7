// ============================================================
// Layer 5 — NLP Processor
// ============================================================

use anyhow::Result;

use crate::data::entities::{EntityExtractor, ExtractedEntities};
use crate::data::preprocessor::TextNormalizer;
use crate::domain::menu::MenuCatalog;
use crate::ml::vectorizer::TfIdfVectorizer;

/// Per-utterance pipeline: clean the text, pull out entities, vectorise.
pub struct NlpProcessor {
    normalizer: TextNormalizer,
    extractor:  EntityExtractor,
    vectorizer: TfIdfVectorizer,
}

impl NlpProcessor {
    pub fn new(catalog: &MenuCatalog, vectorizer: TfIdfVectorizer) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            extractor:  EntityExtractor::new(catalog),
            vectorizer,
        }
    }

    pub fn preprocess_text(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    pub fn extract_entities(&self, text: &str) -> ExtractedEntities {
        self.extractor.extract(text)
    }

    /// TF-IDF features of already-preprocessed text.
    pub fn prepare_for_classification(&self, processed: &str) -> Result<Vec<f32>> {
        self.vectorizer.transform(processed)
    }

    pub fn process_input(&self, text: &str) -> Result<(Vec<f32>, ExtractedEntities)> {
        let processed = self.preprocess_text(text);
        let entities  = self.extract_entities(text);
        let features  = self.prepare_for_classification(&processed)?;
        Ok((features, entities))
    }
}
