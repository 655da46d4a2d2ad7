// ============================================================
// Layer 4 — Corpus Preparation
// ============================================================
// Builds the text corpus the TF-IDF vectorizer is fitted on:
//
//   menu.json     → keywords, lowercase keywords, item names
//   intents.json  → example phrases + entity values
//        │
//        ▼
//   combine_datasets → normalised, non-empty documents

use std::collections::BTreeSet;

use crate::data::preprocessor::TextNormalizer;
use crate::domain::intent::Intent;
use crate::domain::menu::MenuCatalog;

#[derive(Debug, Clone, Default)]
pub struct DataPreparation {
    normalizer: TextNormalizer,
}

impl DataPreparation {
    pub fn new() -> Self {
        Self { normalizer: TextNormalizer::new() }
    }

    /// Keywords (as written and lowercased) and lowercase names of every
    /// drink and food item. Deduplicated, sorted.
    pub fn prepare_menu_data(&self, catalog: &MenuCatalog) -> Vec<String> {
        let drinks = catalog.drink_entries().map(|d| (&d.name, &d.keywords));
        let foods  = catalog.food_entries().map(|f| (&f.name, &f.keywords));

        let mut corpus = BTreeSet::new();
        for (name, keywords) in drinks.chain(foods) {
            corpus.insert(name.to_lowercase());
            for keyword in keywords {
                corpus.insert(keyword.clone());
                corpus.insert(keyword.to_lowercase());
            }
        }
        corpus.into_iter().collect()
    }

    /// Every example phrase followed by every entity value.
    pub fn prepare_intent_data(&self, intents: &[Intent]) -> Vec<String> {
        intents
            .iter()
            .flat_map(|intent| {
                intent
                    .examples
                    .iter()
                    .chain(intent.entities.values().flatten())
                    .cloned()
            })
            .collect()
    }

    /// Concatenate both corpora and normalise each document.
    /// Documents that normalise to nothing are dropped.
    pub fn combine_datasets(&self, menu_corpus: &[String], intent_corpus: &[String]) -> Vec<String> {
        menu_corpus
            .iter()
            .chain(intent_corpus)
            .map(|text| self.normalizer.normalize(text))
            .filter(|text| !text.is_empty())
            .collect()
    }
}
