// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only talks to these traits:
//   - JsonMenuRepository / JsonIntentRepository implement the
//     repositories over JSON files
//   - IntentClassifier (TF-IDF + linear model) and
//     ExampleMatcher (substring matching) implement IntentPredictor

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::intent::{Intent, UNKNOWN};
use crate::domain::menu::{MenuCatalog, MenuItem};

// ─── MenuRepository ───────────────────────────────────────────────────────────
pub trait MenuRepository {
    /// The whole menu document.
    fn menu(&self) -> Result<&MenuCatalog>;

    /// Look up a drink by id or keyword.
    fn search_item(&self, query: &str) -> Result<Option<MenuItem>> {
        Ok(self.menu()?.find_drink(query))
    }

    /// Look up a food item by id or keyword.
    fn search_food_item(&self, query: &str) -> Result<Option<MenuItem>> {
        Ok(self.menu()?.find_food(query))
    }
}

// ─── IntentRepository ─────────────────────────────────────────────────────────
pub trait IntentRepository {
    fn intents(&self) -> Result<Vec<Intent>>;

    fn intent_by_name(&self, name: &str) -> Result<Option<Intent>> {
        Ok(self.intents()?.into_iter().find(|i| i.name == name))
    }
}

// ─── IntentPredictor ──────────────────────────────────────────────────────────
/// Predicted intent with the model's confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub intent:     String,
    pub confidence: f32,
}

impl Prediction {
    pub fn unknown() -> Self {
        Self { intent: UNKNOWN.to_string(), confidence: 0.0 }
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == UNKNOWN
    }
}

/// Anything that can map an utterance to an intent. Implementations
/// may use the raw text, its TF-IDF features, or both.
pub trait IntentPredictor {
    fn predict(&self, text: &str, features: &[f32]) -> Result<Prediction>;
}

/// Predicts the first intent with an example contained in the text.
/// Used when no classifier has been trained yet.
pub struct ExampleMatcher {
    intents: Vec<Intent>,
}

impl ExampleMatcher {
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }
}

impl IntentPredictor for ExampleMatcher {
    fn predict(&self, text: &str, _features: &[f32]) -> Result<Prediction> {
        Ok(self
            .intents
            .iter()
            .find(|intent| intent.matches_example(text))
            .map(|intent| Prediction { intent: intent.name.clone(), confidence: 1.0 })
            .unwrap_or_else(Prediction::unknown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_matcher_falls_back_to_unknown() {
        let matcher = ExampleMatcher::new(vec![
            Intent::new("saludo", vec!["hola".into()]),
            Intent::new("consultar_menu", vec!["menú".into()]),
        ]);
        assert_eq!(matcher.predict("Hola!", &[]).unwrap().intent, "saludo");
        assert_eq!(matcher.predict("ver el MENÚ", &[]).unwrap().intent, "consultar_menu");
        assert!(matcher.predict("adiós", &[]).unwrap().is_unknown());
    }
}
