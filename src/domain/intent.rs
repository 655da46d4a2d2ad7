// ============================================================
// Layer 3 — Intent Domain Type
// ============================================================
// An intent is the purpose behind an utterance ("ordenar_bebida",
// "preguntar_precio", ...). Each one carries example phrases used
// to train the classifier, plus optional entity value lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ORDER_DRINK:   &str = "ordenar_bebida";
pub const ORDER_FOOD:    &str = "ordenar_comida";
pub const ASK_PRICE:     &str = "preguntar_precio";
pub const SHOW_MENU:     &str = "consultar_menu";
pub const CONFIRM_ORDER: &str = "confirmar_orden";
pub const GREETING:      &str = "saludo";

/// Label used when no intent is predicted with enough confidence.
pub const UNKNOWN: &str = "desconocido";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "intent")]
    pub name: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<String>>,
}

impl Intent {
    pub fn new(name: impl Into<String>, examples: Vec<String>) -> Self {
        Self { name: name.into(), examples, entities: BTreeMap::new() }
    }

    /// True when any example occurs inside `text`, ignoring case.
    pub fn matches_example(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.examples
            .iter()
            .any(|example| text.contains(&example.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_example_ignores_case() {
        let intent = Intent::new(ORDER_DRINK, vec!["Quiero un".into(), "me das".into()]);
        assert!(intent.matches_example("QUIERO UN latte grande"));
        assert!(intent.matches_example("¿me das un mocha?"));
        assert!(!intent.matches_example("cuánto cuesta"));
    }

    #[test]
    fn test_deserialize_without_entities() {
        let json = r#"[{"intent": "saludo", "examples": ["hola"]}]"#;
        let intents: Vec<Intent> = serde_json::from_str(json).unwrap();
        assert_eq!(intents[0].name, GREETING);
        assert!(intents[0].entities.is_empty());
    }
}
