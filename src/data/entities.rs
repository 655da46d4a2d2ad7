// ============================================================
// Layer 4 — Entity Extraction
// ============================================================
// Rule-based extraction of drink, size and customizations from a
// raw utterance. The menu keywords are compiled once into
// spelling variants so "cold brew", "coldbrew" and "cold-brew"
// all resolve to the same drink.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::domain::menu::MenuCatalog;

/// Sizes recognised in utterances, in matching priority.
pub const SIZES: [&str; 3] = ["tall", "grande", "venti"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Drink id from the menu
    pub drink:          Option<String>,
    pub size:           Option<String>,
    /// "kind:option" pairs
    pub customizations: Vec<String>,
}

pub struct EntityExtractor {
    /// (drink id, keyword variants) in catalog order
    drink_keywords: Vec<(String, Vec<String>)>,
    /// (kind, option) pairs offered by any drink
    customizations: BTreeSet<(String, String)>,
}

impl EntityExtractor {
    pub fn new(catalog: &MenuCatalog) -> Self {
        let drink_keywords = catalog
            .drink_entries()
            .map(|drink| {
                let variants = drink
                    .keywords
                    .iter()
                    .flat_map(|k| keyword_variants(k))
                    .collect();
                (drink.id.clone(), variants)
            })
            .collect();

        let customizations = catalog
            .drink_entries()
            .flat_map(|drink| drink.customizations.iter())
            .flat_map(|(kind, options)| options.iter().map(move |o| (kind.clone(), o.clone())))
            .collect();

        Self { drink_keywords, customizations }
    }

    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let text = text.to_lowercase();

        let drink = self
            .find_drink_by_phrase(&text)
            .or_else(|| self.find_drink_by_words(&text));

        let size = SIZES
            .iter()
            .find(|size| text.contains(*size))
            .map(|size| size.to_string());

        // The set is ordered and unique, so the result is sorted and deduplicated.
        let customizations = self
            .customizations
            .iter()
            .filter(|(_, option)| text.contains(option.as_str()))
            .map(|(kind, option)| format!("{kind}:{option}"))
            .collect();

        let entities = ExtractedEntities { drink, size, customizations };
        tracing::debug!("Entities in '{}': {:?}", text, entities);
        entities
    }

    /// First drink with any keyword variant contained in the text.
    fn find_drink_by_phrase(&self, text: &str) -> Option<String> {
        self.drink_keywords
            .iter()
            .find(|(_, variants)| variants.iter().any(|v| text.contains(v.as_str())))
            .map(|(id, _)| id.clone())
    }

    /// First drink with a keyword whose words all appear in the text,
    /// in any order ("latte de vainilla" matches "vainilla latte").
    fn find_drink_by_words(&self, text: &str) -> Option<String> {
        let words: HashSet<&str> = text.split_whitespace().collect();
        self.drink_keywords
            .iter()
            .find(|(_, variants)| {
                variants
                    .iter()
                    .any(|v| v.split_whitespace().all(|w| words.contains(w)))
            })
            .map(|(id, _)| id.clone())
    }
}

/// Lowercased keyword, its space-less form and, for multi-word
/// keywords, hyphen and underscore joined forms.
fn keyword_variants(keyword: &str) -> Vec<String> {
    let keyword = keyword.to_lowercase();
    let mut variants = vec![keyword.clone(), keyword.replace(' ', "")];
    if keyword.contains(' ') {
        variants.push(keyword.replace(' ', "-"));
        variants.push(keyword.replace(' ', "_"));
    }
    variants.retain(|v| !v.is_empty());
    variants.dedup();
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        let catalog: MenuCatalog = serde_json::from_str(
            r#"{
            "bebidas": {
                "calientes": [
                    { "id": "latte", "nombre": "Caffè Latte", "categoria": "calientes",
                      "personalizaciones": {"leche": ["almendra", "soya"], "syrups": ["vainilla"]},
                      "keywords": ["latte", "cafe latte"] }
                ],
                "frias": [
                    { "id": "cold_brew", "nombre": "Cold Brew", "categoria": "frias",
                      "personalizaciones": {"shots": ["extra"]},
                      "keywords": ["cold brew", "cafe frio"] }
                ]
            }
        }"#,
        )
        .unwrap();
        EntityExtractor::new(&catalog)
    }

    #[test]
    fn test_keyword_variants() {
        assert_eq!(
            keyword_variants("Cold Brew"),
            vec!["cold brew", "coldbrew", "cold-brew", "cold_brew"]
        );
        assert_eq!(keyword_variants("latte"), vec!["latte"]);
    }

    #[test]
    fn test_extracts_drink_size_and_customizations() {
        let e = extractor().extract("Quiero un LATTE grande con leche de soya y vainilla");
        assert_eq!(e.drink.as_deref(), Some("latte"));
        assert_eq!(e.size.as_deref(), Some("grande"));
        assert_eq!(e.customizations, vec!["leche:soya", "syrups:vainilla"]);
    }

    #[test]
    fn test_matches_compact_spelling() {
        let e = extractor().extract("un coldbrew venti por favor");
        assert_eq!(e.drink.as_deref(), Some("cold_brew"));
        assert_eq!(e.size.as_deref(), Some("venti"));
    }

    #[test]
    fn test_matches_keyword_words_in_any_order() {
        let e = extractor().extract("frio cafe sin azúcar");
        assert_eq!(e.drink.as_deref(), Some("cold_brew"));
    }

    #[test]
    fn test_nothing_found() {
        let e = extractor().extract("hola, buenos días");
        assert_eq!(e, ExtractedEntities::default());
    }
}
