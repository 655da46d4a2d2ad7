// ============================================================
// Layer 3 — Menu Domain Types
// ============================================================
// The menu file groups drinks ("bebidas") and food ("alimentos")
// by category. Field names follow the JSON document, so serde
// renames map them onto English Rust names.
//
// Categories are kept in a BTreeMap: iteration order is the
// alphabetical category order, which makes keyword search and
// entity extraction deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A drink or food item in domain terms, independent of its JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id:             String,
    pub name:           String,
    pub category:       String,
    pub sizes:          Vec<String>,
    pub prices:         BTreeMap<String, f64>,
    pub customizations: BTreeMap<String, Vec<String>>,
    pub keywords:       Vec<String>,
}

impl MenuItem {
    /// Base price for a size, `0.0` when the item is not sold in that size.
    pub fn base_price(&self, size: &str) -> f64 {
        self.prices.get(size).copied().unwrap_or(0.0)
    }

    /// True when `value` is a listed option for the customization `kind`.
    pub fn is_customization_valid(&self, kind: &str, value: &str) -> bool {
        self.customizations
            .get(kind)
            .map(|options| options.iter().any(|o| o == value))
            .unwrap_or(false)
    }

    /// True when `query` (already lowercased) is this item's id or one of its keywords.
    pub fn matches_query(&self, query: &str) -> bool {
        self.id == query || self.keywords.iter().any(|k| k.to_lowercase() == query)
    }
}

// ─── On-disk catalog ──────────────────────────────────────────────────────────

/// A drink entry exactly as stored in `menu.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkEntry {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "tamaños", default)]
    pub sizes: Vec<String>,
    #[serde(rename = "precios", default)]
    pub prices: BTreeMap<String, f64>,
    #[serde(rename = "personalizaciones", default)]
    pub customizations: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A food entry. Most food has a single `precio`; sizes and
/// customizations are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "tamaños", default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(rename = "precios", default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<BTreeMap<String, f64>>,
    #[serde(rename = "personalizaciones", default, skip_serializing_if = "Option::is_none")]
    pub customizations: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl From<&DrinkEntry> for MenuItem {
    fn from(e: &DrinkEntry) -> Self {
        MenuItem {
            id:             e.id.clone(),
            name:           e.name.clone(),
            category:       e.category.clone(),
            sizes:          e.sizes.clone(),
            prices:         e.prices.clone(),
            customizations: e.customizations.clone(),
            keywords:       e.keywords.clone(),
        }
    }
}

impl From<&FoodEntry> for MenuItem {
    fn from(e: &FoodEntry) -> Self {
        let prices = e.prices.clone().unwrap_or_else(|| {
            let mut single = BTreeMap::new();
            single.insert(FOOD_DEFAULT_SIZE.to_string(), e.price.unwrap_or(0.0));
            single
        });
        MenuItem {
            id:             e.id.clone(),
            name:           e.name.clone(),
            category:       e.category.clone(),
            sizes:          e.sizes.clone().unwrap_or_else(|| vec![FOOD_DEFAULT_SIZE.to_string()]),
            prices,
            customizations: e.customizations.clone().unwrap_or_default(),
            keywords:       e.keywords.clone(),
        }
    }
}

/// Size assigned to food that is sold as a single unit.
pub const FOOD_DEFAULT_SIZE: &str = "individual";

/// The whole menu document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuCatalog {
    #[serde(rename = "bebidas", default)]
    pub drinks: BTreeMap<String, Vec<DrinkEntry>>,
    #[serde(rename = "alimentos", default)]
    pub foods: BTreeMap<String, Vec<FoodEntry>>,
}

impl MenuCatalog {
    /// Every drink entry, category by category.
    pub fn drink_entries(&self) -> impl Iterator<Item = &DrinkEntry> {
        self.drinks.values().flatten()
    }

    /// Every food entry, category by category.
    pub fn food_entries(&self) -> impl Iterator<Item = &FoodEntry> {
        self.foods.values().flatten()
    }

    /// First drink whose id or keyword equals `query` (case-insensitive).
    pub fn find_drink(&self, query: &str) -> Option<MenuItem> {
        let query = query.to_lowercase();
        self.drink_entries()
            .map(MenuItem::from)
            .find(|item| item.matches_query(&query))
    }

    /// First food item whose id or keyword equals `query` (case-insensitive).
    pub fn find_food(&self, query: &str) -> Option<MenuItem> {
        let query = query.to_lowercase();
        self.food_entries()
            .map(MenuItem::from)
            .find(|item| item.matches_query(&query))
    }

    /// First food item whose id or a keyword appears anywhere in `text`.
    pub fn find_food_in_text(&self, text: &str) -> Option<MenuItem> {
        let text = text.to_lowercase();
        self.food_entries()
            .find(|f| {
                text.contains(&f.id.to_lowercase())
                    || f.keywords.iter().any(|k| text.contains(&k.to_lowercase()))
            })
            .map(MenuItem::from)
    }
}
