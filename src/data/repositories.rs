// ============================================================
// Layer 4 — JSON Repositories
// ============================================================
// Loads menu.json and intents.json on first access and keeps the
// parsed documents in memory for the rest of the process.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::{fs, path::{Path, PathBuf}};

use crate::domain::intent::Intent;
use crate::domain::menu::MenuCatalog;
use crate::domain::traits::{IntentRepository, MenuRepository};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in '{}'", path.display()))
}

/// Menu repository backed by a `menu.json` file.
pub struct JsonMenuRepository {
    path: PathBuf,
    menu: OnceCell<MenuCatalog>,
}

impl JsonMenuRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), menu: OnceCell::new() }
    }
}

impl MenuRepository for JsonMenuRepository {
    fn menu(&self) -> Result<&MenuCatalog> {
        self.menu.get_or_try_init(|| {
            tracing::info!("Loading menu from '{}'", self.path.display());
            let catalog: MenuCatalog = read_json(&self.path)?;
            tracing::info!(
                "Menu loaded: drink categories {:?}, food categories {:?}",
                catalog.drinks.keys().collect::<Vec<_>>(),
                catalog.foods.keys().collect::<Vec<_>>(),
            );
            Ok(catalog)
        })
    }
}

/// Intent repository backed by an `intents.json` file.
pub struct JsonIntentRepository {
    path:    PathBuf,
    intents: OnceCell<Vec<Intent>>,
}

impl JsonIntentRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), intents: OnceCell::new() }
    }

    fn load(&self) -> Result<&Vec<Intent>> {
        self.intents.get_or_try_init(|| {
            let intents: Vec<Intent> = read_json(&self.path)?;
            tracing::info!("Loaded {} intents from '{}'", intents.len(), self.path.display());
            Ok(intents)
        })
    }
}

impl IntentRepository for JsonIntentRepository {
    fn intents(&self) -> Result<Vec<Intent>> {
        Ok(self.load()?.clone())
    }
}
