// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the JSON files on disk and the tensor
// batches the trainer consumes:
//
//   menu.json / intents.json
//       │
//       ▼
//   Json*Repository   → parsed, cached domain documents
//       │
//       ▼
//   DataPreparation   → corpus for the TF-IDF vectorizer
//       │
//       ▼
//   TextNormalizer    → lowercase, accents, punctuation, stop words
//       │
//       ▼
//   IntentDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   IntentBatcher     → stacks samples into tensor batches
//
// EntityExtractor sits beside the pipeline: it reads raw
// utterances at chat time, not training data.

/// JSON-backed menu and intent repositories
pub mod repositories;

/// Text cleaning and stop-word removal
pub mod preprocessor;

/// Corpus construction for the vectorizer
pub mod corpus;

/// Drink / size / customization extraction
pub mod entities;

/// Implements Burn's Dataset trait for intent samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/test sets
pub mod splitter;
