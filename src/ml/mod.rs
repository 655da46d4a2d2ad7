// ============================================================
// Layer 5 — ML Layer (Burn + tokenizers)
// ============================================================
// Everything numeric lives here:
//
//   vectorizer.rs    — TF-IDF over unigrams and bigrams, with a
//                      word-level tokenizer as its vocabulary
//
//   model.rs         — Linear intent classifier (burn Module)
//
//   trainer.rs       — Adam training loop with per-epoch
//                      validation, metrics and checkpointing
//
//   classifier.rs    — Loads a checkpoint and predicts intents
//
//   nlp_processor.rs — Normalise → extract entities → vectorise,
//                      the per-utterance pipeline used at chat time
//
// Training runs on the CPU: the model is a single linear layer
// over a few hundred features.

pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
pub type InferBackend = burn::backend::NdArray;

/// TF-IDF vectorizer
pub mod vectorizer;

/// Linear intent classifier architecture
pub mod model;

/// Training loop with validation and checkpointing
pub mod trainer;

/// Loads a checkpoint and predicts intents
pub mod classifier;

/// Per-utterance NLP pipeline
pub mod nlp_processor;
