// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the model directory:
//
//   vectorizer_store.rs — TF-IDF vectorizer persistence
//                         (latest/ plus timestamped archive/)
//
//   checkpoint.rs       — Classifier weights via burn's
//                         CompactRecorder, plus the JSON config
//                         needed to rebuild the model
//
//   metrics.rs          — Per-epoch CSV log and the final
//                         classification report

/// Vectorizer saving and loading
pub mod vectorizer_store;

/// Classifier checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger and evaluation report
pub mod metrics;
