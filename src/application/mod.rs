// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers. No ML math, no printing and no
// direct file access here; only workflow coordination.

// Build the corpus and fit the TF-IDF vectorizer
pub mod train_vectorizer_use_case;

// Split, train and evaluate the intent classifier
pub mod train_classifier_use_case;

// The conversational workflow: classify, then act on the order
pub mod chat_service;

// What the chat service hands back to the presentation layer
pub mod response;
