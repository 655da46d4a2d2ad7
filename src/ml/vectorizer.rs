// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// Turns normalised text into a fixed-length feature vector.
//
//   terms:  every unigram and bigram seen while fitting,
//           indexed in lexicographic order
//   idf(t): ln((1 + n_docs) / (1 + df(t))) + 1   (smoothed)
//   x[t]:   count(t) * idf(t), then the vector is L2-normalised
//
// Unigrams are read through a word-level HuggingFace tokenizer
// whose vocabulary is exactly the fitted unigram set. Words the
// vectorizer has never seen come back as [UNK] and contribute
// nothing, neither as unigrams nor inside bigrams.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::str::FromStr;
use tokenizers::Tokenizer;

pub const UNK_TOKEN: &str = "[UNK]";

/// The fitted weights, persisted as `tfidf.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfState {
    /// term → feature index
    pub terms: BTreeMap<String, usize>,
    /// indexed like `terms`
    pub idf:   Vec<f32>,
}

#[derive(Debug)]
pub struct TfIdfVectorizer {
    tokenizer: Tokenizer,
    state:     TfIdfState,
}

impl TfIdfVectorizer {
    /// Fit on already-normalised documents.
    pub fn fit(texts: &[String]) -> Result<Self> {
        if texts.is_empty() {
            bail!("Cannot fit the vectorizer on an empty corpus");
        }

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        let mut words:    BTreeSet<String>        = BTreeSet::new();

        for text in texts {
            let tokens: Vec<&str> = text.split_whitespace().collect();
            words.extend(tokens.iter().map(|t| t.to_string()));

            let unique: BTreeSet<String> = ngrams(&tokens).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            bail!("Vectorizer vocabulary is empty; every document normalised to nothing");
        }

        let n_docs = texts.len() as f32;
        let idf: Vec<f32> = doc_freq
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0)
            .collect();
        let terms: BTreeMap<String, usize> = doc_freq
            .into_keys()
            .enumerate()
            .map(|(i, term)| (term, i))
            .collect();

        let tokenizer = build_word_tokenizer(&words)?;
        tracing::info!(
            "Vectorizer fitted on {} documents: {} words, {} terms",
            texts.len(),
            words.len(),
            terms.len()
        );

        Ok(Self { tokenizer, state: TfIdfState { terms, idf } })
    }

    /// Rebuild a vectorizer from its persisted parts.
    pub fn from_parts(tokenizer: Tokenizer, state: TfIdfState) -> Result<Self> {
        if state.idf.len() != state.terms.len() {
            bail!(
                "Corrupt vectorizer: {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            );
        }
        // Sorted and deduplicated, so this equals 0..len only for a valid index.
        let indices: BTreeSet<usize> = state.terms.values().copied().collect();
        if !indices.into_iter().eq(0..state.terms.len()) {
            bail!("Corrupt vectorizer: term indices must be exactly 0..{}", state.terms.len());
        }
        Ok(Self { tokenizer, state })
    }

    pub fn tokenizer(&self) -> &Tokenizer { &self.tokenizer }

    pub fn state(&self) -> &TfIdfState { &self.state }

    /// Number of features produced by `transform`.
    pub fn n_features(&self) -> usize { self.state.terms.len() }

    /// L2-normalised TF-IDF vector of a normalised text.
    /// Text with no known term yields the zero vector.
    pub fn transform(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

        // Unknown words split bigrams: "[UNK]" never forms a known term.
        let tokens: Vec<&str> = encoding.get_tokens().iter().map(String::as_str).collect();

        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in ngrams(&tokens) {
            if let Some(&idx) = self.state.terms.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features = vec![0.0f32; self.n_features()];
        for (idx, count) in counts {
            features[idx] = count * self.state.idf[idx];
        }

        let norm = features.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            features.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(features)
    }
}

/// Unigrams followed by bigrams; nothing containing `[UNK]`.
fn ngrams<'a>(tokens: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    let unigrams = tokens
        .iter()
        .filter(|t| **t != UNK_TOKEN)
        .map(|t| t.to_string());
    let bigrams = tokens
        .windows(2)
        .filter(|w| w[0] != UNK_TOKEN && w[1] != UNK_TOKEN)
        .map(|w| format!("{} {}", w[0], w[1]));
    unigrams.chain(bigrams)
}

/// Build a WordLevel tokenizer over `words`, splitting on whitespace only.
/// Input is expected to be normalised already, so no normalizer is set.
pub fn build_word_tokenizer(words: &BTreeSet<String>) -> Result<Tokenizer> {
    let mut vocab = serde_json::Map::new();
    vocab.insert(UNK_TOKEN.to_string(), serde_json::json!(0));
    for (i, word) in words.iter().enumerate() {
        vocab.insert(word.clone(), serde_json::json!(i + 1));
    }

    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": 0, "content": UNK_TOKEN, "single_word": false, "lstrip": false,
             "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": null,
        "pre_tokenizer": { "type": "WhitespaceSplit" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": UNK_TOKEN
        }
    });

    Tokenizer::from_str(&tokenizer_json.to_string())
        .map_err(|e| anyhow::anyhow!("Cannot build word tokenizer: {e}"))
}
