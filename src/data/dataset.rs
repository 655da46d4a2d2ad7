// ============================================================
// Layer 4 — Intent Dataset
// ============================================================
// Vectorised intent examples behind burn's Dataset trait, plus
// oversampling so every intent has as many samples as the largest.

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One vectorised example: TF-IDF features and the intent index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentSample {
    pub features: Vec<f32>,
    pub label:    usize,
}

pub struct IntentDataset {
    samples: Vec<IntentSample>,
}

impl IntentDataset {
    pub fn new(samples: Vec<IntentSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<IntentSample> for IntentDataset {
    fn get(&self, index: usize) -> Option<IntentSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Oversample every class, cycling through its own examples, until it has
/// as many samples as the largest class.
pub fn balance_classes(samples: Vec<IntentSample>) -> Vec<IntentSample> {
    let mut by_label: BTreeMap<usize, Vec<IntentSample>> = BTreeMap::new();
    for s in samples {
        by_label.entry(s.label).or_default().push(s);
    }

    let target = by_label.values().map(Vec::len).max().unwrap_or(0);
    by_label
        .into_values()
        .flat_map(|group| {
            let n = group.len();
            (0..target).map(move |i| group[i % n].clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(label: usize, x: f32) -> IntentSample {
        IntentSample { features: vec![x], label }
    }

    #[test]
    fn test_balance_oversamples_minority() {
        let balanced = balance_classes(vec![
            sample(0, 1.0), sample(0, 2.0), sample(0, 3.0),
            sample(1, 9.0),
        ]);
        let ones: Vec<_> = balanced.iter().filter(|s| s.label == 1).collect();
        assert_eq!(balanced.len(), 6);
        assert_eq!(ones.len(), 3);
        assert!(ones.iter().all(|s| s.features == vec![9.0]));
    }

    #[test]
    fn test_balance_empty() {
        assert!(balance_classes(Vec::new()).is_empty());
    }

    #[test]
    fn test_dataset_access() {
        let ds = IntentDataset::new(vec![sample(2, 0.5)]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get(0).map(|s| s.label), Some(2));
        assert!(ds.get(1).is_none());
    }
}
