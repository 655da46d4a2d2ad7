// ============================================================
// Layer 4 — Intent Batcher
// ============================================================
// Implements Burn's Batcher trait: a Vec<IntentSample> becomes
//   features: [batch_size, n_features]  (float)
//   labels:   [batch_size]              (int)
//
// Every sample has the same feature length (the vectorizer's
// vocabulary size), so the features are flattened row by row
// and reshaped in one go.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::IntentSample;

#[derive(Debug, Clone)]
pub struct IntentBatch<B: Backend> {
    pub features: Tensor<B, 2>,
    pub labels:   Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct IntentBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> IntentBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<IntentSample, IntentBatch<B>> for IntentBatcher<B> {
    fn batch(&self, items: Vec<IntentSample>) -> IntentBatch<B> {
        let batch_size = items.len();
        let n_features = items.first().map(|s| s.features.len()).unwrap_or(0);

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let labels: Vec<i64> = items.iter().map(|s| s.label as i64).collect();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(flat, [batch_size, n_features]),
            &self.device,
        );
        let labels = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels, [batch_size]),
            &self.device,
        );

        IntentBatch { features, labels }
    }
}
