// ============================================================
// Layer 5 — Intent Model
// ============================================================
// One linear layer from TF-IDF features to intent logits,
// trained with cross-entropy.

use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally; adding them again gives conflicting impls.
#[derive(Config, Debug)]
pub struct IntentModelConfig {
    /// Vectorizer vocabulary size
    pub n_features: usize,
    pub n_intents:  usize,
}

impl IntentModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> IntentModel<B> {
        let linear = LinearConfig::new(self.n_features, self.n_intents).init(device);
        IntentModel { linear }
    }
}

/// Linear classifier over TF-IDF features: one score per intent.
#[derive(Module, Debug)]
pub struct IntentModel<B: Backend> {
    pub linear: Linear<B>,
}

impl<B: Backend> IntentModel<B> {
    /// features: [batch, n_features] → logits: [batch, n_intents]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        self.linear.forward(features)
    }

    /// Cross-entropy of the logits against the intent labels.
    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        labels:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(features);
        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(logits.clone(), labels);
        (loss, logits)
    }
}
