// ============================================================
// Layer 5 — Intent Classifier (inference)
// ============================================================
use anyhow::{bail, Result};
use burn::prelude::*;
use burn::tensor::TensorData;

use crate::domain::traits::{IntentPredictor, Prediction};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{IntentModel, IntentModelConfig};
use crate::ml::vectorizer::TfIdfVectorizer;
use crate::ml::InferBackend;

pub struct IntentClassifier {
    model:          IntentModel<InferBackend>,
    labels:         Vec<String>,
    min_confidence: f32,
    n_features:     usize,
    device:         burn::backend::ndarray::NdArrayDevice,
}

impl IntentClassifier {
    /// Wrap an already-trained model.
    pub fn new(
        model:          IntentModel<InferBackend>,
        labels:         Vec<String>,
        min_confidence: f32,
        n_features:     usize,
    ) -> Self {
        Self { model, labels, min_confidence, n_features, device: Default::default() }
    }

    /// Rebuild the model from `classifier_config.json` and load its weights.
    /// `vectorizer` must be the one the classifier was trained against.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        vectorizer:   &TfIdfVectorizer,
    ) -> Result<Self> {
        let manifest = ckpt_manager.load_manifest()?;
        if manifest.n_features != vectorizer.n_features() {
            bail!(
                "Classifier expects {} features but the vectorizer produces {}. \
                 Run 'train-classifier' again after 'train-vectorizer'.",
                manifest.n_features,
                vectorizer.n_features()
            );
        }

        let device    = burn::backend::ndarray::NdArrayDevice::default();
        let model_cfg = IntentModelConfig::new(manifest.n_features, manifest.labels.len());
        let model: IntentModel<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Classifier loaded: {} intents", manifest.labels.len());

        Ok(Self::new(model, manifest.labels, manifest.min_confidence, manifest.n_features))
    }

    pub fn labels(&self) -> &[String] { &self.labels }

    /// Softmax over the logits of one feature vector.
    pub fn probabilities(&self, features: &[f32]) -> Result<Vec<f32>> {
        let logits = self.model.forward(self.to_tensor(&[features.to_vec()])?);
        burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read probabilities: {e:?}"))
    }

    /// Most likely intent for a feature vector. Empty vectors and
    /// low-confidence predictions map to the unknown intent.
    pub fn predict_features(&self, features: &[f32]) -> Result<Prediction> {
        if features.iter().all(|x| *x == 0.0) {
            return Ok(Prediction::unknown());
        }

        let probs = self.probabilities(features)?;
        let Some((best, &confidence)) = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
        else {
            return Ok(Prediction::unknown());
        };

        if confidence < self.min_confidence {
            tracing::debug!(
                "Low confidence {:.3} for '{}', falling back",
                confidence,
                self.labels[best]
            );
            return Ok(Prediction::unknown());
        }

        Ok(Prediction { intent: self.labels[best].clone(), confidence })
    }

    /// Arg-max label index for every row, no confidence threshold.
    pub fn predict_labels(&self, rows: &[Vec<f32>]) -> Result<Vec<usize>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let logits = self.model.forward(self.to_tensor(rows)?);
        let indices = logits
            .argmax(1)
            .flatten::<1>(0, 1)
            .into_data()
            .to_vec::<i64>()
            .map_err(|e| anyhow::anyhow!("Cannot read predictions: {e:?}"))?;
        Ok(indices.into_iter().map(|i| i as usize).collect())
    }

    fn to_tensor(&self, rows: &[Vec<f32>]) -> Result<Tensor<InferBackend, 2>> {
        if let Some(row) = rows.iter().find(|r| r.len() != self.n_features) {
            bail!("Expected {} features, got {}", self.n_features, row.len());
        }
        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Ok(Tensor::<InferBackend, 2>::from_data(
            TensorData::new(flat, [rows.len(), self.n_features]),
            &self.device,
        ))
    }
}

impl IntentPredictor for IntentClassifier {
    fn predict(&self, _text: &str, features: &[f32]) -> Result<Prediction> {
        self.predict_features(features)
    }
}
