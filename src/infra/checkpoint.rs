// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the intent classifier.
//
// What gets saved:
//   1. model.mpk.gz            — weights (burn CompactRecorder)
//   2. classifier_config.json  — labels, feature count, threshold
//                                and the training hyper-parameters
//   3. report.json             — evaluation on the held-out set
//
// The config is needed before the weights: the model has to be
// rebuilt with the same shape before load_record() can fill it.
//
// File layout:
//   <model_dir>/classifier/
//     model.mpk.gz
//     classifier_config.json
//     report.json
//     metrics.csv            ← written by MetricsLogger

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::application::train_classifier_use_case::TrainClassifierConfig;
use crate::infra::metrics::ClassificationReport;
use crate::ml::model::IntentModel;

const MODEL_FILE:    &str = "model";
const MANIFEST_FILE: &str = "classifier_config.json";
const REPORT_FILE:   &str = "report.json";

/// Everything needed to rebuild the classifier for inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierManifest {
    /// Intent names, indexed by model output
    pub labels:         Vec<String>,
    pub n_features:     usize,
    pub min_confidence: f32,
    pub training:       TrainClassifierConfig,
}

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Checkpoints live under `<model_dir>/classifier`.
    pub fn new(model_dir: impl AsRef<Path>) -> Self {
        Self { dir: model_dir.as_ref().join("classifier") }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    /// True once a training run has written its config.
    pub fn exists(&self) -> bool {
        self.dir.join(MANIFEST_FILE).is_file()
    }

    pub fn save_model<B: Backend>(&self, model: &IntentModel<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        let path = self.dir.join(MODEL_FILE);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .map_err(|e| anyhow::anyhow!(
                "Failed to save checkpoint to '{}': {e:?}", path.display()
            ))?;

        tracing::debug!("Saved classifier weights to '{}'", path.display());
        Ok(())
    }

    /// Load weights into a model of the right shape.
    pub fn load_model<B: Backend>(
        &self,
        model:  IntentModel<B>,
        device: &B::Device,
    ) -> Result<IntentModel<B>> {
        let path = self.dir.join(MODEL_FILE);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load checkpoint '{}'. Have you run 'train-classifier'? ({e:?})",
                path.display()
            ))?;

        Ok(model.load_record(record))
    }

    pub fn save_manifest(&self, manifest: &ClassifierManifest) -> Result<()> {
        self.write_json(MANIFEST_FILE, manifest)
    }

    pub fn load_manifest(&self) -> Result<ClassifierManifest> {
        let path = self.dir.join(MANIFEST_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read '{}'. Make sure you have run 'train-classifier' first.",
                path.display()
            )
        })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid classifier config '{}'", path.display()))
    }

    pub fn save_report(&self, report: &ClassificationReport) -> Result<()> {
        self.write_json(REPORT_FILE, report)
    }

    pub fn load_report(&self) -> Result<ClassificationReport> {
        let path = self.dir.join(REPORT_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        let path = self.dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(value)?)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }
}
