// ============================================================
// Layer 2 — TrainClassifierUseCase
// ============================================================
// Trains the intent classifier on top of a fitted vectorizer:
//
//   Step 1: Load intents + latest vectorizer   (Layer 4 / 6)
//   Step 2: One sample per example phrase      (Layer 4 - data)
//   Step 3: Seeded train/test split            (Layer 4 - data)
//   Step 4: Oversample minority intents        (Layer 4 - data)
//   Step 5: Save classifier_config.json        (Layer 6 - infra)
//   Step 6: Run training loop                  (Layer 5 - ml)
//   Step 7: Evaluate and save report.json      (Layer 6 - infra)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::{
    dataset::{balance_classes, IntentDataset, IntentSample},
    preprocessor::TextNormalizer,
    repositories::JsonIntentRepository,
    splitter::split_train_val,
};
use crate::domain::traits::IntentRepository;
use crate::infra::{
    checkpoint::{CheckpointManager, ClassifierManifest},
    metrics::{ClassificationReport, MetricsLogger},
    vectorizer_store::VectorizerStore,
};
use crate::ml::{
    classifier::IntentClassifier,
    model::IntentModelConfig,
    trainer::run_training,
    vectorizer::TfIdfVectorizer,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// Saved inside classifier_config.json so a checkpoint records how it was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainClassifierConfig {
    pub data_dir:       String,
    pub model_dir:      String,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    /// Share of the examples used for training; the rest is the test set
    pub train_fraction: f64,
    pub seed:           u64,
    /// Predictions below this probability become `desconocido`
    pub min_confidence: f32,
}

impl Default for TrainClassifierConfig {
    fn default() -> Self {
        Self {
            data_dir:       "data".to_string(),
            model_dir:      "models".to_string(),
            epochs:         200,
            batch_size:     16,
            lr:             0.05,
            train_fraction: 0.8,
            seed:           42,
            min_confidence: 0.25,
        }
    }
}

pub struct TrainClassifierUseCase {
    config: TrainClassifierConfig,
}

impl TrainClassifierUseCase {
    pub fn new(config: TrainClassifierConfig) -> Self {
        Self { config }
    }

    /// Train, evaluate and persist. Returns the evaluation report.
    pub fn execute(&self) -> Result<ClassificationReport> {
        self.run().map_err(|e| {
            tracing::error!("Classifier training failed: {e:#}");
            e
        })
    }

    fn run(&self) -> Result<ClassificationReport> {
        let cfg = &self.config;

        // ── Step 1: Inputs ───────────────────────────────────────────────────
        let intent_repo = JsonIntentRepository::new(PathBuf::from(&cfg.data_dir).join("intents.json"));
        let intents     = intent_repo.intents()?;
        if intents.len() < 2 {
            bail!("At least 2 intents are needed to train a classifier, found {}", intents.len());
        }
        let vectorizer = VectorizerStore::new(&cfg.model_dir).load()?;
        let labels: Vec<String> = intents.iter().map(|i| i.name.clone()).collect();

        // ── Step 2: Samples ──────────────────────────────────────────────────
        let normalizer = TextNormalizer::new();
        let mut samples = Vec::new();
        for (label, intent) in intents.iter().enumerate() {
            for example in &intent.examples {
                samples.push(build_sample(&normalizer, &vectorizer, example, label)?);
            }
        }
        if samples.is_empty() {
            bail!("The intents file has no example phrases");
        }
        tracing::info!("Built {} samples for {} intents", samples.len(), labels.len());

        // ── Step 3-4: Split and balance ──────────────────────────────────────
        let (train_samples, test_samples) = split_train_val(samples, cfg.train_fraction, cfg.seed);
        let balanced = balance_classes(train_samples.clone());
        tracing::info!(
            "Split: {} train ({} after balancing), {} test",
            train_samples.len(),
            balanced.len(),
            test_samples.len()
        );

        // ── Step 5: Manifest ─────────────────────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.model_dir);
        ckpt_manager.save_manifest(&ClassifierManifest {
            labels:         labels.clone(),
            n_features:     vectorizer.n_features(),
            min_confidence: cfg.min_confidence,
            training:       cfg.clone(),
        })?;

        // ── Step 6: Train ────────────────────────────────────────────────────
        let model_cfg = IntentModelConfig::new(vectorizer.n_features(), labels.len());
        let metrics   = MetricsLogger::new(ckpt_manager.dir())?;
        let model = run_training(
            cfg,
            &model_cfg,
            IntentDataset::new(balanced),
            IntentDataset::new(test_samples.clone()),
            &ckpt_manager,
            &metrics,
        )?;

        // ── Step 7: Evaluate ─────────────────────────────────────────────────
        let evaluated = if test_samples.is_empty() {
            tracing::warn!("Empty test set, reporting on the training set");
            train_samples
        } else {
            test_samples
        };

        let classifier = IntentClassifier::new(
            model,
            labels.clone(),
            cfg.min_confidence,
            vectorizer.n_features(),
        );
        let rows: Vec<Vec<f32>> = evaluated.iter().map(|s| s.features.clone()).collect();
        let truth: Vec<usize>   = evaluated.iter().map(|s| s.label).collect();
        let predicted = classifier.predict_labels(&rows)?;

        let report = ClassificationReport::compute(&labels, &truth, &predicted);
        ckpt_manager.save_report(&report)?;
        tracing::info!("Test accuracy: {:.2}%", report.accuracy * 100.0);

        Ok(report)
    }
}

fn build_sample(
    normalizer: &TextNormalizer,
    vectorizer: &TfIdfVectorizer,
    example:    &str,
    label:      usize,
) -> Result<IntentSample> {
    let features = vectorizer.transform(&normalizer.normalize(example))?;
    if features.iter().all(|x| *x == 0.0) {
        tracing::warn!("Example '{}' has no known terms", example);
    }
    Ok(IntentSample { features, label })
}
