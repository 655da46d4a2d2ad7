// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch training with burn's DataLoader and Adam.
//
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on InferBackend (NdArray)
//   - The validation batcher must also use InferBackend
//   - argmax(1) returns [batch, 1], so it is flattened before .equal()

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_classifier_use_case::TrainClassifierConfig;
use crate::data::{batcher::IntentBatcher, dataset::IntentDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{IntentModel, IntentModelConfig};
use crate::ml::{InferBackend, TrainBackend};

/// Train the classifier, log one metrics row per epoch, save the final
/// weights and return the trained model ready for inference.
pub fn run_training(
    cfg:           &TrainClassifierConfig,
    model_cfg:     &IntentModelConfig,
    train_dataset: IntentDataset,
    val_dataset:   IntentDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
) -> Result<IntentModel<InferBackend>> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    TrainBackend::seed(cfg.seed);

    let mut model: IntentModel<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} features → {} intents ({} train / {} validation samples)",
        model_cfg.n_features,
        model_cfg.n_intents,
        train_dataset.sample_count(),
        val_dataset.sample_count(),
    );

    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    let has_validation = val_dataset.sample_count() > 0;

    // ── Training data loader (autodiff) ───────────────────────────────────────
    let train_batcher = IntentBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size.max(1))
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (no autodiff overhead) ─────────────────────────
    let val_batcher = IntentBatcher::<InferBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size.max(1))
        .num_workers(1)
        .build(val_dataset);

    let report_every = (cfg.epochs / 10).max(1);

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.features, batch.labels);

            train_loss_sum += loss.clone().into_scalar().elem::<f64>();
            train_batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        let (val_loss, val_acc) = if has_validation {
            let model_valid = model.valid();

            let mut loss_sum = 0.0f64;
            let mut batches  = 0usize;
            let mut correct  = 0usize;
            let mut total    = 0usize;

            for batch in val_loader.iter() {
                let (loss, logits) = model_valid.forward_loss(batch.features, batch.labels.clone());
                loss_sum += loss.into_scalar().elem::<f64>();
                batches  += 1;

                let predicted = logits.argmax(1).flatten::<1>(0, 1);
                total += batch.labels.dims()[0];
                let hits: i64 = predicted
                    .equal(batch.labels)
                    .int().sum().into_scalar().elem::<i64>();
                correct += hits as usize;
            }

            let loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
            let acc  = if total   > 0 { correct as f64 / total as f64 } else { 0.0 };
            (loss, acc)
        } else {
            (f64::NAN, 0.0)
        };

        metrics.log(&EpochMetrics::new(epoch, train_loss, val_loss, val_acc))?;

        if epoch % report_every == 0 || epoch == cfg.epochs {
            tracing::info!(
                "Epoch {:>4}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
                epoch, cfg.epochs, train_loss, val_loss, val_acc * 100.0,
            );
        } else {
            tracing::debug!("Epoch {} | train_loss={:.4}", epoch, train_loss);
        }
    }

    let trained = model.valid();
    ckpt_manager.save_model(&trained)?;
    tracing::info!("Training complete, checkpoint saved");
    Ok(trained)
}
