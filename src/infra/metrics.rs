// ============================================================
// Layer 6 — Metrics
// ============================================================
// Two kinds of training output:
//
//   MetricsLogger        — one CSV row per epoch
//                          (epoch, train_loss, val_loss, val_acc)
//
//   ClassificationReport — accuracy plus per-intent precision,
//                          recall, F1 and support on the
//                          held-out test set
//
// Example CSV output:
//   epoch,train_loss,val_loss,val_acc
//   1,1.791200,1.780100,0.250000
//   2,1.702300,1.711800,0.375000

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:      usize,
    pub train_loss: f64,
    /// NaN when there is no validation set
    pub val_loss:   f64,
    pub val_acc:    f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64, val_acc: f64) -> Self {
        Self { epoch, train_loss, val_loss, val_acc }
    }
}

/// Writes epoch metrics to `metrics.csv`. Each training run starts a fresh file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "epoch,train_loss,val_loss,val_acc")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6}",
            m.epoch, m.train_loss, m.val_loss, m.val_acc,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Classification report ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScores {
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    /// Number of true examples of this intent in the evaluated set
    pub support:   usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy:   f64,
    pub per_intent: BTreeMap<String, IntentScores>,
    /// Number of evaluated examples
    pub evaluated:  usize,
}

impl ClassificationReport {
    /// Score predictions against ground truth. Indices refer to `labels`.
    /// A ratio with a zero denominator is reported as 0.
    pub fn compute(labels: &[String], truth: &[usize], predicted: &[usize]) -> Self {
        let n = truth.len().min(predicted.len());
        let pairs: Vec<(usize, usize)> = truth.iter().copied().zip(predicted.iter().copied()).collect();

        let correct  = pairs.iter().filter(|(t, p)| t == p).count();
        let accuracy = ratio(correct, n);

        let per_intent = labels
            .iter()
            .enumerate()
            .map(|(k, name)| {
                let tp      = pairs.iter().filter(|(t, p)| *t == k && *p == k).count();
                let support = pairs.iter().filter(|(t, _)| *t == k).count();
                let claimed = pairs.iter().filter(|(_, p)| *p == k).count();

                let precision = ratio(tp, claimed);
                let recall    = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else { 0.0 };

                (name.clone(), IntentScores { precision, recall, f1, support })
            })
            .collect();

        Self { accuracy, per_intent, evaluated: n }
    }

    /// Multi-line summary for the terminal.
    pub fn render(&self) -> String {
        let mut out = format!("Accuracy: {:.4} ({} examples)\n", self.accuracy, self.evaluated);
        for (intent, s) in &self.per_intent {
            out.push_str(&format!(
                "\nIntent: {intent}\nPrecision: {:.4}\nRecall: {:.4}\nF1-score: {:.4}\nSupport: {}\n",
                s.precision, s.recall, s.f1, s.support,
            ));
        }
        out
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_csv_rows() {
        let dir    = TempDir::new().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 1.5, 1.25, 0.5)).unwrap();
        logger.log(&EpochMetrics::new(2, 1.0, 0.75, 0.75)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(
            csv,
            "epoch,train_loss,val_loss,val_acc\n\
             1,1.500000,1.250000,0.500000\n\
             2,1.000000,0.750000,0.750000\n"
        );
    }

    #[test]
    fn test_report_scores() {
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        // truth:     a a b b
        // predicted: a b b b
        let report = ClassificationReport::compute(&labels, &[0, 0, 1, 1], &[0, 1, 1, 1]);

        assert!((report.accuracy - 0.75).abs() < 1e-9);
        let a = &report.per_intent["a"];
        assert!((a.precision - 1.0).abs() < 1e-9);
        assert!((a.recall - 0.5).abs() < 1e-9);
        assert_eq!(a.support, 2);

        let b = &report.per_intent["b"];
        assert!((b.precision - 2.0 / 3.0).abs() < 1e-9);
        assert!((b.recall - 1.0).abs() < 1e-9);
        assert!((b.f1 - 0.8).abs() < 1e-9);

        let c = &report.per_intent["c"];
        assert_eq!(c.support, 0);
        assert_eq!(c.f1, 0.0);
    }

    #[test]
    fn test_report_on_empty_set() {
        let report = ClassificationReport::compute(&["a".to_string()], &[], &[]);
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.evaluated, 0);
        assert!(report.render().starts_with("Accuracy: 0.0000 (0 examples)"));
    }
}
