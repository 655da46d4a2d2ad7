// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles labelled examples and splits them into:
//   - Training set: used to fit the classifier weights
//   - Test set:     used for the classification report
//
// Intent files list examples grouped by intent. Without the
// shuffle, the test set would contain only the last intents.
//
// The shuffle is seeded so a training run is reproducible.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, test).
///
/// `train_fraction` is clamped to `[0, 1]`; the split index is
/// `round(len * train_fraction)`.
pub fn split_train_val<T>(mut samples: Vec<T>, train_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let fraction = train_fraction.clamp(0.0, 1.0);
    let split_at = ((total as f64) * fraction).round() as usize;
    let split_at = split_at.min(total);

    let test = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test ({}% / {}%)",
        samples.len(),
        test.len(),
        (samples.len() * 100) / total.max(1),
        (test.len()    * 100) / total.max(1),
    );

    (samples, test)
}
