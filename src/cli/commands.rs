// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Four subcommands: `train-vectorizer`, `train-classifier`,
// `chat` and `ask`. The data and model directories are global
// flags on `Cli` and are passed in when args become configs.

use clap::{Args, Subcommand};

use crate::application::{
    train_classifier_use_case::TrainClassifierConfig,
    train_vectorizer_use_case::TrainVectorizerConfig,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the corpus from menu.json + intents.json and fit the TF-IDF vectorizer
    TrainVectorizer(TrainVectorizerArgs),

    /// Train and evaluate the intent classifier on the fitted vectorizer
    TrainClassifier(TrainClassifierArgs),

    /// Interactive console chat ('salir' to quit)
    Chat,

    /// Process a single message and print the reply
    Ask(AskArgs),
}

#[derive(Args, Debug)]
pub struct TrainVectorizerArgs {
    /// Also keep a timestamped copy under vectorizer/archive/
    #[arg(long)]
    pub keep_archive: bool,
}

impl TrainVectorizerArgs {
    pub fn into_config(self, data_dir: &str, model_dir: &str) -> TrainVectorizerConfig {
        TrainVectorizerConfig {
            data_dir:  data_dir.to_string(),
            model_dir: model_dir.to_string(),
            archive:   self.keep_archive,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainClassifierArgs {
    /// Number of full passes through the training examples
    #[arg(long, default_value_t = 200)]
    pub epochs: usize,

    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.05)]
    pub lr: f64,

    /// Share of examples used for training, the rest is the test set
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Seed for the split, the shuffling and weight initialisation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Predictions below this probability are treated as not understood
    #[arg(long, default_value_t = 0.25)]
    pub min_confidence: f32,
}

impl TrainClassifierArgs {
    pub fn into_config(self, data_dir: &str, model_dir: &str) -> TrainClassifierConfig {
        TrainClassifierConfig {
            data_dir:       data_dir.to_string(),
            model_dir:      model_dir.to_string(),
            epochs:         self.epochs,
            batch_size:     self.batch_size,
            lr:             self.lr,
            train_fraction: self.train_fraction,
            seed:           self.seed,
            min_confidence: self.min_confidence,
        }
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The message to send to the chatbot
    #[arg(long, short)]
    pub message: String,
}
