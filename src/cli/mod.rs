// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case in Layer 2. Printing happens here and in console.rs.
//
//   train-vectorizer  → TrainVectorizerUseCase
//   train-classifier  → TrainClassifierUseCase
//   chat              → ConsoleUi over ChatbotService
//   ask               → ChatbotService, one message

pub mod commands;
pub mod console;

use anyhow::Result;
use clap::Parser;
use commands::{AskArgs, Commands, TrainClassifierArgs, TrainVectorizerArgs};

use crate::application::chat_service::ChatbotService;
use console::{render_response, ConsoleUi};

#[derive(Parser, Debug)]
#[command(
    name = "barista-bot",
    version,
    about = "Coffee-shop ordering chatbot: train the intent models, then chat."
)]
pub struct Cli {
    /// Directory holding menu.json and intents.json
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: String,

    /// Directory for the vectorizer and classifier artifacts
    #[arg(long, global = true, default_value = "models")]
    pub model_dir: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let Cli { data_dir, model_dir, command } = self;
        match command {
            Commands::TrainVectorizer(args) => run_train_vectorizer(args, &data_dir, &model_dir),
            Commands::TrainClassifier(args) => run_train_classifier(args, &data_dir, &model_dir),
            Commands::Chat                  => run_chat(&data_dir, &model_dir),
            Commands::Ask(args)             => run_ask(args, &data_dir, &model_dir),
        }
    }
}

fn run_train_vectorizer(args: TrainVectorizerArgs, data_dir: &str, model_dir: &str) -> Result<()> {
    use crate::application::train_vectorizer_use_case::TrainVectorizerUseCase;

    let path = TrainVectorizerUseCase::new(args.into_config(data_dir, model_dir)).execute()?;
    println!("Vectorizer trained and saved to '{}'.", path.display());
    Ok(())
}

fn run_train_classifier(args: TrainClassifierArgs, data_dir: &str, model_dir: &str) -> Result<()> {
    use crate::application::train_classifier_use_case::TrainClassifierUseCase;

    let report = TrainClassifierUseCase::new(args.into_config(data_dir, model_dir)).execute()?;
    println!("Classification report:\n\n{}", report.render());
    Ok(())
}

fn run_chat(data_dir: &str, model_dir: &str) -> Result<()> {
    let chatbot = ChatbotService::load(data_dir, model_dir)?;
    let stdin   = std::io::stdin();
    ConsoleUi::new(chatbot).run(stdin.lock(), std::io::stdout())
}

fn run_ask(args: AskArgs, data_dir: &str, model_dir: &str) -> Result<()> {
    let mut chatbot = ChatbotService::load(data_dir, model_dir)?;
    let response    = chatbot.process_message(&args.message)?;
    print!("{}", render_response(&response));
    Ok(())
}
