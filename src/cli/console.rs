// ============================================================
// Layer 1 — Console UI
// ============================================================
// Read-eval-print loop over any BufRead/Write pair so the same
// code serves stdin/stdout and in-memory buffers.

use anyhow::Result;
use std::io::{BufRead, Write};

use crate::application::{chat_service::ChatbotService, response::Response};

pub struct ConsoleUi {
    chatbot: ChatbotService,
}

impl ConsoleUi {
    pub fn new(chatbot: ChatbotService) -> Self {
        Self { chatbot }
    }

    /// Runs until the user types `salir` (any case) or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "¡Bienvenido! ¿En qué puedo ayudarte?")?;
        writeln!(out, "(Escribe 'salir' para terminar)")?;

        let mut lines = input.lines();
        loop {
            write!(out, "\nTú: ")?;
            out.flush()?;

            let Some(line) = lines.next() else { break };
            let line = line?;
            let text = line.trim();

            if text.eq_ignore_ascii_case("salir") {
                writeln!(out, "\n¡Gracias por tu visita! ¡Hasta pronto!")?;
                break;
            }
            if text.is_empty() {
                continue;
            }

            match self.chatbot.process_message(text) {
                Ok(response) => write!(out, "{}", render_response(&response))?,
                Err(e) => {
                    tracing::error!("Failed to process '{}': {e:#}", text);
                    writeln!(out, "\nLo siento, ocurrió un error procesando tu mensaje.")?;
                }
            }
        }
        Ok(())
    }
}

/// Reply text, numbered suggested actions and the current order.
pub fn render_response(response: &Response) -> String {
    let mut out = format!("\nBarista: {}\n", response.text);

    if !response.suggested_actions.is_empty() {
        out.push_str("\nAcciones sugeridas:\n");
        for (i, action) in response.suggested_actions.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, action));
        }
    }

    if let Some(order) = &response.order {
        out.push_str("\nTu orden actual:\n");
        for item in &order.items {
            out.push_str(&format!("- {} ({})\n", item.menu_item.name, item.size));
        }
        out.push_str(&format!("Total: ${:.2}\n", order.total));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::repositories::JsonMenuRepository;
    use crate::domain::{
        intent::{Intent, GREETING},
        menu::MenuCatalog,
        order::{Order, OrderItem},
        traits::{ExampleMatcher, IntentPredictor, MenuRepository, Prediction},
    };
    use crate::ml::{nlp_processor::NlpProcessor, vectorizer::TfIdfVectorizer};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn ui(dir: &TempDir) -> ConsoleUi {
        let predictor = ExampleMatcher::new(vec![Intent::new(GREETING, vec!["hola".into()])]);
        ui_with(dir, Box::new(predictor))
    }

    fn ui_with(dir: &TempDir, predictor: Box<dyn IntentPredictor>) -> ConsoleUi {
        let path = dir.path().join("menu.json");
        std::fs::write(&path, r#"{ "bebidas": {} }"#).unwrap();
        let repo = JsonMenuRepository::new(path);
        let catalog: MenuCatalog = repo.menu().unwrap().clone();

        let nlp = NlpProcessor::new(&catalog, TfIdfVectorizer::fit(&["hola".to_string()]).unwrap());
        ConsoleUi::new(ChatbotService::new(Box::new(repo), nlp, predictor))
    }

    /// Fails on any message mentioning "falla", greets otherwise.
    struct FlakyPredictor;

    impl IntentPredictor for FlakyPredictor {
        fn predict(&self, text: &str, _features: &[f32]) -> anyhow::Result<Prediction> {
            if text.contains("falla") {
                anyhow::bail!("predictor unavailable");
            }
            Ok(Prediction { intent: GREETING.to_string(), confidence: 1.0 })
        }
    }

    fn run(input: &str) -> String {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        ui(&dir).run(Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_salir_ends_session() {
        let out = run("Hola\nSALIR\nhola\n");
        assert!(out.starts_with("¡Bienvenido! ¿En qué puedo ayudarte?\n(Escribe 'salir' para terminar)\n"));
        assert_eq!(out.matches("¡Hola!").count(), 1);
        assert!(out.ends_with("¡Gracias por tu visita! ¡Hasta pronto!\n"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let out = run("hola");
        assert!(out.contains("Barista: ¡Hola!"));
        assert!(!out.contains("Hasta pronto"));
    }

    #[test]
    fn test_processing_error_is_reported_and_loop_continues() {
        let dir    = TempDir::new().unwrap();
        let mut ui = ui_with(&dir, Box::new(FlakyPredictor));

        let mut out = Vec::new();
        ui.run(Cursor::new("esto falla\nhola\nsalir\n"), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("\nLo siento, ocurrió un error procesando tu mensaje.\n"));
        let after_error = out.split("Lo siento").nth(1).unwrap();
        assert!(after_error.contains("Barista: ¡Hola!"));
        assert!(out.ends_with("¡Gracias por tu visita! ¡Hasta pronto!\n"));
    }

    #[test]
    fn test_render_lists_actions_and_order() {
        let catalog: MenuCatalog = serde_json::from_str(
            r#"{ "alimentos": { "panaderia": [
                { "id": "croissant", "nombre": "Croissant", "categoria": "panaderia", "precio": 2.5 }
            ] } }"#,
        )
        .unwrap();
        let croissant = catalog.find_food("croissant").unwrap();
        let mut order = Order::new();
        order.add_item(OrderItem::new(croissant, "individual", Vec::new()));

        let response = Response::new("Listo", &["Ver orden", "Finalizar pedido"]).with_order(&order);
        assert_eq!(
            render_response(&response),
            "\nBarista: Listo\n\
             \nAcciones sugeridas:\n1. Ver orden\n2. Finalizar pedido\n\
             \nTu orden actual:\n- Croissant (individual)\nTotal: $2.50\n"
        );
    }
}
