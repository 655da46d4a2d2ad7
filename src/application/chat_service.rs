// ============================================================
// Layer 2 — ChatbotService
// ============================================================
// Turns one user message into one Response:
//
//   1. NlpProcessor: normalise, extract entities, vectorise
//   2. IntentPredictor: features → intent name
//   3. Intent handler: read the menu, update the current order
//
// The service keeps the conversation state: the order being built
// and whether a summary is waiting for the user's confirmation.

use anyhow::Result;
use std::path::Path;

use crate::application::response::Response;
use crate::data::{
    entities::ExtractedEntities,
    repositories::{JsonIntentRepository, JsonMenuRepository},
};
use crate::domain::{
    intent::{ASK_PRICE, CONFIRM_ORDER, GREETING, ORDER_DRINK, ORDER_FOOD, SHOW_MENU},
    menu::{MenuItem, FOOD_DEFAULT_SIZE},
    order::{Order, OrderItem},
    pricing::{capitalize, PriceCalculator},
    traits::{ExampleMatcher, IntentPredictor, IntentRepository, MenuRepository},
};
use crate::infra::{checkpoint::CheckpointManager, vectorizer_store::VectorizerStore};
use crate::ml::{classifier::IntentClassifier, nlp_processor::NlpProcessor};

/// Size used when a drink order does not name one.
pub const DEFAULT_DRINK_SIZE: &str = "grande";

pub struct ChatbotService {
    menu_repo:             Box<dyn MenuRepository>,
    nlp_processor:         NlpProcessor,
    predictor:             Box<dyn IntentPredictor>,
    pricing:               PriceCalculator,
    current_order:         Option<Order>,
    awaiting_confirmation: bool,
}

impl ChatbotService {
    pub fn new(
        menu_repo:     Box<dyn MenuRepository>,
        nlp_processor: NlpProcessor,
        predictor:     Box<dyn IntentPredictor>,
    ) -> Self {
        Self {
            menu_repo,
            nlp_processor,
            predictor,
            pricing:               PriceCalculator::new(),
            current_order:         None,
            awaiting_confirmation: false,
        }
    }

    /// Wire the service from `menu.json`/`intents.json` in `data_dir` and the
    /// artifacts in `model_dir`. Without a trained classifier, intents are
    /// matched against their example phrases instead.
    pub fn load(data_dir: impl AsRef<Path>, model_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir  = data_dir.as_ref();
        let model_dir = model_dir.as_ref();

        let menu_repo  = JsonMenuRepository::new(data_dir.join("menu.json"));
        let catalog    = menu_repo.menu()?.clone();
        let vectorizer = VectorizerStore::new(model_dir).load()?;

        let ckpt_manager = CheckpointManager::new(model_dir);
        let predictor: Box<dyn IntentPredictor> = if ckpt_manager.exists() {
            Box::new(IntentClassifier::from_checkpoint(&ckpt_manager, &vectorizer)?)
        } else {
            tracing::warn!(
                "No classifier in '{}', matching example phrases instead. Run 'train-classifier' for better results.",
                ckpt_manager.dir().display()
            );
            let intents = JsonIntentRepository::new(data_dir.join("intents.json")).intents()?;
            Box::new(ExampleMatcher::new(intents))
        };

        let nlp_processor = NlpProcessor::new(&catalog, vectorizer);
        Ok(Self::new(Box::new(menu_repo), nlp_processor, predictor))
    }

    pub fn current_order(&self) -> Option<&Order> {
        self.current_order.as_ref()
    }

    pub fn process_message(&mut self, text: &str) -> Result<Response> {
        let (features, entities) = self.nlp_processor.process_input(text)?;
        let prediction = self.predictor.predict(text, &features)?;
        tracing::debug!(
            "'{}' → {} ({:.3})",
            text,
            prediction.intent,
            prediction.confidence
        );
        self.handle_intent(&prediction.intent, &entities, text)
    }

    pub fn handle_intent(
        &mut self,
        intent:   &str,
        entities: &ExtractedEntities,
        text:     &str,
    ) -> Result<Response> {
        match intent {
            ORDER_DRINK   => self.handle_drink_order(entities),
            ORDER_FOOD    => self.handle_food_order(text),
            ASK_PRICE     => self.handle_price(entities),
            SHOW_MENU     => self.handle_menu(),
            CONFIRM_ORDER => Ok(self.handle_confirmation()),
            GREETING      => Ok(Response::new(
                "¡Hola! ¿Qué te gustaría ordenar hoy?",
                &["Ver menú", "Hacer pedido"],
            )),
            _ => Ok(Response::new(
                "Lo siento, no entendí lo que quieres hacer.",
                &["Ver menú", "Hacer pedido", "Consultar precios"],
            )),
        }
    }

    /// Build a fresh order holding `items`.
    pub fn create_order(&self, items: Vec<OrderItem>) -> Order {
        let mut order = Order::new();
        for item in items {
            order.add_item(item);
        }
        order
    }

    fn handle_drink_order(&mut self, entities: &ExtractedEntities) -> Result<Response> {
        let item = match &entities.drink {
            Some(drink) => self.menu_repo.search_item(drink)?,
            None        => None,
        };
        let Some(item) = item else {
            return Ok(Response::new(
                "¿Qué bebida te gustaría ordenar?",
                &["Ver menú", "Ver bebidas populares"],
            ));
        };

        let size = entities.size.clone().unwrap_or_else(|| DEFAULT_DRINK_SIZE.to_string());
        let customizations = entities
            .customizations
            .iter()
            .filter(|c| {
                c.split_once(':')
                    .map(|(kind, option)| item.is_customization_valid(kind, option))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        Ok(self.add_to_order(OrderItem::new(item, size, customizations)))
    }

    fn handle_food_order(&mut self, text: &str) -> Result<Response> {
        let found = self.menu_repo.menu()?.find_food_in_text(text);
        match found {
            Some(item) => Ok(self.add_to_order(OrderItem::new(item, FOOD_DEFAULT_SIZE, Vec::new()))),
            None => Ok(Response::new(
                "¿Qué alimento te gustaría ordenar?",
                &["Ver menú", "Ver alimentos"],
            )),
        }
    }

    fn add_to_order(&mut self, item: OrderItem) -> Response {
        let name  = item.menu_item.name.clone();
        let order = self.current_order.get_or_insert_with(Order::new);
        order.add_item(item);
        self.awaiting_confirmation = false;
        tracing::info!("Added '{}' to the order ({} items)", name, order.items.len());

        Response::new(
            format!("He agregado {name} a tu orden. ¿Deseas algo más?"),
            &["Ver orden", "Agregar más", "Finalizar pedido"],
        )
        .with_order(order)
    }

    fn handle_price(&self, entities: &ExtractedEntities) -> Result<Response> {
        let item: Option<MenuItem> = match &entities.drink {
            Some(drink) => self.menu_repo.search_item(drink)?,
            None        => None,
        };
        Ok(match item {
            Some(item) => Response::new(
                format!("{}\n{}", item.name, self.pricing.format_price_options(&item)),
                &["Hacer pedido", "Ver menú"],
            ),
            None => Response::new(
                "¿De qué bebida te gustaría saber el precio?",
                &["Ver menú", "Ver bebidas populares"],
            ),
        })
    }

    fn handle_menu(&self) -> Result<Response> {
        let menu = self.menu_repo.menu()?;

        let mut lines = vec!["Nuestro menú:".to_string(), "\nBebidas:".to_string()];
        for (category, drinks) in &menu.drinks {
            let names: Vec<&str> = drinks.iter().map(|d| d.name.as_str()).collect();
            lines.push(format!("- {}: {}", capitalize(category), names.join(", ")));
        }
        if !menu.foods.is_empty() {
            let categories: Vec<String> = menu.foods.keys().map(|c| capitalize(c)).collect();
            lines.push(format!("\nAlimentos: {}", categories.join(", ")));
        }

        Ok(Response::new(lines.join("\n"), &["Hacer pedido", "Consultar precios"]))
    }

    fn handle_confirmation(&mut self) -> Response {
        let has_items = self.current_order.as_ref().is_some_and(|o| !o.is_empty());
        if !has_items {
            self.awaiting_confirmation = false;
            return Response::new(
                "Aún no tienes productos en tu orden.",
                &["Ver menú", "Hacer pedido"],
            );
        }

        if self.awaiting_confirmation {
            let total = self.priced_total();
            self.current_order         = None;
            self.awaiting_confirmation = false;
            tracing::info!("Order confirmed: ${:.2}", total);
            return Response::new(
                format!("¡Listo! Tu pedido ha sido confirmado. Total a pagar: ${total:.2}. ¡Gracias por tu visita!"),
                &["Hacer otro pedido"],
            );
        }

        let Some(order) = self.current_order.as_ref() else {
            return Response::new("Aún no tienes productos en tu orden.", &["Ver menú"]);
        };
        let mut lines = vec!["Resumen de tu orden:".to_string()];
        for item in &order.items {
            let price = self.pricing.calculate_item_price(item).total;
            let mut line = format!("- {} ({}) x{}: ${:.2}", item.menu_item.name, item.size, item.quantity, price);
            if !item.customizations.is_empty() {
                line.push_str(&format!(" [{}]", item.customizations.join(", ")));
            }
            lines.push(line);
        }
        lines.push(format!("Total: ${:.2}", self.pricing.calculate_order_total(&order.items)));
        lines.push("¿Confirmas tu pedido?".to_string());

        let response = Response::new(lines.join("\n"), &["Confirmar pedido", "Agregar más"])
            .with_order(order);
        self.awaiting_confirmation = true;
        response
    }

    /// Order total including customization surcharges.
    fn priced_total(&self) -> f64 {
        self.current_order
            .as_ref()
            .map(|o| self.pricing.calculate_order_total(&o.items))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{intent::Intent, menu::MenuCatalog, traits::ExampleMatcher};
    use crate::ml::vectorizer::TfIdfVectorizer;

    const MENU: &str = r#"{
        "bebidas": {
            "calientes": [
                { "id": "latte", "nombre": "Caffè Latte", "categoria": "calientes",
                  "tamaños": ["tall", "grande", "venti"],
                  "precios": {"tall": 3.5, "grande": 4.0, "venti": 4.5},
                  "personalizaciones": {"leche": ["entera", "almendra"], "shots": ["extra"]},
                  "keywords": ["latte"] }
            ],
            "frias": [
                { "id": "frappuccino", "nombre": "Frappuccino", "categoria": "frias",
                  "tamaños": ["grande"], "precios": {"grande": 5.0},
                  "personalizaciones": {"syrups": ["vainilla"]},
                  "keywords": ["frappuccino", "frappe"] }
            ]
        },
        "alimentos": {
            "panaderia": [
                { "id": "croissant", "nombre": "Croissant", "categoria": "panaderia",
                  "precio": 2.5, "keywords": ["croissant", "cuernito"] }
            ]
        }
    }"#;

    struct StaticMenu(MenuCatalog);

    impl MenuRepository for StaticMenu {
        fn menu(&self) -> Result<&MenuCatalog> {
            Ok(&self.0)
        }
    }

    fn service() -> ChatbotService {
        let catalog: MenuCatalog = serde_json::from_str(MENU).unwrap();
        let vectorizer = TfIdfVectorizer::fit(&["quiero latte".to_string()]).unwrap();
        let nlp        = NlpProcessor::new(&catalog, vectorizer);
        let predictor  = ExampleMatcher::new(vec![
            Intent::new(ORDER_DRINK, vec!["quiero un".into()]),
            Intent::new(ORDER_FOOD, vec!["para comer".into()]),
            Intent::new(ASK_PRICE, vec!["cuánto cuesta".into()]),
            Intent::new(SHOW_MENU, vec!["menú".into()]),
            Intent::new(CONFIRM_ORDER, vec!["confirmar".into()]),
            Intent::new(GREETING, vec!["hola".into()]),
        ]);
        ChatbotService::new(Box::new(StaticMenu(catalog)), nlp, Box::new(predictor))
    }

    #[test]
    fn test_order_drink_with_default_size() {
        let mut bot = service();
        let r = bot.process_message("Quiero un latte con leche de almendra").unwrap();

        assert_eq!(r.text, "He agregado Caffè Latte a tu orden. ¿Deseas algo más?");
        assert_eq!(r.suggested_actions, vec!["Ver orden", "Agregar más", "Finalizar pedido"]);
        let order = r.order.unwrap();
        assert_eq!(order.items[0].size, "grande");
        assert_eq!(order.items[0].customizations, vec!["leche:almendra"]);
        assert!((order.total - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_order_without_known_drink_asks() {
        let mut bot = service();
        let r = bot.process_message("quiero un té chai").unwrap();
        assert_eq!(r.text, "¿Qué bebida te gustaría ordenar?");
        assert!(r.order.is_none());
        assert!(bot.current_order().is_none());
    }

    #[test]
    fn test_customization_not_offered_by_drink_is_dropped() {
        let mut bot = service();
        // vainilla exists on the menu, but only for the frappuccino
        let r = bot.process_message("quiero un latte con vainilla y leche entera").unwrap();
        let order = r.order.unwrap();
        assert_eq!(order.items[0].menu_item.id, "latte");
        assert_eq!(order.items[0].customizations, vec!["leche:entera"]);

        let r = bot.process_message("quiero un frappuccino con vainilla").unwrap();
        assert_eq!(r.order.unwrap().items[1].customizations, vec!["syrups:vainilla"]);
    }

    #[test]
    fn test_food_order_without_known_item_asks() {
        let mut bot = service();
        let r = bot.process_message("y para comer un bagel").unwrap();
        assert_eq!(r.text, "¿Qué alimento te gustaría ordenar?");
        assert_eq!(r.suggested_actions, vec!["Ver menú", "Ver alimentos"]);
        assert!(r.order.is_none());
        assert!(bot.current_order().is_none());
    }

    #[test]
    fn test_order_accumulates_items() {
        let mut bot = service();
        bot.process_message("quiero un latte venti").unwrap();
        let r = bot.process_message("y para comer un cuernito").unwrap();

        let order = r.order.unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].size, "venti");
        assert_eq!(order.items[1].menu_item.id, "croissant");
        assert_eq!(order.items[1].size, "individual");
        assert!((order.total - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_question() {
        let mut bot = service();
        let r = bot.process_message("¿Cuánto cuesta un latte?").unwrap();
        assert!(r.text.starts_with("Caffè Latte\nPrecios disponibles:"));
        assert!(r.text.contains("- Grande: $4.00"));
        assert!(r.text.contains("- Almendra: +$0.50"));

        let r = bot.process_message("cuánto cuesta").unwrap();
        assert_eq!(r.text, "¿De qué bebida te gustaría saber el precio?");
    }

    #[test]
    fn test_menu_lists_categories() {
        let mut bot = service();
        let r = bot.process_message("¿me enseñas el menú?").unwrap();
        assert!(r.text.contains("- Calientes: Caffè Latte"));
        assert!(r.text.contains("- Frias: Frappuccino"));
        assert!(r.text.contains("Alimentos: Panaderia"));
    }

    #[test]
    fn test_confirmation_flow() {
        let mut bot = service();
        let r = bot.process_message("confirmar").unwrap();
        assert_eq!(r.text, "Aún no tienes productos en tu orden.");

        bot.process_message("quiero un latte con shot extra").unwrap();
        let summary = bot.process_message("confirmar").unwrap();
        // 4.00 base + 0.75 extra shot
        assert!(summary.text.contains("Total: $4.75"));
        assert!(summary.order.is_some());
        assert!(bot.current_order().is_some());

        let done = bot.process_message("confirmar").unwrap();
        assert!(done.text.starts_with("¡Listo! Tu pedido ha sido confirmado"));
        assert!(done.text.contains("$4.75"));
        assert!(bot.current_order().is_none());
    }

    #[test]
    fn test_adding_after_summary_requires_new_summary() {
        let mut bot = service();
        bot.process_message("quiero un latte").unwrap();
        bot.process_message("confirmar").unwrap();
        bot.process_message("quiero un frappuccino").unwrap();

        let r = bot.process_message("confirmar").unwrap();
        assert!(r.text.starts_with("Resumen de tu orden:"));
        assert!(r.text.contains("Total: $9.00"));
        assert_eq!(bot.current_order().unwrap().items.len(), 2);

        let done = bot.process_message("confirmar").unwrap();
        assert!(done.text.starts_with("¡Listo!"));
        assert!(bot.current_order().is_none());
    }

    #[test]
    fn test_unknown_intent_fallback() {
        let mut bot = service();
        let r = bot.process_message("¿qué hora es?").unwrap();
        assert_eq!(r.text, "Lo siento, no entendí lo que quieres hacer.");
        assert_eq!(r.suggested_actions, vec!["Ver menú", "Hacer pedido", "Consultar precios"]);

        let r = bot.process_message("Hola").unwrap();
        assert_eq!(r.text, "¡Hola! ¿Qué te gustaría ordenar hoy?");
    }

    #[test]
    fn test_create_order() {
        let bot   = service();
        let latte = bot.menu_repo.search_item("latte").unwrap().unwrap();
        let order = bot.create_order(vec![
            OrderItem::new(latte.clone(), "tall", Vec::new()),
            OrderItem::new(latte, "venti", Vec::new()).with_quantity(2),
        ]);
        assert_eq!(order.items.len(), 2);
        assert!((order.total - 12.5).abs() < 1e-9);
    }
}
