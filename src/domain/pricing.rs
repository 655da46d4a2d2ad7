// ============================================================
// Layer 3 — Price Calculator
// ============================================================
// Prices an order line as base price (per size) plus a surcharge
// for each recognised customization, both multiplied by quantity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::menu::MenuItem;
use crate::domain::order::OrderItem;

/// Itemised price of one order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price:           f64,
    pub customization_prices: BTreeMap<String, f64>,
    pub total:                f64,
}

pub struct PriceCalculator {
    /// kind → option → surcharge
    surcharges: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PriceCalculator {
    pub fn new() -> Self {
        let table: [(&str, &[(&str, f64)]); 3] = [
            ("leche",  &[("almendra", 0.50), ("soya", 0.50), ("avellana", 0.50)]),
            ("shots",  &[("extra", 0.75), ("doble", 1.00)]),
            ("syrups", &[("vainilla", 0.50), ("caramelo", 0.50), ("avellana", 0.50)]),
        ];
        let surcharges = table
            .iter()
            .map(|(kind, options)| {
                let options = options
                    .iter()
                    .map(|(option, price)| (option.to_string(), *price))
                    .collect();
                (kind.to_string(), options)
            })
            .collect();
        Self { surcharges }
    }

    /// Surcharge for a customization, if it has one.
    pub fn surcharge(&self, kind: &str, option: &str) -> Option<f64> {
        self.surcharges.get(kind)?.get(option).copied()
    }

    pub fn calculate_item_price(&self, item: &OrderItem) -> PriceBreakdown {
        let quantity   = f64::from(item.quantity);
        let base_price = item.menu_item.base_price(&item.size) * quantity;

        // Entries without a "kind:option" shape, or without a surcharge, are free.
        let customization_prices: BTreeMap<String, f64> = item
            .customizations
            .iter()
            .filter_map(|c| {
                let (kind, option) = c.split_once(':')?;
                let price = self.surcharge(kind, option)?;
                Some((c.clone(), price * quantity))
            })
            .collect();

        let total = base_price + customization_prices.values().sum::<f64>();
        PriceBreakdown { base_price, customization_prices, total }
    }

    pub fn calculate_order_total(&self, items: &[OrderItem]) -> f64 {
        items.iter().map(|i| self.calculate_item_price(i).total).sum()
    }

    /// Human-readable price list for one menu item.
    pub fn format_price_options(&self, menu_item: &MenuItem) -> String {
        let mut lines = vec!["Precios disponibles:".to_string()];

        // Menu order, not map order; sizes without a price are skipped.
        for size in &menu_item.sizes {
            if let Some(price) = menu_item.prices.get(size) {
                lines.push(format!("- {}: ${:.2}", capitalize(size), price));
            }
        }

        if !menu_item.customizations.is_empty() {
            lines.push("\nPersonalizaciones disponibles:".to_string());
            for (kind, options) in &menu_item.customizations {
                for option in options {
                    if let Some(extra) = self.surcharge(kind, option) {
                        lines.push(format!("- {}: +${:.2}", capitalize(option), extra));
                    }
                }
            }
        }

        lines.join("\n")
    }
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None        => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte() -> MenuItem {
        let mut prices = BTreeMap::new();
        prices.insert("grande".to_string(), 4.0);
        prices.insert("tall".to_string(), 3.5);
        let mut customizations = BTreeMap::new();
        customizations.insert(
            "leche".to_string(),
            vec!["almendra".to_string(), "entera".to_string()],
        );
        MenuItem {
            id:       "latte".into(),
            name:     "Caffè Latte".into(),
            category: "calientes".into(),
            sizes:    vec!["tall".into(), "grande".into()],
            prices,
            customizations,
            keywords: vec!["latte".into()],
        }
    }

    #[test]
    fn test_breakdown_scales_with_quantity() {
        let calc = PriceCalculator::new();
        let item = OrderItem::new(
            latte(),
            "grande",
            vec!["leche:almendra".into(), "shots:doble".into()],
        )
        .with_quantity(2);

        let breakdown = calc.calculate_item_price(&item);
        assert!((breakdown.base_price - 8.0).abs() < 1e-9);
        assert!((breakdown.customization_prices["leche:almendra"] - 1.0).abs() < 1e-9);
        assert!((breakdown.customization_prices["shots:doble"] - 2.0).abs() < 1e-9);
        assert!((breakdown.total - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_and_unknown_customizations_are_free() {
        let calc = PriceCalculator::new();
        let item = OrderItem::new(
            latte(),
            "tall",
            vec!["almendra".into(), "leche:entera".into(), "toppings:crema".into()],
        );
        let breakdown = calc.calculate_item_price(&item);
        assert!(breakdown.customization_prices.is_empty());
        assert!((breakdown.total - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_order_total_sums_breakdowns() {
        let calc  = PriceCalculator::new();
        let items = vec![
            OrderItem::new(latte(), "tall", vec!["syrups:vainilla".into()]),
            OrderItem::new(latte(), "grande", vec![]),
        ];
        assert!((calc.calculate_order_total(&items) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_price_options() {
        let calc = PriceCalculator::new();
        let text = calc.format_price_options(&latte());
        assert_eq!(
            text,
            "Precios disponibles:\n- Tall: $3.50\n- Grande: $4.00\n\n\
             Personalizaciones disponibles:\n- Almendra: +$0.50"
        );
    }

    #[test]
    fn test_price_options_skip_sizes_without_price() {
        let mut item = latte();
        item.sizes.push("venti".into());
        let text = PriceCalculator::new().format_price_options(&item);
        assert!(text.starts_with("Precios disponibles:\n- Tall: $3.50\n- Grande: $4.00\n\n"));
        assert!(!text.contains("Venti"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("grande"), "Grande");
        assert_eq!(capitalize(""), "");
    }
}
