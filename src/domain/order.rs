// ============================================================
// Layer 3 — Order Domain Types
// ============================================================
// An Order is a list of OrderItems plus a cached total.
// Every mutation goes through add_item / remove_item so the
// cached total always equals the sum of the line prices.

use serde::{Deserialize, Serialize};

use crate::domain::menu::MenuItem;

/// One line of an order. Customizations are stored as "kind:option".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item:      MenuItem,
    pub size:           String,
    pub customizations: Vec<String>,
    pub quantity:       u32,
}

impl OrderItem {
    pub fn new(menu_item: MenuItem, size: impl Into<String>, customizations: Vec<String>) -> Self {
        Self { menu_item, size: size.into(), customizations, quantity: 1 }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Base price times quantity. Customization surcharges are priced
    /// separately by `PriceCalculator`.
    pub fn calculate_price(&self) -> f64 {
        self.menu_item.base_price(&self.size) * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub items: Vec<OrderItem>,
    pub total: f64,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
        self.calculate_total();
    }

    /// Remove the line at `index`, returning it. Out-of-range indices leave
    /// the order untouched.
    pub fn remove_item(&mut self, index: usize) -> Option<OrderItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.calculate_total();
        Some(removed)
    }

    pub fn calculate_total(&mut self) -> f64 {
        self.total = self.items.iter().map(OrderItem::calculate_price).sum();
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn item(id: &str, price: f64) -> MenuItem {
        let mut prices = BTreeMap::new();
        prices.insert("grande".to_string(), price);
        MenuItem {
            id:             id.into(),
            name:           id.into(),
            category:       "calientes".into(),
            sizes:          vec!["grande".into()],
            prices,
            customizations: BTreeMap::new(),
            keywords:       vec![],
        }
    }

    #[test]
    fn test_total_tracks_mutations() {
        let mut order = Order::new();
        order.add_item(OrderItem::new(item("latte", 4.0), "grande", vec![]));
        order.add_item(OrderItem::new(item("mocha", 4.5), "grande", vec![]).with_quantity(2));
        assert!((order.total - 13.0).abs() < 1e-9);

        let removed = order.remove_item(0).unwrap();
        assert_eq!(removed.menu_item.id, "latte");
        assert!((order.total - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut order = Order::new();
        order.add_item(OrderItem::new(item("latte", 4.0), "grande", vec![]));
        assert!(order.remove_item(3).is_none());
        assert_eq!(order.items.len(), 1);
        assert!((order.total - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_size_prices_at_zero() {
        let line = OrderItem::new(item("latte", 4.0), "venti", vec![]);
        assert_eq!(line.calculate_price(), 0.0);
    }
}
