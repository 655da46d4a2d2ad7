// ============================================================
// Layer 2 — Chatbot Response
// ============================================================

use serde::{Deserialize, Serialize};

use crate::domain::order::Order;

/// One chatbot reply. `order` is a snapshot of the current order when
/// the reply concerns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub text:              String,
    pub suggested_actions: Vec<String>,
    pub order:             Option<Order>,
}

impl Response {
    pub fn new(text: impl Into<String>, suggested_actions: &[&str]) -> Self {
        Self {
            text:              text.into(),
            suggested_actions: suggested_actions.iter().map(|a| a.to_string()).collect(),
            order:             None,
        }
    }

    pub fn with_order(mut self, order: &Order) -> Self {
        self.order = Some(order.clone());
        self
    }
}
