// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits describing the coffee shop:
// what a menu item is, what an intent is, how an order adds up.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

/// Menu items and the on-disk menu catalog
pub mod menu;

/// Intents and their training examples
pub mod intent;

/// Order lines and running orders
pub mod order;

/// Customization surcharges and price breakdowns
pub mod pricing;

// Repository abstractions implemented by the data layer
pub mod traits;
