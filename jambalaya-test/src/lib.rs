//! Assertion generator for integration tests.
//!
//! Walks a live value graph and emits assertion statements describing it,
//! ready to paste into a test:
//!
//! ```
//! use jambalaya_test::Inspect;
//!
//! #[derive(Inspect)]
//! struct OrderItem {
//!     sku: String,
//! }
//!
//! #[derive(Inspect)]
//! struct Order {
//!     id: i64,
//!     items: Vec<Option<OrderItem>>,
//! }
//!
//! let order = Order {
//!     id: 1,
//!     items: vec![Some(OrderItem { sku: "X".into() }), None],
//! };
//! let line = jambalaya_test::generate(&order, "order").unwrap().unwrap();
//! assert!(line.to_string().contains("assertThat(order.id()).isEqualTo(1);"));
//! ```

extern crate self as jambalaya_test;

pub mod config;
pub mod errors;
pub mod generator;
pub mod impls;
pub mod inspect;
pub mod lines;

pub use config::{AssertGeneratorConfig, DEFAULT_INDENTATION};
pub use errors::*;
pub use generator::{AssertGenerator, generate};
pub use inspect::{Accessor, Identity, Inspect, Literal, Shape, Value};
pub use jambalaya_test_macros::Inspect;
pub use lines::AssertLine;
