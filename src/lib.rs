//! Dishpick - dish recommendations from free-text requests
//!
//! A guest describes what they want ("something light with fish", "dessert,
//! high calories", "dinner under 400 kcal") and the service answers with one
//! dish from a fixed menu. A language model interprets the request when one
//! is configured; local keyword rules take over whenever it is not, and a
//! macro re-ranker enforces any explicit nutritional targets.
//!
//! ```
//! use dishpick::catalog::Catalog;
//! use dishpick::recommend::Recommender;
//! use dishpick::selector::RuleSelector;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let recommender = Recommender::new(Arc::new(Catalog::builtin()), RuleSelector::default(), None);
//! let rec = recommender.recommend("dessert, high calories").await.unwrap();
//! assert_eq!(rec.dish.name, "Cheesecake");
//! # }
//! ```

pub mod agent;
pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod intent;
pub mod logging;
pub mod metrics;
pub mod recommend;
pub mod rerank;
pub mod resolver;
pub mod selector;
