//! Rayna storefront library.
//!
//! Client-side listing logic for a shop browser: a fixed catalog of store
//! locations, an observable product list state, and a case-insensitive
//! product name search. A terminal front end ([`tui`], binary `rayna-tui`)
//! renders all three.
//!
//! # Quick Start
//!
//! ```
//! use rayna_store::{search, ProductListState, ProductLoader, StaticProductSource};
//!
//! let source = StaticProductSource::from_json(
//!     r#"[{"name":"Milk","price":1.2},{"name":"Bread","price":0.8}]"#,
//! )
//! .unwrap();
//!
//! let state = ProductListState::new();
//! ProductLoader::new(source).refresh(&state);
//!
//! let snapshot = state.current();
//! let hits = search::apply(snapshot.products(), "MILK");
//! assert_eq!(hits.len(), 1);
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod models;
pub mod search;
pub mod source;
pub mod state;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use catalog::LocationCatalog;
pub use client::{ProductsClient, StoreClient};
pub use config::Config;
pub use error::{Result, StoreError};
pub use loader::ProductLoader;
pub use models::{parse_products, Location, Product};
pub use search::SearchFilter;
pub use source::{ProductSource, StaticProductSource};
pub use state::{ProductListState, ProductPhase, ProductUiState, Subscription};
