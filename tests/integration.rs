//! Integration tests for the Rayna storefront library.
//!
//! Everything runs offline against in-memory or fixture-file product sources.
//!
//! Run with:
//!
//! ```bash
//! cargo test -- --nocapture
//! ```

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use rayna_store::{
    search, Config, LocationCatalog, Product, ProductListState, ProductLoader, ProductPhase,
    ProductSource, ProductUiState, Result, SearchFilter, StaticProductSource, StoreError,
};

fn product(name: &str) -> Product {
    Product {
        name: name.to_string(),
        description: String::new(),
        price: 1.0,
        picture_url: String::new(),
    }
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/products.json")
}

struct Unreachable;

impl ProductSource for Unreachable {
    fn fetch_products(&self) -> Result<Vec<Product>> {
        Err(StoreError::Api {
            status: 503,
            message: "network error".into(),
        })
    }

    fn describe(&self) -> String {
        "unreachable".into()
    }
}

// ---------------------------------------------------------------------------
// 1. Location catalog
// ---------------------------------------------------------------------------

#[test]
fn test_catalog_has_three_fixed_locations() {
    let locations = LocationCatalog.list();
    let ids: Vec<&str> = locations.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(locations[0].name, "Alger");
    assert_eq!(locations[2].kind, "Mall");
    println!("[1] {} locations", locations.len());
}

// ---------------------------------------------------------------------------
// 2. Product list state
// ---------------------------------------------------------------------------

#[test]
fn test_loading_then_ready() {
    let state = ProductListState::new();
    assert!(state.current().is_loading());

    state.set_ready(vec![product("p1"), product("p2")]);
    let snapshot = state.current();
    assert!(!snapshot.is_loading());
    assert_eq!(snapshot.products(), &[product("p1"), product("p2")]);
}

#[test]
fn test_failed_keeps_message_and_drops_products() {
    let state = ProductListState::new();
    ProductLoader::new(StaticProductSource::new(vec![product("p1")])).refresh(&state);
    ProductLoader::new(Unreachable).refresh(&state);

    let snapshot = state.current();
    assert_eq!(snapshot.error(), Some("API error 503: network error"));
    assert!(snapshot.products().is_empty());
}

#[test]
fn test_subscriber_sees_every_transition_until_unsubscribed() {
    let state = ProductListState::new();
    let seen: Rc<RefCell<Vec<ProductUiState>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = state.subscribe(move |s| sink.borrow_mut().push(s.clone()));

    ProductLoader::new(StaticProductSource::new(vec![product("p1")])).refresh(&state);
    sub.unsubscribe();
    state.set_failed("ignored");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].phase(), ProductPhase::Loading);
    assert_eq!(seen[1].phase(), ProductPhase::Ready(&[product("p1")]));
}

// ---------------------------------------------------------------------------
// 3. Search
// ---------------------------------------------------------------------------

#[test]
fn test_milk_scenario() {
    let all = vec![product("Milk"), product("milkshake"), product("Bread")];
    let hits = search::apply(&all, "milk");
    assert_eq!(hits, vec![product("Milk"), product("milkshake")]);
    assert_eq!(search::apply(&all, ""), all);
    assert_eq!(SearchFilter::new("milk").apply(&hits), hits);
}

// ---------------------------------------------------------------------------
// 4. Fixture file end-to-end
// ---------------------------------------------------------------------------

#[test]
fn test_fixture_loads_and_filters() {
    let config = Config {
        products_file: Some(fixture_path()),
        ..Config::default()
    };
    let state = ProductListState::new();
    ProductLoader::from_boxed(config.product_source().unwrap()).refresh(&state);

    let snapshot = state.current();
    let ProductPhase::Ready(products) = snapshot.phase() else {
        panic!("expected ready, got {:?}", snapshot.phase());
    };
    assert_eq!(products.len(), 5);

    let names: Vec<String> = search::apply(products, "MILK")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Milk", "Strawberry milkshake"]);
    println!("[4] fixture: {} products, {} match 'MILK'", products.len(), names.len());
}

#[test]
fn test_unreachable_api_becomes_failed_state() {
    let config = Config {
        api_url: "http://127.0.0.1:9/api".into(),
        ..Config::default()
    };
    let state = ProductListState::new();
    ProductLoader::from_boxed(config.product_source().unwrap()).refresh(&state);

    let snapshot = state.current();
    assert!(!snapshot.is_loading());
    assert!(snapshot.error().unwrap().starts_with("Request failed"));
}
