//! Where product listings come from.

use std::fs;
use std::path::Path;

use crate::client::StoreClient;
use crate::error::Result;
use crate::models::{parse_products, Product};

/// Data access used by the fetch collaborator.
pub trait ProductSource {
    fn fetch_products(&self) -> Result<Vec<Product>>;

    /// Short human-readable origin, shown in the status bar.
    fn describe(&self) -> String;
}

impl ProductSource for StoreClient {
    fn fetch_products(&self) -> Result<Vec<Product>> {
        self.products().list()
    }

    fn describe(&self) -> String {
        self.base_url().to_string()
    }
}

/// Products held in memory, optionally parsed from a JSON fixture.
#[derive(Debug, Clone)]
pub struct StaticProductSource {
    products: Vec<Product>,
    origin: String,
}

impl StaticProductSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            origin: "in-memory".to_string(),
        }
    }

    /// Parse a bare array or `{ "data": [...] }` document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_products(json)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let mut source = Self::from_json(&json)?;
        source.origin = path.display().to_string();
        Ok(source)
    }
}

impl Default for StaticProductSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ProductSource for StaticProductSource {
    fn fetch_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        self.origin.clone()
    }
}
