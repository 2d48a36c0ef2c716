use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// A physical shop, market or mall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    /// `(latitude, longitude)`
    pub coordinates: (f64, f64),
    #[serde(rename = "type")]
    pub kind: String,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub picture_url: String,
}

impl Product {
    /// Price as shown on a product card, e.g. `$4.50`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

// ---------------------------------------------------------------------------
// Product list payloads
// ---------------------------------------------------------------------------

/// Product listings arrive either as a bare array or wrapped in
/// `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductListBody {
    Bare(Vec<Product>),
    Wrapped { data: Vec<Product> },
}

impl ProductListBody {
    fn into_products(self) -> Vec<Product> {
        match self {
            ProductListBody::Bare(products) => products,
            ProductListBody::Wrapped { data } => data,
        }
    }
}

/// Parse a product listing document in either accepted shape.
pub fn parse_products(json: &str) -> crate::Result<Vec<Product>> {
    let body: ProductListBody = serde_json::from_str(json)?;
    Ok(body.into_products())
}
