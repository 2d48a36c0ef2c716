//! Case-insensitive product name search.
//!
//! Matching is plain substring containment after Unicode lowercasing of both
//! the query and the product name. An empty query matches everything. Order
//! is always preserved.

use crate::models::Product;

/// A query folded once and reusable across product lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    folded: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            folded: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.is_empty() || product.name.to_lowercase().contains(&self.folded)
    }

    /// Borrowing form of [`SearchFilter::apply`].
    pub fn iter<'a>(&'a self, products: &'a [Product]) -> impl Iterator<Item = &'a Product> + 'a {
        products.iter().filter(move |p| self.matches(p))
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        self.iter(products).cloned().collect()
    }
}

/// Products whose name contains `query`, ignoring case, in input order.
///
/// ```
/// use rayna_store::{search, Product};
///
/// let product = |name: &str| Product {
///     name: name.into(),
///     description: String::new(),
///     price: 1.0,
///     picture_url: String::new(),
/// };
/// let all = vec![product("Milk"), product("milkshake"), product("Bread")];
///
/// let names: Vec<String> = search::apply(&all, "milk").into_iter().map(|p| p.name).collect();
/// assert_eq!(names, ["Milk", "milkshake"]);
/// ```
pub fn apply(products: &[Product], query: &str) -> Vec<Product> {
    SearchFilter::new(query).apply(products)
}
