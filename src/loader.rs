//! The fetch collaborator: pulls products from a [`ProductSource`] and pushes
//! the outcome into a [`ProductListState`].
//!
//! Errors never escape the loader. A failed fetch becomes a `Failed` snapshot
//! carrying the error's display string; there is no retry.

use crate::source::ProductSource;
use crate::state::ProductListState;

pub struct ProductLoader {
    source: Box<dyn ProductSource>,
}

impl ProductLoader {
    pub fn new(source: impl ProductSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn from_boxed(source: Box<dyn ProductSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn ProductSource {
        self.source.as_ref()
    }

    /// Publish `Loading`, fetch, then publish `Ready` or `Failed`.
    pub fn refresh(&self, state: &ProductListState) {
        state.set_loading();
        self.complete(state);
    }

    /// Fetch and publish the outcome, assuming `Loading` is already showing.
    pub fn complete(&self, state: &ProductListState) {
        let origin = self.source.describe();
        match self.source.fetch_products() {
            Ok(products) => {
                tracing::info!(%origin, count = products.len(), "products loaded");
                state.set_ready(products);
            }
            Err(e) => {
                tracing::warn!(%origin, error = %e, "product fetch failed");
                state.set_failed(e.to_string());
            }
        }
    }
}
