//! Product-list state for the catalog page.
//!
//! DESIGN
//! ======
//! The page owns an `RwSignal<ProductsState>`; every fetch starts with
//! [`ProductsState::begin_load`] and ends with exactly one of
//! [`ProductsState::apply_page`] or [`ProductsState::apply_error`]. Pagination
//! and search only build the next [`ProductQuery`]; they never fetch.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use crate::net::error::ApiError;
use crate::net::types::{Product, ProductPage, ProductQuery};

/// Catalog list backed by `GET /products`.
#[derive(Clone, Debug, Default)]
pub struct ProductsState {
    pub query: ProductQuery,
    pub items: Vec<Product>,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProductsState {
    /// Mark a fetch for `query` as in flight.
    pub fn begin_load(&mut self, query: ProductQuery) {
        self.query = query;
        self.loading = true;
        self.error = None;
    }

    pub fn apply_page(&mut self, page: ProductPage) {
        self.items = page.products;
        if page.page > 0 {
            self.query.page = page.page;
        }
        self.total_items = page.total_items;
        self.total_pages = page.total_pages;
        self.has_next_page = page.has_next_page;
        self.loading = false;
        self.error = None;
    }

    /// Keep the last good items and surface the error.
    pub fn apply_error(&mut self, err: &ApiError) {
        self.loading = false;
        self.error = Some(err.user_message());
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.loading && self.query.page > 1
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        !self.loading && self.has_next_page
    }

    #[must_use]
    pub fn previous_query(&self) -> Option<ProductQuery> {
        self.can_go_back().then(|| ProductQuery { page: self.query.page - 1, ..self.query.clone() })
    }

    #[must_use]
    pub fn next_query(&self) -> Option<ProductQuery> {
        self.can_go_forward().then(|| ProductQuery { page: self.query.page + 1, ..self.query.clone() })
    }

    /// A new search always starts from the first page.
    #[must_use]
    pub fn search_query(&self, search: &str) -> ProductQuery {
        ProductQuery { page: 1, search: search.trim().to_owned(), ..self.query.clone() }
    }
}
