use super::*;

fn product(id: &str) -> Product {
    Product { id: id.to_owned(), name: format!("item {id}"), price: 1_000, image: None, description: None, user: None }
}

fn page(number: u32, has_next_page: bool) -> ProductPage {
    ProductPage {
        products: vec![product("a"), product("b")],
        page: number,
        limit: 10,
        total_items: 25,
        total_pages: 3,
        has_next_page,
    }
}

#[test]
fn products_state_default_is_first_page_idle() {
    let state = ProductsState::default();
    assert_eq!(state.query, ProductQuery::default());
    assert!(state.items.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(!state.can_go_back());
    assert!(!state.can_go_forward());
}

#[test]
fn begin_load_clears_previous_error() {
    let mut state = ProductsState { error: Some("old".to_owned()), ..ProductsState::default() };
    state.begin_load(ProductQuery { page: 2, ..ProductQuery::default() });
    assert!(state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.query.page, 2);
    assert!(!state.can_go_back());
}

#[test]
fn apply_page_replaces_items_and_pagination() {
    let mut state = ProductsState::default();
    state.begin_load(ProductQuery { page: 2, ..ProductQuery::default() });
    state.apply_page(page(2, true));

    assert!(!state.loading);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.total_items, 25);
    assert_eq!(state.total_pages, 3);
    assert!(state.can_go_back());
    assert!(state.can_go_forward());
    assert_eq!(state.next_query().map(|q| q.page), Some(3));
    assert_eq!(state.previous_query().map(|q| q.page), Some(1));
}

#[test]
fn apply_page_without_page_number_keeps_requested_page() {
    let mut state = ProductsState::default();
    state.begin_load(ProductQuery { page: 4, ..ProductQuery::default() });
    state.apply_page(ProductPage::default());
    assert_eq!(state.query.page, 4);
    assert!(state.items.is_empty());
}

#[test]
fn apply_error_keeps_items_and_shows_message() {
    let mut state = ProductsState::default();
    state.apply_page(page(1, false));
    state.begin_load(ProductQuery::default());
    state.apply_error(&ApiError::NetworkFailure("offline".to_owned()));

    assert!(!state.loading);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.error.as_deref(), Some(crate::net::error::NETWORK_FAILURE_MESSAGE));
}

#[test]
fn search_query_resets_to_first_page() {
    let mut state = ProductsState::default();
    state.apply_page(page(3, false));
    let query = state.search_query("  kopi ");
    assert_eq!(query.page, 1);
    assert_eq!(query.search, "kopi");
    assert_eq!(query.limit, state.query.limit);
}
