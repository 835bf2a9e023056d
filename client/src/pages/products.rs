//! Catalog page: paginated, searchable product grid.
//!
//! SYSTEM CONTEXT
//! ==============
//! Data comes from `GET /products`. All list bookkeeping lives in
//! `state::products::ProductsState`; this page only starts fetches and renders.

use leptos::prelude::*;

use crate::components::product_card::ProductCard;
use crate::net::api::HttpApi;
use crate::net::types::ProductQuery;
use crate::state::products::ProductsState;
use crate::util::format::page_label;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<HttpApi>());
    let state = RwSignal::new(ProductsState::default());
    let search = RwSignal::new(String::new());

    let load = move |query: ProductQuery| {
        state.update(|s| s.begin_load(query.clone()));
        leptos::task::spawn_local(async move {
            let result = api.get_value().list_products(&query).await;
            // A newer request has superseded this one.
            if state.with_untracked(|s| s.query != query) {
                return;
            }
            match result {
                Ok(page) => state.update(|s| s.apply_page(page)),
                Err(e) => {
                    leptos::logging::warn!("product list failed: {e}");
                    state.update(|s| s.apply_error(&e));
                }
            }
        });
    };

    Effect::new(move || load(ProductQuery::default()));

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load(state.with_untracked(|s| s.search_query(&search.get_untracked())));
    };
    let on_prev = move |_| {
        if let Some(query) = state.with_untracked(ProductsState::previous_query) {
            load(query);
        }
    };
    let on_next = move |_| {
        if let Some(query) = state.with_untracked(ProductsState::next_query) {
            load(query);
        }
    };

    view! {
        <section class="products-page">
            <header class="products-page__header">
                <form class="products-page__search" on:submit=on_search>
                    <input
                        class="form__input"
                        type="search"
                        placeholder="Search products"
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                    />
                    <button class="button" type="submit">"Search"</button>
                </form>
                <a class="button button--secondary" href="/products/create">"Add Product"</a>
            </header>

            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="form__error form__error--general">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>

            <Show
                when=move || !state.with(|s| s.loading && s.items.is_empty())
                fallback=|| view! { <p class="page__status">"Loading products..."</p> }
            >
                <Show
                    when=move || state.with(|s| !s.items.is_empty())
                    fallback=|| view! { <p class="page__status">"No products available."</p> }
                >
                    <div class="product-grid">
                        <For
                            each=move || state.with(|s| s.items.clone())
                            key=|product| product.id.clone()
                            children=|product| view! { <ProductCard product=product/> }
                        />
                    </div>
                </Show>
            </Show>

            <nav class="pagination">
                <button class="button" disabled=move || !state.with(ProductsState::can_go_back) on:click=on_prev>
                    "Previous"
                </button>
                <span class="pagination__label">
                    {move || state.with(|s| page_label(s.query.page, s.total_pages))}
                </span>
                <button class="button" disabled=move || !state.with(ProductsState::can_go_forward) on:click=on_next>
                    "Next"
                </button>
            </nav>
        </section>
    }
}
