//! Product detail page with edit and delete actions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::net::api::HttpApi;
use crate::net::types::Product;
use crate::util::format::format_rupiah;

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";

/// Ask the user to confirm a destructive action. Always `false` outside the browser.
fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.confirm_with_message(message).ok()).unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<HttpApi>());
    let navigate = StoredValue::new_local(use_navigate());
    let params = use_params_map();
    let product_id = move || params.read().get("id").unwrap_or_default();

    let product = RwSignal::new(None::<Product>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let deleting = RwSignal::new(false);

    Effect::new(move || {
        let id = product_id();
        loading.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            match api.get_value().fetch_product(&id).await {
                Ok(found) => product.set(Some(found)),
                Err(e) => {
                    product.set(None);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    });

    let on_delete = move |_| {
        if deleting.get_untracked() || !confirm(DELETE_CONFIRMATION) {
            return;
        }
        let id = product_id();
        deleting.set(true);
        leptos::task::spawn_local(async move {
            match api.get_value().delete_product(&id).await {
                Ok(()) => navigate.with_value(|navigate| navigate("/products", NavigateOptions::default())),
                Err(e) => error.set(Some(e.user_message())),
            }
            deleting.set(false);
        });
    };

    let detail = move || {
        product.get().map(|product| {
            let image = product.image_path().map(|path| api.with_value(|api| api.config().asset_url(path)));
            let edit_href = format!("/products/update/{}", product.id);
            view! {
                <article class="product-detail">
                    <h1 class="product-detail__name">{product.name.clone()}</h1>
                    <p class="product-detail__price">{format_rupiah(product.price)}</p>
                    {image.map(|src| view! { <img class="product-detail__image" src=src alt=product.name.clone()/> })}
                    <p class="product-detail__description">{product.description.clone().unwrap_or_default()}</p>
                    {product.user.clone().map(|owner| view! { <p class="product-detail__owner">"Listed by " {owner.username}</p> })}
                    <div class="product-detail__actions">
                        <a class="button" href=edit_href>"Edit Product"</a>
                        <button class="button button--danger" disabled=move || deleting.get() on:click=on_delete>
                            "Delete Product"
                        </button>
                    </div>
                </article>
            }
        })
    };

    view! {
        <section class="product-detail-page">
            <Show when=move || error.get().is_some()>
                <p class="form__error form__error--general">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="page__status">"Loading product details..."</p> }
            >
                {detail}
            </Show>
        </section>
    }
}
