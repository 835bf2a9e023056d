//! Card for one product in the catalog grid.

use leptos::prelude::*;

use crate::net::api::HttpApi;
use crate::net::types::Product;
use crate::util::format::format_rupiah;

/// A clickable card linking to the product's detail page.
#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let href = format!("/products/{}", product.id);
    let image = product.image_path().map(|path| api.config().asset_url(path));
    let price = format_rupiah(product.price);
    let name = product.name;

    view! {
        <a class="product-card" href=href>
            {image.map(|src| view! { <img class="product-card__image" src=src alt=name.clone()/> })}
            <span class="product-card__name">{name.clone()}</span>
            <span class="product-card__price">{price}</span>
        </a>
    }
}
