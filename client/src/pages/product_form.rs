//! Create and update forms for a product (multipart upload).
//!
//! DESIGN
//! ======
//! Both routes render [`ProductForm`]; [`ProductFormMode`] decides the labels,
//! whether an existing product is loaded first, and which endpoint the submit
//! goes to. The owner id is taken from the current session identity. The
//! image file is read from the input element at submit time and is only
//! accepted as JPEG or PNG.

#[cfg(test)]
#[path = "product_form_test.rs"]
mod product_form_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::field_error::FieldError;
use crate::net::api::HttpApi;
use crate::state::session::SessionStore;
use crate::util::validation::{FieldErrors, GENERAL_FIELD, validate_product};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductFormMode {
    Create,
    Update(String),
}

impl ProductFormMode {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Create Product",
            Self::Update(_) => "Update Product",
        }
    }

    #[must_use]
    pub fn submit_label(&self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::Create, false) => "Create Product",
            (Self::Create, true) => "Creating...",
            (Self::Update(_), false) => "Update Product",
            (Self::Update(_), true) => "Updating...",
        }
    }
}

#[component]
pub fn CreateProductPage() -> impl IntoView {
    view! { <ProductForm mode=ProductFormMode::Create/> }
}

#[component]
pub fn UpdateProductPage() -> impl IntoView {
    let params = use_params_map();
    move || {
        let id = params.read().get("id").unwrap_or_default();
        view! { <ProductForm mode=ProductFormMode::Update(id)/> }
    }
}

#[component]
fn ProductForm(mode: ProductFormMode) -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let api = StoredValue::new(expect_context::<HttpApi>());
    let navigate = StoredValue::new_local(use_navigate());
    let mode = StoredValue::new(mode);

    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);
    let image_ref = NodeRef::<leptos::html::Input>::new();

    if let ProductFormMode::Update(id) = mode.get_value() {
        Effect::new(move || {
            let id = id.clone();
            leptos::task::spawn_local(async move {
                match api.get_value().fetch_product(&id).await {
                    Ok(product) => {
                        name.set(product.name);
                        price.set(product.price.to_string());
                    }
                    Err(e) => errors.update(|errors| errors.insert(GENERAL_FIELD, e.user_message())),
                }
            });
        });
    }

    let on_image_change = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(input) = image_ref.get_untracked() else {
                return;
            };
            let mime = input.files().and_then(|files| files.get(0)).map(|file| file.type_());
            errors.update(|errors| errors.remove("image"));
            if let Some(Err(message)) = mime.as_deref().map(crate::util::validation::validate_image_type) {
                errors.update(|errors| errors.insert("image", message));
                input.set_value("");
            }
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let user_id = session.identity().and_then(|identity| identity.id());
        let draft = match validate_product(&name.get_untracked(), &price.get_untracked(), user_id.as_deref()) {
            Ok(draft) => draft,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let image = image_ref.get_untracked().and_then(|input| input.files()).and_then(|files| files.get(0));
            let api = api.get_value();
            let result = match mode.get_value() {
                ProductFormMode::Create => api.create_product(&draft, image.as_ref()).await,
                ProductFormMode::Update(id) => api.update_product(&id, &draft, image.as_ref()).await,
            };
            match result {
                Ok(_) => navigate.with_value(|navigate| navigate("/products", leptos_router::NavigateOptions::default())),
                Err(e) => {
                    leptos::logging::warn!("product save failed: {e}");
                    errors.update(|errors| errors.insert(GENERAL_FIELD, e.user_message()));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (draft, api, navigate, mode, image_ref);
            busy.set(false);
        }
    };

    view! {
        <section class="form-page">
            <h1>{move || mode.with_value(ProductFormMode::title)}</h1>
            <FieldError errors=errors field=GENERAL_FIELD/>
            <form class="product-form" on:submit=on_submit>
                <label class="form__label" for="name">"Product Name"</label>
                <input
                    class="form__input"
                    id="name"
                    type="text"
                    placeholder="Enter product name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <FieldError errors=errors field="name"/>
                <label class="form__label" for="price">"Price"</label>
                <input
                    class="form__input"
                    id="price"
                    type="number"
                    min="1"
                    step="1"
                    placeholder="Enter product price"
                    prop:value=move || price.get()
                    on:input=move |ev| price.set(event_target_value(&ev))
                />
                <FieldError errors=errors field="price"/>
                <label class="form__label" for="image">"Product Image (optional)"</label>
                <input
                    class="form__input"
                    id="image"
                    type="file"
                    accept="image/png, image/jpeg"
                    node_ref=image_ref
                    on:change=on_image_change
                />
                <FieldError errors=errors field="image"/>
                <button class="form__submit" type="submit" disabled=move || busy.get()>
                    {move || mode.with_value(|mode| mode.submit_label(busy.get()))}
                </button>
            </form>
        </section>
    }
}
