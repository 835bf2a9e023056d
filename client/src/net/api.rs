//! REST client for the catalog service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, cookies included on
//! every request so the service's session cookie travels with them.
//! Server-side (SSR): every call returns [`ApiError::Unavailable`]; these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport results are reduced to `(status, body)` and handed to the pure
//! `interpret_*` helpers, which own all status/body semantics and are unit
//! tested without a browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::types::{Credentials, Product, ProductPage, ProductQuery, ProfileUpdate, Registration, UserProfile};
use crate::config::ApiConfig;
use crate::state::session::Identity;

pub const LOGIN_ENDPOINT: &str = "/login";
pub const LOGOUT_ENDPOINT: &str = "/logout";
pub const REGISTER_ENDPOINT: &str = "/register";
pub const PRODUCTS_ENDPOINT: &str = "/products";

pub const LOGIN_FAILED_FALLBACK: &str = "Username or Password wrong.";
pub const REGISTER_FAILED_FALLBACK: &str = "Registration failed. Please try again.";
pub const PRODUCTS_FAILED_FALLBACK: &str = "Failed to load products.";
pub const PRODUCT_FAILED_FALLBACK: &str = "Product not found.";
pub const PRODUCT_SAVE_FAILED_FALLBACK: &str = "Failed to save product.";
pub const PRODUCT_DELETE_FAILED_FALLBACK: &str = "Failed to delete product.";
pub const PROFILE_FAILED_FALLBACK: &str = "Failed to load profile.";
pub const PROFILE_SAVE_FAILED_FALLBACK: &str = "Failed to update profile.";

/// The session-changing calls the session store depends on. Mocked in tests.
#[async_trait::async_trait(?Send)]
pub trait AuthApi {
    /// `POST /login`; returns the service's user record.
    ///
    /// # Errors
    ///
    /// See [`interpret_login`].
    async fn login(&self, credentials: &Credentials) -> Result<Identity, ApiError>;

    /// `GET /logout`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `POST /register`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the service's message on a non-2xx status.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
}

#[must_use]
pub fn product_path(id: &str) -> String {
    format!("{PRODUCTS_ENDPOINT}/{id}")
}

#[must_use]
pub fn profile_path(id: &str) -> String {
    format!("/profile/{id}")
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// User-facing message from an error body: `message`, else `error`.
/// Field-error maps (`{"error": {"email": "..."}}`) are flattened.
pub(crate) fn service_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|key| match value.get(key)? {
        Value::String(message) => Some(message.trim().to_owned()).filter(|m| !m.is_empty()),
        Value::Object(fields) => {
            let joined = fields
                .iter()
                .filter_map(|(field, message)| message.as_str().map(|m| format!("{field}: {m}")))
                .collect::<Vec<_>>()
                .join("; ");
            Some(joined).filter(|m| !m.is_empty())
        }
        _ => None,
    })
}

fn rejected(status: u16, body: &str, fallback: &str) -> ApiError {
    ApiError::Rejected { status, message: service_message(body).unwrap_or_else(|| fallback.to_owned()) }
}

/// Interpret a `POST /login` response.
///
/// # Errors
///
/// Non-2xx → [`ApiError::AuthenticationFailed`] with the service message or
/// [`LOGIN_FAILED_FALLBACK`]; 2xx without a `user` object → [`ApiError::InvalidResponse`].
pub fn interpret_login(status: u16, body: &str) -> Result<Identity, ApiError> {
    if !is_success(status) {
        let message = service_message(body).unwrap_or_else(|| LOGIN_FAILED_FALLBACK.to_owned());
        return Err(ApiError::AuthenticationFailed(message));
    }
    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
    match value.get("user") {
        Some(Value::Object(fields)) => Ok(Identity::new(fields.clone())),
        _ => Err(ApiError::InvalidResponse("login response has no user object".to_owned())),
    }
}

/// Interpret a response whose body is irrelevant on success.
///
/// # Errors
///
/// Non-2xx → [`ApiError::Rejected`].
pub fn interpret_status(status: u16, body: &str, fallback: &str) -> Result<(), ApiError> {
    if is_success(status) { Ok(()) } else { Err(rejected(status, body, fallback)) }
}

/// Interpret a response whose whole body is `T`.
///
/// # Errors
///
/// Non-2xx → [`ApiError::Rejected`]; undecodable body → [`ApiError::InvalidResponse`].
pub fn interpret_body<T: DeserializeOwned>(status: u16, body: &str, fallback: &str) -> Result<T, ApiError> {
    interpret_status(status, body, fallback)?;
    serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Interpret a response that wraps `T` in `{"<field>": ...}`.
///
/// # Errors
///
/// Non-2xx → [`ApiError::Rejected`]; missing or undecodable field → [`ApiError::InvalidResponse`].
pub fn interpret_envelope<T: DeserializeOwned>(status: u16, body: &str, field: &str, fallback: &str) -> Result<T, ApiError> {
    let mut value: Value = interpret_body(status, body, fallback)?;
    let inner = value
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ApiError::InvalidResponse(format!("response has no {field} field")))?;
    serde_json::from_value(inner).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Pair a status with its body text. A body that cannot be read is a network failure.
#[cfg(any(feature = "hydrate", test))]
fn with_body<E: std::fmt::Display>(status: u16, text: Result<String, E>) -> Result<(u16, String), ApiError> {
    text.map(|body| (status, body))
        .map_err(|e| ApiError::NetworkFailure(format!("reading response body: {e}")))
}

#[cfg(feature = "hydrate")]
mod transport {
    use gloo_net::http::{Request, RequestBuilder};
    use web_sys::RequestCredentials;

    use crate::net::error::ApiError;
    use crate::net::types::ProductDraft;

    pub(super) fn with_cookies(builder: RequestBuilder) -> RequestBuilder {
        builder.credentials(RequestCredentials::Include)
    }

    /// Send `request` and collect the status and body text.
    pub(super) async fn exchange(request: Result<Request, gloo_net::Error>) -> Result<(u16, String), ApiError> {
        let request = request.map_err(|e| ApiError::NetworkFailure(e.to_string()))?;
        let resp = request.send().await.map_err(|e| ApiError::NetworkFailure(e.to_string()))?;
        super::with_body(resp.status(), resp.text().await)
    }

    pub(super) fn product_form(draft: &ProductDraft, image: Option<&web_sys::File>) -> Result<web_sys::FormData, ApiError> {
        let js_err = |e: wasm_bindgen::JsValue| ApiError::NetworkFailure(format!("{e:?}"));
        let form = web_sys::FormData::new().map_err(js_err)?;
        for (name, value) in draft.form_fields() {
            form.append_with_str(name, &value).map_err(js_err)?;
        }
        if let Some(file) = image {
            form.append_with_blob("image", file).map_err(js_err)?;
        }
        Ok(form)
    }
}

/// HTTP implementation of the catalog API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpApi {
    config: ApiConfig,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch one page of products from `GET /products`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx, or an undecodable body.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let params = query.params();
            let builder = gloo_net::http::Request::get(&self.config.endpoint(PRODUCTS_ENDPOINT))
                .query(params.iter().map(|(k, v)| (*k, v.as_str())));
            let (status, body) = transport::exchange(transport::with_cookies(builder).build()).await?;
            interpret_body(status, &body, PRODUCTS_FAILED_FALLBACK)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = query;
            Err(ApiError::Unavailable)
        }
    }

    /// Fetch a single product from `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx, or an undecodable body.
    pub async fn fetch_product(&self, id: &str) -> Result<Product, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let builder = gloo_net::http::Request::get(&self.config.endpoint(&product_path(id)));
            let (status, body) = transport::exchange(transport::with_cookies(builder).build()).await?;
            interpret_envelope(status, &body, "product", PRODUCT_FAILED_FALLBACK)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(ApiError::Unavailable)
        }
    }

    /// Create a product via multipart `POST /products`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx, or an undecodable body.
    #[cfg(feature = "hydrate")]
    pub async fn create_product(
        &self,
        draft: &super::types::ProductDraft,
        image: Option<&web_sys::File>,
    ) -> Result<Product, ApiError> {
        let form = transport::product_form(draft, image)?;
        let builder = gloo_net::http::Request::post(&self.config.endpoint(PRODUCTS_ENDPOINT));
        let (status, body) = transport::exchange(transport::with_cookies(builder).body(form)).await?;
        interpret_envelope(status, &body, "product", PRODUCT_SAVE_FAILED_FALLBACK)
    }

    /// Replace a product via multipart `PUT /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx, or an undecodable body.
    #[cfg(feature = "hydrate")]
    pub async fn update_product(
        &self,
        id: &str,
        draft: &super::types::ProductDraft,
        image: Option<&web_sys::File>,
    ) -> Result<Product, ApiError> {
        let form = transport::product_form(draft, image)?;
        let builder = gloo_net::http::Request::put(&self.config.endpoint(&product_path(id)));
        let (status, body) = transport::exchange(transport::with_cookies(builder).body(form)).await?;
        interpret_envelope(status, &body, "product", PRODUCT_SAVE_FAILED_FALLBACK)
    }

    /// Delete a product via `DELETE /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-2xx.
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let builder = gloo_net::http::Request::delete(&self.config.endpoint(&product_path(id)));
            let (status, body) = transport::exchange(transport::with_cookies(builder).build()).await?;
            interpret_status(status, &body, PRODUCT_DELETE_FAILED_FALLBACK)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(ApiError::Unavailable)
        }
    }

    /// Fetch a user's profile from `GET /profile/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx, or an undecodable body.
    pub async fn fetch_profile(&self, id: &str) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let builder = gloo_net::http::Request::get(&self.config.endpoint(&profile_path(id)));
            let (status, body) = transport::exchange(transport::with_cookies(builder).build()).await?;
            interpret_envelope(status, &body, "user", PROFILE_FAILED_FALLBACK)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(ApiError::Unavailable)
        }
    }

    /// Update a user's profile via `PUT /profile/{id}`; returns the saved profile.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx, or an undecodable body.
    pub async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let builder = gloo_net::http::Request::put(&self.config.endpoint(&profile_path(id)));
            let (status, body) = transport::exchange(transport::with_cookies(builder).json(update)).await?;
            interpret_envelope(status, &body, "user", PROFILE_SAVE_FAILED_FALLBACK)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, update);
            Err(ApiError::Unavailable)
        }
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<Identity, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let builder = gloo_net::http::Request::post(&self.config.endpoint(LOGIN_ENDPOINT));
            let (status, body) = transport::exchange(transport::with_cookies(builder).json(credentials)).await?;
            interpret_login(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(ApiError::Unavailable)
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let builder = gloo_net::http::Request::get(&self.config.endpoint(LOGOUT_ENDPOINT));
            let (status, body) = transport::exchange(transport::with_cookies(builder).build()).await?;
            interpret_status(status, &body, "logout failed")
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let builder = gloo_net::http::Request::post(&self.config.endpoint(REGISTER_ENDPOINT));
            let (status, body) = transport::exchange(transport::with_cookies(builder).json(registration)).await?;
            interpret_status(status, &body, REGISTER_FAILED_FALLBACK)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration;
            Err(ApiError::Unavailable)
        }
    }
}
