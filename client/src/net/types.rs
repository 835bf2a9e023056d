//! Wire DTOs for the catalog service.
//!
//! DESIGN
//! ======
//! These types mirror the service's JSON payloads. Response types are lenient
//! (unknown fields ignored, optional fields defaulted, `null` lists read as
//! empty) because the service omits or nulls fields freely.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /profile/{id}`. The password is sent only when it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A user's editable profile as returned by `GET /profile/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Minimal owner info attached to a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOwner {
    pub id: String,
    pub username: String,
}

/// A catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price in whole rupiah.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub price: i64,
    /// Relative path of the uploaded image; empty string when none.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user: Option<ProductOwner>,
}

impl Product {
    /// Image path, treating the service's empty string as "no image".
    #[must_use]
    pub fn image_path(&self) -> Option<&str> {
        self.image.as_deref().filter(|path| !path.trim().is_empty())
    }
}

/// One page of `GET /products`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub products: Vec<Product>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next_page: bool,
}

/// Query for `GET /products`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

impl Default for ProductQuery {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_PAGE_LIMIT, search: String::new() }
    }
}

impl ProductQuery {
    /// Query-string pairs; a blank search is omitted and page/limit are clamped to 1.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.max(1).to_string()), ("limit", self.limit.max(1).to_string())];
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_owned()));
        }
        params
    }
}

/// Text fields of the multipart body for `POST /products` and `PUT /products/{id}`.
/// The optional image file is attached separately in the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: i64,
    pub user_id: String,
}

impl ProductDraft {
    /// Form fields in submission order.
    #[must_use]
    pub fn form_fields(&self) -> [(&'static str, String); 3] {
        [("name", self.name.clone()), ("price", self.price.to_string()), ("user_id", self.user_id.clone())]
    }
}

fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected integer string, got {raw:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}
