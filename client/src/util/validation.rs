//! Local form validation for the auth, product and profile forms.
//!
//! DESIGN
//! ======
//! Each validator takes raw input strings and returns either the wire type
//! ready to send or a [`FieldErrors`] keyed by input name. Nothing here
//! touches the network; a failed validation never produces a request.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;

use crate::net::types::{Credentials, ProductDraft, ProfileUpdate, Registration};

pub const USERNAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Key for errors not tied to a single input.
pub const GENERAL_FIELD: &str = "general";

/// Validation messages keyed by input name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`; the first message for a field wins.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required."));
    }
}

fn check_username(errors: &mut FieldErrors, username: &str) {
    require(errors, "username", username, "Username");
    if username.trim().chars().count() < USERNAME_MIN_LEN {
        errors.insert("username", format!("Username must be at least {USERNAME_MIN_LEN} characters."));
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    require(errors, "email", email, "Email");
    if !is_valid_email(email.trim()) {
        errors.insert("email", "Enter a valid email address.");
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    require(errors, "password", password, "Password");
    if password.chars().count() < PASSWORD_MIN_LEN {
        errors.insert("password", format!("Password must be at least {PASSWORD_MIN_LEN} characters."));
    }
}

/// `local@domain.tld` with no whitespace and a dot inside the domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// Login form: both fields required. Lengths are the service's concern.
///
/// # Errors
///
/// Returns the missing fields.
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();
    require(&mut errors, "username", username, "Username");
    require(&mut errors, "password", password, "Password");
    errors.into_result(|| Credentials { username: username.trim().to_owned(), password: password.to_owned() })
}

/// Register form: username, valid email, password of minimum length.
///
/// # Errors
///
/// Returns one message per invalid field.
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_username(&mut errors, username);
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    errors.into_result(|| Registration {
        username: username.trim().to_owned(),
        email: email.trim().to_owned(),
        password: password.to_owned(),
    })
}

/// Parse a price input as whole rupiah greater than zero.
///
/// # Errors
///
/// Returns the message to show under the price input.
pub fn parse_price(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price is required.".to_owned());
    }
    let price = raw.parse::<i64>().map_err(|_| "Price must be a whole number.".to_owned())?;
    if price <= 0 {
        return Err("Price must be greater than 0.".to_owned());
    }
    Ok(price)
}

/// Product create/update form. `user_id` comes from the session; a missing id
/// is reported under [`GENERAL_FIELD`].
///
/// # Errors
///
/// Returns one message per invalid field.
pub fn validate_product(name: &str, price: &str, user_id: Option<&str>) -> Result<ProductDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", name, "Product name");
    let price = parse_price(price).map_err(|message| errors.insert("price", message)).ok();
    let user_id = user_id.map(str::trim).filter(|id| !id.is_empty());
    if user_id.is_none() {
        errors.insert(GENERAL_FIELD, "User id not found. Please log in again.");
    }
    match (price, user_id) {
        (Some(price), Some(user_id)) if errors.is_empty() => {
            Ok(ProductDraft { name: name.trim().to_owned(), price, user_id: user_id.to_owned() })
        }
        _ => Err(errors),
    }
}

/// Only JPEG and PNG uploads are accepted.
///
/// # Errors
///
/// Returns the message to show under the image input.
pub fn validate_image_type(mime: &str) -> Result<(), String> {
    if ALLOWED_IMAGE_TYPES.contains(&mime.trim().to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err("Only JPG or PNG images are allowed.".to_owned())
    }
}

/// Profile form. An empty password means "unchanged" and is omitted.
///
/// # Errors
///
/// Returns one message per invalid field.
pub fn validate_profile(username: &str, email: &str, password: &str) -> Result<ProfileUpdate, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_username(&mut errors, username);
    check_email(&mut errors, email);
    let password = Some(password).filter(|p| !p.is_empty());
    if let Some(password) = password {
        check_password(&mut errors, password);
    }
    errors.into_result(|| ProfileUpdate {
        username: username.trim().to_owned(),
        email: email.trim().to_owned(),
        password: password.map(str::to_owned),
    })
}
