//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (navigation, guard layout, cards, form
//! messages) while reading shared state from Leptos context providers.

pub mod field_error;
pub mod navbar;
pub mod product_card;
pub mod require_session;
