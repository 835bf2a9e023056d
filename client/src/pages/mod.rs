//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, form state, navigation)
//! and delegates rendering details to `components`.

pub mod home;
pub mod login;
pub mod product_detail;
pub mod product_form;
pub mod products;
pub mod profile;
pub mod register;
