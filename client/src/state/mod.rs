//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `products`) so individual components
//! can depend on small focused models.

pub mod products;
pub mod session;
