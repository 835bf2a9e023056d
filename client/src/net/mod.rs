//! Networking modules for the catalog REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs HTTP calls and interprets responses, `error` defines the
//! failure taxonomy surfaced to forms, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod types;
