//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so the policy pieces (guard decisions, validation, formatting) can be
//! tested without a DOM.

pub mod auth;
pub mod format;
pub mod storage;
pub mod validation;
