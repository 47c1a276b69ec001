//! Relays notifications to Zoom Team Chat on behalf of callers who only know
//! a simplified request shape.
//!
//! Every request runs the same short pipeline, with nothing retained between
//! requests: [request] validation, a fresh [auth] token exchange, routing via
//! [message] or [lookup], and translation of the upstream response by
//! [outcome].

pub mod api;
pub mod auth;
pub mod error;
pub mod format;
pub mod lookup;
pub mod message;
pub mod outcome;
pub mod request;
pub mod router;
pub mod token;
