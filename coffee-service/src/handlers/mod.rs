//! HTTP handlers for the coffee service.

pub mod coffee;
pub mod health;
