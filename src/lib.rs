//! Email Tagger — per-customer support ticket classification.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod routes;
pub mod service;
pub mod store;
pub mod tagging;
