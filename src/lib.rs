//! stempredict - A strict, deterministic prediction service for student outcome models
//!
//! Request path: schema validation → feature encoding → model inference.

pub mod cli;
pub mod config;
pub mod encoder;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod schema;
pub mod service;
