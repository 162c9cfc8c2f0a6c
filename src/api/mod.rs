//! Admin JSON API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses as JSON:API documents.
//!
//! # Modules
//!
//! - [`decorators`] - Configurable cross-cutting layers around the product routes
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Layers usable as decorators
//! - [`routes`] - Route configuration and composition

pub mod decorators;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
