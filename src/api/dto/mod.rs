//! Data Transfer Objects for API requests and responses.
//!
//! Responses follow the JSON:API document layout; query parameters use
//! the JSON:API bracket names (`page[offset]`, `filter[code]`).

pub mod health;
pub mod jsonapi;
pub mod query;
