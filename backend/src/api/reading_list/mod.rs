//! Per-user reading list endpoints.

pub mod handlers;
pub mod routes;
