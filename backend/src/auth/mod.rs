//! Authentication and session lifecycle.
//!
//! Registration, login, access-token renewal, and logout, plus the bearer
//! middleware protecting the reading-list routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
