//! Book discovery endpoints: Open Library and NYT bestseller proxies.

pub mod handlers;
pub mod routes;
pub mod upstream;
