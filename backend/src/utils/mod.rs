//! Shared utilities used across the backend.

pub mod jwt;
pub mod password;
