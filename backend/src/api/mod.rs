//! API endpoint modules.

pub mod books;
pub mod cache_admin;
pub mod common;
pub mod reading_list;
