//! Route modules for the front-end server
//!
//! - resources: the four table pages (farmers, crops, markets, transactions)
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: HTMX fragment endpoints
//! - page.rs: Full page rendering and shared HTML helpers

pub mod resources;
