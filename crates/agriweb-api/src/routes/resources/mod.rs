//! Resource routes - table, create/edit modal, delete
//!
//! One set of handlers serves every resource type; the `{resource}` path
//! segment selects the page controller.
//!
//! Structure:
//! - api.rs: HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{htmx_close, htmx_delete, htmx_edit_form, htmx_new_form, htmx_rows, htmx_submit};

pub use page::page_resource;
