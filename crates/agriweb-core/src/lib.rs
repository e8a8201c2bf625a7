//! Core of the agriweb front-end
//!
//! - types/models: resource kinds and JSON records
//! - descriptor: the per-resource schema table
//! - view/render: the page view model and its projection from records
//! - form: form pre-fill and payload serialization
//! - controller: the resource table controller tying it together

pub mod api;
pub mod context;
pub mod controller;
pub mod descriptor;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod types;
pub mod view;

pub use api::{ApiRequest, ApiResponse, Method, ResourceApi};
pub use context::PageContext;
pub use controller::{Confirm, Outcome, ResourceTableController, DEFAULT_MESSAGE_TTL};
pub use descriptor::{descriptor, lookup_item_id, lookup_item_name, Column, FormField, InputKind, ResourceDescriptor};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use models::{ApiErrorBody, Record};
pub use types::{MessageKind, RecordId, ResourceKind};
pub use view::{Dropdown, FormState, Modal, PageView, Row, SelectOption, StatusMessage, TableBody};
