//! In-memory view model of a resource page
//!
//! The host turns these values into markup; nothing here knows about HTML.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::descriptor::ResourceDescriptor;
use crate::models::Record;
use crate::types::{MessageKind, RecordId};

/// Contents of the table body; exactly one state at a time
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Loading,
    Empty,
    Error(String),
    Rows(Vec<Row>),
}

impl Default for TableBody {
    fn default() -> Self {
        TableBody::Loading
    }
}

impl TableBody {
    /// Rendered rows, empty for placeholder states
    pub fn rows(&self) -> &[Row] {
        match self {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// One rendered record
///
/// The row owns a copy of the record it was built from, so edit and delete
/// act on exactly what was shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: Option<RecordId>,
    pub cells: Vec<String>,
    pub record: Record,
}

/// The create/edit modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modal {
    pub visible: bool,
    pub title: String,
}

/// Current values of the form inputs, keyed by input name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl FormState {
    /// Blank form for a resource type
    pub fn blank(descriptor: &ResourceDescriptor) -> Self {
        let mut form = Self::default();
        form.reset(descriptor);
        form
    }

    /// Set every input back to empty
    pub fn reset(&mut self, descriptor: &ResourceDescriptor) {
        self.values = descriptor
            .form_fields
            .iter()
            .map(|f| (f.name.to_string(), String::new()))
            .collect();
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value.into();
        }
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// An `<option>` in a lookup dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A lookup dropdown feeding one reference field
#[derive(Debug, Clone, PartialEq)]
pub struct Dropdown {
    /// Element id, e.g. `farmer-select`
    pub select_id: String,
    /// Form field the selection fills, e.g. `farmer_id`
    pub field: String,
    /// First, empty-valued option text
    pub placeholder: String,
    pub options: Vec<SelectOption>,
}

/// Transient status banner
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
    pub shown_at: Instant,
    pub dismiss_after: Duration,
}

impl StatusMessage {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) < self.dismiss_after
    }

    /// Time left before the banner dismisses itself
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.dismiss_after.saturating_sub(now.duration_since(self.shown_at))
    }
}

/// Everything a resource page shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub table: TableBody,
    pub modal: Modal,
    pub form: FormState,
    pub dropdowns: Vec<Dropdown>,
    pub message: Option<StatusMessage>,
}

impl PageView {
    /// Row whose record carries the given id
    pub fn row(&self, id: RecordId) -> Option<&Row> {
        self.table.rows().iter().find(|row| row.id == Some(id))
    }

    /// The status message, unless it has already dismissed itself
    pub fn visible_message(&self, now: Instant) -> Option<&StatusMessage> {
        self.message.as_ref().filter(|m| m.is_visible_at(now))
    }

    pub fn dropdown(&self, select_id: &str) -> Option<&Dropdown> {
        self.dropdowns.iter().find(|d| d.select_id == select_id)
    }
}
