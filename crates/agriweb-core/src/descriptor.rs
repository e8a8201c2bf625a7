//! Per-resource schema table
//!
//! One static descriptor per resource type carries everything that varies
//! between pages: form fields, table columns, the id field and how a record
//! is named. Rendering, form binding and mutation are written once against
//! this table.

use crate::models::Record;
use crate::types::{RecordId, ResourceKind};

/// How a form input is typed and coerced on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text, sent as a string
    Text,
    /// Telephone number, sent as a string
    Phone,
    /// Decimal number
    Decimal,
    /// Integer id picked from another resource's lookup list
    Reference(ResourceKind),
}

/// A named input in the create/edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
}

/// A table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Field text as-is
    Field(&'static str),
    /// Field text prefixed with `$`
    Money(&'static str),
    /// quantity x price, two decimals, prefixed with `$`
    Total {
        quantity: &'static str,
        price: &'static str,
    },
}

/// How a record is named in prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayName {
    /// The value of a name field
    Field(&'static str),
    /// "<prefix> #<id>"
    Numbered(&'static str),
}

/// Schema of one resource type
#[derive(Debug)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub id_field: &'static str,
    pub display_name: DisplayName,
    pub form_fields: &'static [FormField],
    pub headers: &'static [&'static str],
    pub columns: &'static [Column],
}

static FARMERS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Farmers,
    id_field: "farmer_id",
    display_name: DisplayName::Field("farmer_name"),
    form_fields: &[
        FormField { name: "farmer_name", label: "Name", input: InputKind::Text },
        FormField { name: "village", label: "Village", input: InputKind::Text },
        FormField { name: "phone", label: "Phone", input: InputKind::Phone },
    ],
    headers: &["ID", "Name", "Village", "Phone"],
    columns: &[
        Column::Field("farmer_id"),
        Column::Field("farmer_name"),
        Column::Field("village"),
        Column::Field("phone"),
    ],
};

static CROPS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Crops,
    id_field: "crop_id",
    display_name: DisplayName::Field("crop_name"),
    form_fields: &[
        FormField { name: "crop_name", label: "Name", input: InputKind::Text },
        FormField { name: "season", label: "Season", input: InputKind::Text },
    ],
    headers: &["ID", "Name", "Season"],
    columns: &[
        Column::Field("crop_id"),
        Column::Field("crop_name"),
        Column::Field("season"),
    ],
};

static MARKETS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Markets,
    id_field: "market_id",
    display_name: DisplayName::Field("market_name"),
    form_fields: &[
        FormField { name: "market_name", label: "Name", input: InputKind::Text },
        FormField { name: "location", label: "Location", input: InputKind::Text },
    ],
    headers: &["ID", "Name", "Location"],
    columns: &[
        Column::Field("market_id"),
        Column::Field("market_name"),
        Column::Field("location"),
    ],
};

static TRANSACTIONS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Transactions,
    id_field: "transaction_id",
    display_name: DisplayName::Numbered("Transaction"),
    form_fields: &[
        FormField { name: "farmer_id", label: "Farmer", input: InputKind::Reference(ResourceKind::Farmers) },
        FormField { name: "crop_id", label: "Crop", input: InputKind::Reference(ResourceKind::Crops) },
        FormField { name: "market_id", label: "Market", input: InputKind::Reference(ResourceKind::Markets) },
        FormField { name: "quantity", label: "Quantity", input: InputKind::Decimal },
        FormField { name: "price", label: "Price", input: InputKind::Decimal },
    ],
    headers: &["ID", "Farmer", "Crop", "Market", "Quantity", "Price", "Total"],
    columns: &[
        Column::Field("transaction_id"),
        Column::Field("farmer_name"),
        Column::Field("crop_name"),
        Column::Field("market_name"),
        Column::Field("quantity"),
        Column::Money("price"),
        Column::Total { quantity: "quantity", price: "price" },
    ],
};

/// Look up the descriptor for a resource type
pub fn descriptor(kind: ResourceKind) -> &'static ResourceDescriptor {
    match kind {
        ResourceKind::Farmers => &FARMERS,
        ResourceKind::Crops => &CROPS,
        ResourceKind::Markets => &MARKETS,
        ResourceKind::Transactions => &TRANSACTIONS,
    }
}

impl ResourceDescriptor {
    /// Identifier of a record
    pub fn id_of(&self, record: &Record) -> Option<RecordId> {
        record.integer(self.id_field)
    }

    /// Human-readable label for confirmation prompts
    pub fn name_of(&self, record: &Record) -> String {
        match self.display_name {
            DisplayName::Field(field) => record.text(field),
            DisplayName::Numbered(prefix) => format!("{} #{}", prefix, record.text(self.id_field)),
        }
    }

    /// Name field used for `{id, name}` lookup lists
    pub fn name_field(&self) -> Option<&'static str> {
        match self.display_name {
            DisplayName::Field(field) => Some(field),
            DisplayName::Numbered(_) => None,
        }
    }

    /// Form field by name
    pub fn form_field(&self, name: &str) -> Option<&'static FormField> {
        self.form_fields.iter().find(|f| f.name == name)
    }

    /// Resource types whose lookup lists feed this form's dropdowns
    pub fn referenced_kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.form_fields.iter().filter_map(|f| match f.input {
            InputKind::Reference(kind) => Some(kind),
            _ => None,
        })
    }
}

/// Record id lookup by resource type name; `None` for unknown types
pub fn lookup_item_id(resource: &str, record: &Record) -> Option<RecordId> {
    let kind: ResourceKind = resource.parse().ok()?;
    descriptor(kind).id_of(record)
}

/// Record label lookup by resource type name; `"item"` for unknown types
pub fn lookup_item_name(resource: &str, record: &Record) -> String {
    match resource.parse::<ResourceKind>() {
        Ok(kind) => descriptor(kind).name_of(record),
        Err(_) => "item".to_string(),
    }
}
