//! Projection from records to table rows and dropdown options

use rust_decimal::{Decimal, RoundingStrategy};

use crate::descriptor::{descriptor, Column, ResourceDescriptor};
use crate::models::Record;
use crate::types::ResourceKind;
use crate::view::{Dropdown, Row, SelectOption};

pub const LOADING_TEXT: &str = "Loading data...";
pub const EMPTY_TITLE: &str = "No data available";
pub const EMPTY_HINT: &str = "Click \"Add New\" to create your first record.";

/// Build the rows for a collection
pub fn build_rows(descriptor: &ResourceDescriptor, records: Vec<Record>) -> Vec<Row> {
    records
        .into_iter()
        .map(|record| build_row(descriptor, record))
        .collect()
}

/// Build one row; the row keeps the record it was built from
pub fn build_row(descriptor: &ResourceDescriptor, record: Record) -> Row {
    let cells = descriptor
        .columns
        .iter()
        .map(|column| render_cell(column, &record))
        .collect();
    Row {
        id: descriptor.id_of(&record),
        cells,
        record,
    }
}

fn render_cell(column: &Column, record: &Record) -> String {
    match column {
        Column::Field(field) => record.text(field),
        Column::Money(field) => format!("${}", record.text(field)),
        Column::Total { quantity, price } => format!("${}", format_total(record, quantity, price)),
    }
}

/// quantity x price to two decimals; `NaN` when either operand is unusable
pub fn format_total(record: &Record, quantity: &str, price: &str) -> String {
    match (record.decimal(quantity), record.decimal(price)) {
        (Some(q), Some(p)) => match q.checked_mul(p) {
            Some(total) => format_fixed(total, 2),
            None => "NaN".to_string(),
        },
        _ => "NaN".to_string(),
    }
}

/// Round half away from zero and pad to `dp` places
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// An empty dropdown for a referenced resource type
pub fn empty_dropdown(kind: ResourceKind) -> Dropdown {
    let d = descriptor(kind);
    Dropdown {
        select_id: format!("{}-select", kind.singular()),
        field: d.id_field.to_string(),
        placeholder: format!("Select a {}", kind.singular()),
        options: Vec::new(),
    }
}

/// Dropdown filled from an `{id, name}` lookup list
pub fn build_dropdown(kind: ResourceKind, items: &[Record]) -> Dropdown {
    let d = descriptor(kind);
    let name_field = d.name_field().unwrap_or(d.id_field);
    let mut dropdown = empty_dropdown(kind);
    dropdown.options = items
        .iter()
        .map(|item| SelectOption {
            value: item.text(d.id_field),
            label: item.text(name_field),
        })
        .collect();
    dropdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from(value)
    }

    #[test]
    fn test_farmer_row() {
        let row = build_row(
            descriptor(ResourceKind::Farmers),
            record(json!({"farmer_id": 1, "farmer_name": "Asha", "village": "Kheda", "phone": null})),
        );
        assert_eq!(row.id, Some(1));
        assert_eq!(row.cells, vec!["1", "Asha", "Kheda", ""]);
    }

    #[test]
    fn test_transaction_row_total() {
        let row = build_row(
            descriptor(ResourceKind::Transactions),
            record(json!({
                "transaction_id": 12,
                "farmer_name": "Asha",
                "crop_name": "Wheat",
                "market_name": "Azadpur",
                "quantity": "10",
                "price": "2.5"
            })),
        );
        assert_eq!(row.cells, vec!["12", "Asha", "Wheat", "Azadpur", "10", "$2.5", "$25.00"]);
    }

    #[test]
    fn test_total_rounds_to_cents() {
        let r = record(json!({"quantity": 3, "price": "0.335"}));
        assert_eq!(format_total(&r, "quantity", "price"), "1.01");
    }

    #[test]
    fn test_total_with_missing_operand() {
        let r = record(json!({"quantity": "10"}));
        assert_eq!(format_total(&r, "quantity", "price"), "NaN");
        let r = record(json!({"quantity": "ten", "price": 2}));
        assert_eq!(format_total(&r, "quantity", "price"), "NaN");
    }

    #[test]
    fn test_row_keeps_unlisted_fields() {
        let row = build_row(
            descriptor(ResourceKind::Transactions),
            record(json!({"transaction_id": 3, "farmer_id": 1, "quantity": 1, "price": 1})),
        );
        assert_eq!(row.record.integer("farmer_id"), Some(1));
    }

    #[test]
    fn test_build_dropdown() {
        let items = vec![
            record(json!({"crop_id": 2, "crop_name": "Rice"})),
            record(json!({"crop_id": 1, "crop_name": "Wheat"})),
        ];
        let dropdown = build_dropdown(ResourceKind::Crops, &items);
        assert_eq!(dropdown.select_id, "crop-select");
        assert_eq!(dropdown.field, "crop_id");
        assert_eq!(dropdown.placeholder, "Select a crop");
        assert_eq!(dropdown.options[0], SelectOption { value: "2".to_string(), label: "Rice".to_string() });
        assert_eq!(dropdown.options.len(), 2);
    }
}
