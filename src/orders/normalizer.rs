//! # Order Normalizer
//!
//! Turns raw sheet rows into the deduplicated, filtered order list. A single
//! order-preserving pass folds every row into a (seen identifiers, orders)
//! accumulator:
//!
//! - rows whose trimmed identifier was already seen are dropped (first wins);
//! - rows whose store code is ignored are dropped;
//! - every other row is projected onto the configured columns, with
//!   `PEDIDO`, `TIENDA` and `ANTIGUEDAD` derived, and `CODE`, `ID` and
//!   `Enlace` attached when the store is known.
//!
//! Data anomalies (malformed identifiers, missing columns, unknown stores,
//! bad date serials) resolve to empty or default values and never fail the
//! pass.

use crate::orders::catalog::ReferenceData;
use crate::orders::catalog::StoreRecord;
use crate::orders::dispatch::print_link;
use crate::orders::identifier::OrderIdentifier;
use crate::orders::record::NormalizedOrder;
use crate::orders::record::AGE_COLUMN;
use crate::orders::record::CODE_FIELD;
use crate::orders::record::ID_FIELD;
use crate::orders::record::LINK_FIELD;
use crate::orders::record::ORDER_COLUMN;
use crate::orders::record::STORE_COLUMN;
use crate::spreadsheet::date::format_serial;
use crate::spreadsheet::CellValue;
use crate::spreadsheet::RawRow;
use std::collections::HashSet;
use thiserror::Error;

/// Structural errors of untyped input; the pass emits nothing when raised.
#[derive(Error, Debug, PartialEq)]
pub enum NormalizeError {
    #[error("Expected a list of rows")]
    NotASequence,

    #[error("Row {index} is not a mapping of column names to values")]
    NotARowMapping { index: usize },
}

/// Normalizes rows against the reference data.
pub fn normalize<'a, I>(rows: I, reference: &ReferenceData) -> Vec<NormalizedOrder>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let (_, orders) = rows.into_iter().fold(
        (HashSet::<OrderIdentifier>::new(), Vec::<NormalizedOrder>::new()),
        |(mut seen, mut orders), row| {
            let identifier = OrderIdentifier::from_cell(row.get(&reference.identifier_column));
            if seen.contains(&identifier) {
                tracing::debug!(identifier = ?identifier.as_str(), "duplicate order skipped");
            } else if reference.is_ignored(identifier.customer_code()) {
                tracing::debug!(identifier = ?identifier.as_str(), "ignored shipment skipped");
            } else {
                orders.push(project(row, &identifier, reference));
                seen.insert(identifier);
            }
            (seen, orders)
        },
    );
    orders
}

/// Converts a sheet-to-JSON style array of row objects into rows.
pub fn rows_from_json(value: &serde_json::Value) -> Result<Vec<RawRow>, NormalizeError> {
    let items = value.as_array().ok_or(NormalizeError::NotASequence)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item
                .as_object()
                .ok_or(NormalizeError::NotARowMapping { index })?;
            Ok(object
                .iter()
                .map(|(column, value)| (column.as_str(), CellValue::from_json(value)))
                .collect())
        })
        .collect()
}

/// Normalizes untyped JSON input, failing only when it is not a list of row objects.
pub fn normalize_json(value: &serde_json::Value, reference: &ReferenceData) -> Result<Vec<NormalizedOrder>, NormalizeError> {
    let rows = rows_from_json(value)?;
    Ok(normalize(&rows, reference))
}

/// Builds the output record of one accepted row.
fn project(row: &RawRow, identifier: &OrderIdentifier, reference: &ReferenceData) -> NormalizedOrder {
    let store = reference.store(identifier.customer_code());
    let order_number = identifier.order_number();
    let mut order = NormalizedOrder::default();
    for column in &reference.columns {
        if let Some(value) = row.get(column) {
            order.set(column, copy_value(column, value));
        }
        if column == ORDER_COLUMN {
            order.set(ORDER_COLUMN, order_number.map(CellValue::from).unwrap_or_default());
        }
        if column == STORE_COLUMN {
            let name = store.map(|store| store.customer.as_str()).unwrap_or_default();
            order.set(STORE_COLUMN, CellValue::from(name));
        }
        if let Some(store) = store {
            attach_store(&mut order, store, order_number, reference);
        }
    }
    order
}

fn copy_value(column: &str, value: &CellValue) -> CellValue {
    match value {
        CellValue::Number(serial) if column == AGE_COLUMN => CellValue::Text(format_serial(*serial)),
        other => other.clone(),
    }
}

fn attach_store(order: &mut NormalizedOrder, store: &StoreRecord, order_number: Option<&str>, reference: &ReferenceData) {
    let link = print_link(&reference.print_base_url, order_number.unwrap_or_default(), &store.id.to_string());
    order.set(CODE_FIELD, CellValue::from(store.code.as_str()));
    order.set(ID_FIELD, CellValue::Number(f64::from(store.id)));
    order.set(LINK_FIELD, CellValue::Text(link.into()));
}
