use crate::orders::dispatch::SelectedOrder;
use crate::spreadsheet::CellValue;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;

/// Derived order number column.
pub const ORDER_COLUMN: &str = "PEDIDO";
/// Derived store display name column.
pub const STORE_COLUMN: &str = "TIENDA";
/// Order age column; numeric values are date serials.
pub const AGE_COLUMN: &str = "ANTIGUEDAD";
pub const CODE_FIELD: &str = "CODE";
pub const ID_FIELD: &str = "ID";
pub const LINK_FIELD: &str = "Enlace";

/// Fields carried for selection and linking but never shown as table cells.
pub const HIDDEN_FIELDS: [&str; 3] = [ID_FIELD, CODE_FIELD, LINK_FIELD];

/// One deduplicated order, fields kept in first-insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedOrder {
    fields: Vec<(String, CellValue)>,
}

impl NormalizedOrder {
    /// Sets a field; an existing key keeps its position.
    pub fn set(&mut self, key: &str, value: CellValue) {
        match self.fields.iter_mut().find(|(name, _)| name == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_owned(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn fields(&self) -> &[(String, CellValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields shown in the table, in record order.
    pub fn visible_fields(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields
            .iter()
            .filter(|(name, _)| !HIDDEN_FIELDS.contains(&name.as_str()))
            .map(|(name, value)| (name.as_str(), value))
    }

    /// The per-row print link, when the store was recognised.
    pub fn link(&self) -> Option<String> {
        self.get(LINK_FIELD)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    }

    /// The identifiers a checked row contributes to a print request.
    /// Missing fields become empty strings.
    pub fn selection(&self) -> SelectedOrder {
        let text = |key: &str| self.get(key).map(ToString::to_string).unwrap_or_default();
        SelectedOrder {
            store_id: text(ID_FIELD),
            store_code: text(CODE_FIELD),
            order_number: text(ORDER_COLUMN),
        }
    }
}

impl Serialize for NormalizedOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
