use crate::spreadsheet::CellValue;

/// The composite `CODE-X-Y-NUMBER` order identifier of a row.
///
/// Absent and malformed identifiers are valid values: their parts are simply
/// missing. Two identifiers are equal when their trimmed text is equal, and
/// all absent identifiers are equal to each other.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrderIdentifier {
    raw: Option<String>,
}

impl OrderIdentifier {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: Some(raw.trim().to_owned()),
        }
    }

    /// Reads the identifier from a cell; non-text cells use their display text.
    pub fn from_cell(value: Option<&CellValue>) -> Self {
        match value {
            None | Some(CellValue::Empty) => Self::default(),
            Some(CellValue::Text(text)) => Self::parse(text),
            Some(other) => Self::parse(&other.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// The `index`-th hyphen-delimited part.
    pub fn part(&self, index: usize) -> Option<&str> {
        self.raw.as_deref()?.split('-').nth(index)
    }

    /// Part 0: the store code.
    pub fn customer_code(&self) -> Option<&str> {
        self.part(0)
    }

    /// Part 3: the order number.
    pub fn order_number(&self) -> Option<&str> {
        self.part(3)
    }
}
