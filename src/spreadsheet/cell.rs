use crate::spreadsheet::date::serial_to_datetime;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::row::CellValue;
use chrono::NaiveDate;
use chrono::NaiveDateTime;

/// Types of cell data in an xlsx worksheet.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Boolean,
    /// Numeric values
    Number,
    /// Date or time values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Date or time values stored as numbers from 1904 epoch
    NumberDate1904,
    /// ISO 8601 date/time strings (`t="d"`)
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values such as `#N/A`
    Error,
}

impl CellType {
    fn number_date(is_1904: bool) -> Self {
        if is_1904 {
            Self::NumberDate1904
        } else {
            Self::NumberDate1900
        }
    }

    /// Maps the type attribute of a `<c>` element.
    pub(crate) fn parse_type_attribute(value: Option<&str>) -> Self {
        match value {
            Some("inlineStr" | "str") => Self::InlineString,
            Some("s") => Self::SharedString,
            Some("d") => Self::IsoDateTime,
            Some("b") => Self::Boolean,
            Some("e") => Self::Error,
            _ => Self::Number,
        }
    }

    /// Parses built-in Excel number format IDs that denote dates or times.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "14" | "15" | "16" | "17" | "18" | "19" | "20" | "21" | "22" | "45" | "46" | "47" => {
                Some(Self::number_date(is_1904))
            }
            _ => None,
        }
    }

    /// Parses custom number format strings, looking for date or time tokens
    /// outside literals, escapes and bracketed sections.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_bracket = false;
        let mut is_temporal = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_bracket => is_literal = true,

                ']' if is_bracket => is_bracket = false,
                '[' if !is_literal => is_bracket = true,
                _ if is_literal || is_bracket => (),

                'Y' | 'y' | 'D' | 'd' | 'H' | 'h' | 'S' | 's' => is_temporal = true,
                _ => (),
            }
        }

        if is_temporal {
            Self::number_date(is_1904)
        } else {
            Self::Number
        }
    }
}

/// A single non-empty worksheet cell with its raw text.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row index (0-based)
    pub(crate) row: usize,
    /// Column index (0-based)
    pub(crate) col: usize,
    pub(crate) kind: CellType,
    pub(crate) value: String,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub(crate) fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Decodes the raw text into a typed value.
    /// Date-formatted numbers become date-times; anything that fails to
    /// parse is kept as text so a bad cell never aborts the read.
    pub(crate) fn to_value(&self, shared_strings: &[String]) -> CellValue {
        match self.kind {
            CellType::Empty => CellValue::Empty,
            CellType::Boolean => CellValue::Bool(self.value == "1" || self.value == "true"),
            CellType::Number => match self.value.parse::<f64>() {
                Ok(number) => CellValue::Number(number),
                Err(_) => {
                    tracing::debug!(cell = %self.reference(), value = %self.value, "non-numeric value kept as text");
                    CellValue::Text(self.value.to_owned())
                }
            },
            CellType::NumberDate1900 | CellType::NumberDate1904 => {
                let is_1904 = self.kind == CellType::NumberDate1904;
                match self.value.parse::<f64>() {
                    Ok(serial) => serial_to_datetime(serial, is_1904)
                        .map(CellValue::DateTime)
                        .unwrap_or(CellValue::Number(serial)),
                    Err(_) => CellValue::Text(self.value.to_owned()),
                }
            }
            CellType::IsoDateTime => parse_iso_datetime(&self.value)
                .map(CellValue::DateTime)
                .unwrap_or_else(|| CellValue::Text(self.value.to_owned())),
            CellType::SharedString => self
                .value
                .parse::<usize>()
                .ok()
                .and_then(|index| shared_strings.get(index))
                .map(|text| CellValue::Text(text.to_owned()))
                .unwrap_or(CellValue::Empty),
            CellType::InlineString | CellType::Error => CellValue::Text(self.value.to_owned()),
        }
    }
}

/// Parses the ISO forms written into `t="d"` cells.
fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
