//! # Spreadsheet Reader
//!
//! Decodes the first worksheet of an Excel workbook (`.xlsx`, `.xlsm`,
//! `.xltx`, `.xltm`) into [`RawRow`] records, using the first row as the
//! header. Date-formatted numeric cells arrive as date-times.
pub(crate) mod cell;
pub mod date;
pub(crate) mod excel;
pub(crate) mod reference;
pub mod row;
pub(crate) mod sheet;
pub(crate) mod xlsx;

use crate::error::OrderSheetError;
use crate::error::ResultMessage;
use crate::helpers::reader::UnifiedReader;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
pub use row::CellValue;
pub use row::RawRow;
use sheet::Sheet;
use std::path::Path;
use thiserror::Error;

/// Errors raised while opening or decoding a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Unsupported or unrecognized file format
    #[error("Cannot detect file format for '{name}'")]
    InvalidFileFormat { name: String },

    #[error("File '{0}' is empty")]
    EmptyFile(String),

    #[error("Spreadsheet '{0}' contains no worksheets")]
    SpreadsheetEmptyError(String),

    /// A required part is missing from the package
    #[error("Missing '{0}' in workbook package")]
    FileError(String),

    /// Legacy xls or a password protected workbook
    #[error("Spreadsheet '{0}' is a compound document (legacy .xls or password protected)")]
    CompoundDocumentError(String),
}

/// Formats the reader understands, detected from the file extension.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpreadsheetFormat {
    Xlsx,
}

impl SpreadsheetFormat {
    pub fn detect(name: &str) -> Result<Self, SpreadsheetError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xltx" | "xltm") => Ok(Self::Xlsx),
            _ => Err(SpreadsheetError::InvalidFileFormat {
                name: name.to_owned(),
            }),
        }
    }
}

/// Common interface of workbook readers.
pub(crate) trait Spreadsheet {
    /// Returns the file name of this spreadsheet
    fn name(&self) -> String;

    fn load_shared_strings(&mut self) -> Result<Vec<String>, OrderSheetError>;

    fn read_first_sheet(&mut self) -> Result<Sheet, OrderSheetError>;

    /// Reads the first worksheet as header-keyed records.
    fn read_rows(&mut self) -> Result<Vec<RawRow>, OrderSheetError> {
        let message = format!("Read '{}' failed", self.name());
        let shared_strings = self.load_shared_strings().with_prefix(&message)?;
        let sheet = self.read_first_sheet().with_prefix(&message)?;
        if sheet.is_empty() {
            tracing::warn!(file = %sheet.file_name, sheet = %sheet.name, "first worksheet has no cells");
        }
        let rows = sheet.records(&shared_strings);
        tracing::debug!(
            file = %sheet.file_name,
            sheet = %sheet.name,
            cells = sheet.cells.len(),
            rows = rows.len(),
            "worksheet decoded"
        );
        Ok(rows)
    }
}

/// Reads the first worksheet of a workbook on disk.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, OrderSheetError> {
    let name = path.display().to_string();
    SpreadsheetFormat::detect(&name)?;
    let reader = UnifiedReader::open(path)?;
    open_spreadsheet(&name, reader)?.read_rows()
}

/// Reads the first worksheet of an uploaded workbook.
pub fn read_rows_from_bytes(name: &str, bytes: Vec<u8>) -> Result<Vec<RawRow>, OrderSheetError> {
    SpreadsheetFormat::detect(name)?;
    let reader = UnifiedReader::from_bytes(name, bytes)?;
    open_spreadsheet(name, reader)?.read_rows()
}

fn open_spreadsheet(name: &str, reader: UnifiedReader) -> Result<Box<dyn Spreadsheet>, OrderSheetError> {
    match SpreadsheetFormat::detect(name)? {
        SpreadsheetFormat::Xlsx => Ok(Box::new(XlsxSpreadsheet::open(name, reader)?)),
    }
}
