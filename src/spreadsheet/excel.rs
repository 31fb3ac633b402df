//! Office Open XML package helpers
use crate::error::OrderSheetError;
use crate::helpers::reader::UnifiedReader;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use zip::ZipArchive;

/// XML tag name for relationship elements
const TAG_RELATIONSHIP: &[u8] = b"Relationship";

/// Signature of an OLE compound document (legacy xls, or an encrypted xlsx)
const COMPOUND_DOCUMENT_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Opens an xlsx package and loads its sheet list and number formats.
///
/// # Returns
/// Tuple containing:
/// - Zip archive handle
/// - Cell types indexed by style id
/// - List of sheet names and their part paths, in workbook order
pub(super) fn open<W, F>(name: &str, mut reader: UnifiedReader, load_workbook: W, load_number_formats: F) -> Result<(
    ZipArchive<UnifiedReader>,
    Vec<CellType>,
    Vec<(String, String)>
), OrderSheetError>
where
    W: Fn(&mut ZipArchive<UnifiedReader>) -> Result<(Vec<(String, String)>, bool), OrderSheetError>,
    F: Fn(&mut ZipArchive<UnifiedReader>, bool) -> Result<Vec<CellType>, OrderSheetError>,
{
    if is_compound_document(&mut reader)? {
        Err(SpreadsheetError::CompoundDocumentError(name.to_owned()))?;
    }

    let mut zip = ZipArchive::new(reader)?;
    let (sheets, is_1904) = load_workbook(&mut zip)?;
    if sheets.is_empty() {
        Err(SpreadsheetError::SpreadsheetEmptyError(name.to_owned()))?
    }

    let number_formats = load_number_formats(&mut zip, is_1904)?;
    Ok((zip, number_formats, sheets))
}

/// Loads worksheet relationships, mapping relationship ids to part paths.
pub(super) fn load_relationships(zip: &mut ZipArchive<UnifiedReader>, path: &str) -> Result<HashMap<String, String>, OrderSheetError> {
    let mut reader = zip.xml_reader(path)?
        .ok_or_else(|| SpreadsheetError::FileError(path.to_string()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Resolves each style's number format id to a cell type,
/// preferring the workbook's custom formats over the built-in table.
pub(super) fn load_number_formats(format_indexes: Vec<String>, custom_formats: HashMap<String, CellType>, is_1904: bool) -> Vec<CellType> {
    format_indexes
        .iter()
        .map(|id| {
            custom_formats
                .get(id)
                .copied()
                .or_else(|| CellType::parse_builtin_number_format_id(id, is_1904))
                .unwrap_or(CellType::Number)
        })
        .collect()
}

/// Normalizes a relationship target to a path inside the package.
pub(crate) fn to_zip_path(path: Cow<'_, str>) -> String {
    if let Some(stripped) = path.strip_prefix('/') {
        stripped.to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}

/// Checks the leading signature and rewinds the reader.
fn is_compound_document(reader: &mut UnifiedReader) -> Result<bool, OrderSheetError> {
    let mut signature = [0u8; 8];
    let mut filled = 0usize;
    while filled < signature.len() {
        match reader.read(&mut signature[filled..])? {
            0 => break,
            count => filled += count,
        }
    }
    reader.seek(SeekFrom::Start(0))?;
    Ok(filled == signature.len() && signature == COMPOUND_DOCUMENT_SIGNATURE)
}
