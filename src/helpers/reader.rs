use crate::error::OrderSheetError;
use crate::spreadsheet::SpreadsheetError;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

/// A reader over either a file on disk or an uploaded buffer
pub(crate) enum UnifiedReader {
    /// Local file reader
    Local(BufReader<File>),
    /// Uploaded file content (drag and drop, stdin, tests)
    Memory(Cursor<Vec<u8>>),
}

impl UnifiedReader {
    /// Opens a local file, rejecting empty files up front.
    pub(crate) fn open(path: &Path) -> Result<UnifiedReader, OrderSheetError> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            Err(SpreadsheetError::EmptyFile(path.display().to_string()))?;
        }
        Ok(UnifiedReader::Local(BufReader::new(file)))
    }

    /// Wraps an in-memory upload, rejecting an empty read.
    pub(crate) fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<UnifiedReader, OrderSheetError> {
        if bytes.is_empty() {
            Err(SpreadsheetError::EmptyFile(name.to_owned()))?;
        }
        Ok(UnifiedReader::Memory(Cursor::new(bytes)))
    }
}

impl Read for UnifiedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            UnifiedReader::Local(reader) => reader.read(buf),
            UnifiedReader::Memory(reader) => reader.read(buf),
        }
    }
}

impl Seek for UnifiedReader {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        match self {
            UnifiedReader::Local(reader) => reader.seek(pos),
            UnifiedReader::Memory(reader) => reader.seek(pos),
        }
    }
}
