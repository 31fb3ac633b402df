use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::row::RawRow;
use std::collections::HashMap;
use std::collections::HashSet;

/// The non-empty cells of one worksheet, in document order.
pub(crate) struct Sheet {
    /// Source file name
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    pub(crate) cells: Vec<Cell>,
}

impl Sheet {
    pub(super) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(super) fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Turns the sheet into row records, sheet-to-JSON style: the first row
    /// holding any cell is the header, cells under a blank header are
    /// dropped, repeated header names get `_1`, `_2` suffixes and rows left
    /// without values are skipped.
    pub(crate) fn records(&self, shared_strings: &[String]) -> Vec<RawRow> {
        let mut rows = self.cells.chunk_by(|a, b| a.row == b.row);
        let Some(header) = rows.next() else {
            return Vec::new();
        };

        let mut used = HashSet::<String>::new();
        let mut columns = HashMap::<usize, String>::new();
        for cell in header {
            let base = cell.to_value(shared_strings).to_string();
            if base.trim().is_empty() {
                continue;
            }
            let mut name = base.clone();
            let mut suffix = 0usize;
            while !used.insert(name.clone()) {
                suffix += 1;
                name = format!("{base}_{suffix}");
            }
            columns.insert(cell.col, name);
        }

        rows.filter_map(|cells| {
            let mut record = RawRow::new();
            for cell in cells {
                if let Some(column) = columns.get(&cell.col) {
                    let value = cell.to_value(shared_strings);
                    if !value.is_empty() {
                        record.insert(column.to_owned(), value);
                    }
                }
            }
            (!record.is_empty()).then_some(record)
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::spreadsheet::cell::Cell;
    use crate::spreadsheet::cell::CellType;
    use crate::spreadsheet::row::CellValue;
    use crate::spreadsheet::sheet::Sheet;

    fn push(sheet: &mut Sheet, row: usize, col: usize, value: &str) {
        sheet.push(Cell {
            row,
            col,
            kind: CellType::InlineString,
            value: value.to_owned(),
        });
    }

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("orders.xlsx", "Hoja1");
        assert!(sheet.is_empty());
        assert!(sheet.records(&[]).is_empty());
    }

    #[test]
    fn sheet_header_only() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 0, 0, "ID DEL PEDIDO");
        assert!(!sheet.is_empty());
        assert!(sheet.records(&[]).is_empty());
    }

    #[test]
    fn sheet_records() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 1, 1, "ID DEL PEDIDO");
        push(&mut sheet, 1, 3, "CLIENTE");
        push(&mut sheet, 2, 1, "A1-X-Y-2");
        push(&mut sheet, 4, 1, "B2-X-Y-3");
        push(&mut sheet, 4, 3, "Ana");
        let records = sheet.records(&[]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("ID DEL PEDIDO"), Some(&CellValue::from("A1-X-Y-2")));
        assert!(!records[0].contains("CLIENTE"));
        assert_eq!(records[1].get("CLIENTE"), Some(&CellValue::from("Ana")));
    }

    #[test]
    fn sheet_records_skip_headerless_columns() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 0, 0, "ID DEL PEDIDO");
        push(&mut sheet, 0, 1, "  ");
        push(&mut sheet, 1, 1, "orphan");
        push(&mut sheet, 2, 0, "A1-X-Y-2");
        push(&mut sheet, 2, 1, "orphan");
        let records = sheet.records(&[]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn sheet_records_duplicate_headers() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 0, 0, "NOTA");
        push(&mut sheet, 0, 1, "NOTA");
        push(&mut sheet, 0, 2, "NOTA");
        push(&mut sheet, 1, 0, "a");
        push(&mut sheet, 1, 1, "b");
        push(&mut sheet, 1, 2, "c");
        let records = sheet.records(&[]);

        assert_eq!(records[0].get("NOTA"), Some(&CellValue::from("a")));
        assert_eq!(records[0].get("NOTA_1"), Some(&CellValue::from("b")));
        assert_eq!(records[0].get("NOTA_2"), Some(&CellValue::from("c")));
    }
}
