//! One load / select / process cycle over an order sheet.

use crate::error::OrderSheetError;
use crate::error::ResultMessage;
use crate::orders::dispatch::build_print_url;
use crate::orders::normalizer::normalize;
use crate::orders::normalizer::rows_from_json;
use crate::orders::table;
use crate::orders::DispatchError;
use crate::orders::NormalizedOrder;
use crate::orders::ReferenceData;
use crate::orders::Selection;
use crate::spreadsheet;
use crate::spreadsheet::RawRow;
use std::path::Path;
use url::Url;

/// Holds the normalized orders of the last load and their checked state.
#[derive(Debug)]
pub struct Session {
    reference: ReferenceData,
    orders: Vec<NormalizedOrder>,
    selection: Selection,
}

impl Session {
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            reference,
            orders: Vec::new(),
            selection: Selection::default(),
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn orders(&self) -> &[NormalizedOrder] {
        &self.orders
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replaces the current orders with the contents of `path`.
    ///
    /// `.json` files hold an array of row objects; anything else goes through
    /// the workbook reader. On failure the session is left empty.
    pub fn load_path(&mut self, path: &Path) -> Result<usize, OrderSheetError> {
        self.clear();
        let is_json = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        let rows = if is_json {
            read_json_rows(path)
        } else {
            spreadsheet::read_rows(path)
        };
        self.accept(&path.display().to_string(), rows)
    }

    /// Replaces the current orders with an uploaded workbook.
    pub fn load_bytes(&mut self, name: &str, bytes: Vec<u8>) -> Result<usize, OrderSheetError> {
        self.clear();
        let rows = spreadsheet::read_rows_from_bytes(name, bytes);
        self.accept(name, rows)
    }

    fn accept(&mut self, name: &str, rows: Result<Vec<RawRow>, OrderSheetError>) -> Result<usize, OrderSheetError> {
        let rows = rows.inspect_err(|e| tracing::error!(file = name, "Error processing file: {}", e))?;
        self.orders = normalize(&rows, &self.reference);
        self.selection = Selection::all(self.orders.len());
        tracing::info!(file = name, rows = rows.len(), orders = self.orders.len(), "orders loaded");
        Ok(self.orders.len())
    }

    pub fn clear(&mut self) {
        self.orders.clear();
        self.selection = Selection::default();
    }

    /// Checks or unchecks one row; out-of-range rows are ignored.
    pub fn set(&mut self, index: usize, checked: bool) {
        self.selection.set(index, checked);
    }

    /// Flips the checked state of a row and returns its new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.selection.toggle(index)
    }

    pub fn set_all(&mut self, checked: bool) {
        self.selection.set_all(checked);
    }

    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    pub fn counter_label(&self) -> String {
        self.selection.counter_label()
    }

    pub fn render(&self) -> String {
        table::render(&self.orders, &self.selection)
    }

    /// Builds the print URL for the checked rows, then unchecks everything.
    pub fn process_selected(&mut self) -> Result<Url, DispatchError> {
        let selected = self.selection.selected_orders(&self.orders);
        let url = build_print_url(&self.reference.print_base_url, &selected)
            .inspect_err(|_| tracing::warn!("Select at least one order to print"))?;
        tracing::info!(orders = selected.len(), url = %url, "print request built");
        self.selection.set_all(false);
        Ok(url)
    }
}

fn read_json_rows(path: &Path) -> Result<Vec<RawRow>, OrderSheetError> {
    let message = format!("Read '{}' failed", path.display());
    let contents = std::fs::read_to_string(path)
        .map_err(OrderSheetError::from)
        .with_prefix(&message)?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(OrderSheetError::from)
        .with_prefix(&message)?;
    Ok(rows_from_json(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::StoreRecord;
    use std::io::Write;

    fn reference() -> ReferenceData {
        let url = Url::parse("http://warehouse.example/print.aspx").unwrap();
        ReferenceData::new(url)
            .with_columns(["PEDIDO", "TIENDA"])
            .with_ignored_codes(["444"])
            .with_store(StoreRecord {
                customer: "Store A".to_owned(),
                code: "A1".to_owned(),
                id: 7,
            })
            .with_store(StoreRecord {
                customer: "Store B".to_owned(),
                code: "B2".to_owned(),
                id: 5,
            })
    }

    fn json_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    const ORDERS: &str = r#"[
        {"ID DEL PEDIDO": "A1-x-y-2"},
        {"ID DEL PEDIDO": "A1-x-y-2"},
        {"ID DEL PEDIDO": "B2-x-y-9"},
        {"ID DEL PEDIDO": "444-x-y-3"}
    ]"#;

    #[test]
    fn load_selects_everything() {
        let file = json_file(ORDERS);
        let mut session = Session::new(reference());
        assert_eq!(session.load_path(file.path()).unwrap(), 2);
        assert_eq!(session.selected_count(), 2);
        assert_eq!(session.counter_label(), "2");
        assert!(session.render().contains("Store B"));
    }

    #[test]
    fn process_then_clear() {
        let file = json_file(ORDERS);
        let mut session = Session::new(reference());
        session.load_path(file.path()).unwrap();

        let url = session.process_selected().unwrap();
        assert_eq!(url.query(), Some("PedidoNum=2,9&TiendaId=7,5"));
        assert_eq!(session.selected_count(), 0);
        assert_eq!(session.counter_label(), "");
        assert_eq!(session.process_selected(), Err(DispatchError::NothingSelected));
    }

    #[test]
    fn toggled_rows_are_left_out() {
        let file = json_file(ORDERS);
        let mut session = Session::new(reference());
        session.load_path(file.path()).unwrap();
        assert!(!session.toggle(0));

        let url = session.process_selected().unwrap();
        assert_eq!(url.query(), Some("PedidoNum=9&TiendaId=5"));
    }

    #[test]
    fn failed_load_leaves_session_empty() {
        let file = json_file(ORDERS);
        let mut session = Session::new(reference());
        session.load_path(file.path()).unwrap();

        let broken = json_file("{\"not\": \"an array\"}");
        let error = session.load_path(broken.path()).unwrap_err();
        assert_eq!(error.to_string(), "Expected a list of rows");
        assert!(session.orders().is_empty());
        assert_eq!(session.selected_count(), 0);

        assert!(session.load_bytes("orders.xlsx", b"garbage".to_vec()).is_err());
        assert!(session.orders().is_empty());
    }

    #[test]
    fn setting_a_row_twice_keeps_it_checked() {
        let file = json_file(ORDERS);
        let mut session = Session::new(reference());
        session.load_path(file.path()).unwrap();
        session.set_all(false);

        session.set(1, true);
        session.set(1, true);
        session.set(9, true);
        assert_eq!(session.selected_count(), 1);
        assert!(session.selection().is_checked(1));

        let url = session.process_selected().unwrap();
        assert_eq!(url.query(), Some("PedidoNum=9&TiendaId=5"));
    }

    #[test]
    fn set_all_round_trip() {
        let file = json_file(ORDERS);
        let mut session = Session::new(reference());
        session.load_path(file.path()).unwrap();
        session.set_all(false);
        assert_eq!(session.selected_count(), 0);
        session.set_all(true);
        assert_eq!(session.selected_count(), session.orders().len());
        assert_eq!(session.selection().len(), 2);
        assert_eq!(session.reference().columns, vec!["PEDIDO", "TIENDA"]);
    }
}
