use crate::orders::dispatch::SelectedOrder;
use crate::orders::record::NormalizedOrder;

/// Checked state of each displayed row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    checked: Vec<bool>,
}

impl Selection {
    /// A selection over `len` rows with nothing checked.
    pub fn new(len: usize) -> Self {
        Self {
            checked: vec![false; len],
        }
    }

    /// A selection over `len` rows with everything checked.
    pub fn all(len: usize) -> Self {
        Self {
            checked: vec![true; len],
        }
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Flips one row and returns its new state; out-of-range rows stay unchecked.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.checked.get_mut(index) {
            Some(checked) => {
                *checked = !*checked;
                *checked
            }
            None => false,
        }
    }

    pub fn set(&mut self, index: usize, checked: bool) {
        if let Some(slot) = self.checked.get_mut(index) {
            *slot = checked;
        }
    }

    pub fn set_all(&mut self, checked: bool) {
        self.checked.iter_mut().for_each(|slot| *slot = checked);
    }

    pub fn count(&self) -> usize {
        self.checked.iter().filter(|checked| **checked).count()
    }

    /// Whether a print request can be made.
    pub fn can_process(&self) -> bool {
        self.checked.contains(&true)
    }

    /// Selected-count badge text, blank when nothing is checked.
    pub fn counter_label(&self) -> String {
        match self.count() {
            0 => String::new(),
            count => count.to_string(),
        }
    }

    /// The checked rows' identifiers, in table order.
    pub fn selected_orders(&self, orders: &[NormalizedOrder]) -> Vec<SelectedOrder> {
        orders
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_checked(*index))
            .map(|(_, order)| order.selection())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::record::ID_FIELD;
    use crate::orders::record::ORDER_COLUMN;
    use crate::spreadsheet::CellValue;

    fn order(number: &str, store_id: f64) -> NormalizedOrder {
        let mut order = NormalizedOrder::default();
        order.set(ORDER_COLUMN, CellValue::from(number));
        order.set(ID_FIELD, CellValue::Number(store_id));
        order
    }

    #[test]
    fn toggling_and_counting() {
        let mut selection = Selection::new(3);
        assert!(!selection.can_process());
        assert_eq!(selection.counter_label(), "");

        assert!(selection.toggle(1));
        assert!(selection.toggle(2));
        assert!(!selection.toggle(1));
        assert!(!selection.toggle(10));

        assert_eq!(selection.count(), 1);
        assert_eq!(selection.counter_label(), "1");
        assert!(selection.can_process());
    }

    #[test]
    fn select_all_and_clear() {
        let mut selection = Selection::all(4);
        assert_eq!(selection.count(), 4);
        selection.set_all(false);
        assert_eq!(selection.count(), 0);
        selection.set(3, true);
        selection.set(7, true);
        assert!(selection.is_checked(3));
        assert_eq!(selection.len(), 4);
    }

    #[test]
    fn selected_orders_follow_table_order() {
        let orders = vec![order("10", 3.0), order("15", 4.0), order("20", 5.0)];
        let mut selection = Selection::new(orders.len());
        selection.toggle(2);
        selection.toggle(0);

        let selected = selection.selected_orders(&orders);
        let numbers: Vec<&str> = selected.iter().map(|s| s.order_number.as_str()).collect();
        let stores: Vec<&str> = selected.iter().map(|s| s.store_id.as_str()).collect();
        assert_eq!(numbers, vec!["10", "20"]);
        assert_eq!(stores, vec!["3", "5"]);
    }
}
