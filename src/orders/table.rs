//! Plain-text rendering of the order table.

use crate::orders::record::NormalizedOrder;
use crate::orders::selection::Selection;

const LINK_HEADER: &str = "Imprimir";
const NO_LINK: &str = "#";

/// Renders one line per order: check mark, 1-based index, visible fields and
/// the print link. Columns are the visible keys in first-seen order.
pub fn render(orders: &[NormalizedOrder], selection: &Selection) -> String {
    let mut columns = Vec::<&str>::new();
    for order in orders {
        for (name, _) in order.visible_fields() {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
    }

    let mut header = vec![String::new(), "#".to_owned()];
    header.extend(columns.iter().map(|name| name.to_string()));
    header.push(LINK_HEADER.to_owned());

    let mut lines = vec![header];
    for (index, order) in orders.iter().enumerate() {
        let mark = if selection.is_checked(index) { "[x]" } else { "[ ]" };
        let mut line = vec![mark.to_owned(), (index + 1).to_string()];
        line.extend(columns.iter().map(|name| {
            order.get(name).map(ToString::to_string).unwrap_or_default()
        }));
        line.push(order.link().unwrap_or_else(|| NO_LINK.to_owned()));
        lines.push(line);
    }

    let mut widths = vec![0usize; columns.len() + 3];
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    for line in &lines {
        let mut text = String::new();
        for (position, (cell, width)) in line.iter().zip(&widths).enumerate() {
            if position > 0 {
                text.push_str("  ");
            }
            text.push_str(&format!("{cell:<width$}"));
        }
        output.push_str(text.trim_end());
        output.push('\n');
    }
    output
}
