//! Print requests for the warehouse system.
//!
//! The query is written verbatim (`PedidoNum=<csv>&TiendaId=<csv>`) instead
//! of being form-encoded, so the separating commas reach the server as-is.
//! Values come from the store catalog and from identifier parts.

use serde::Serialize;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, PartialEq)]
pub enum DispatchError {
    #[error("No orders selected for printing")]
    NothingSelected,
}

/// One checked row, as carried into a print request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SelectedOrder {
    pub store_id: String,
    pub store_code: String,
    pub order_number: String,
}

/// The print link of a single order.
pub fn print_link(base: &Url, order_number: &str, store_id: &str) -> Url {
    with_query(base, order_number, store_id)
}

/// Builds the print URL for the selected orders, in selection order.
pub fn build_print_url(base: &Url, selections: &[SelectedOrder]) -> Result<Url, DispatchError> {
    if selections.is_empty() {
        return Err(DispatchError::NothingSelected);
    }
    let order_numbers = selections
        .iter()
        .map(|selection| selection.order_number.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let store_ids = selections
        .iter()
        .map(|selection| selection.store_id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    Ok(with_query(base, &order_numbers, &store_ids))
}

/// Replaces any query already on the base address.
fn with_query(base: &Url, order_numbers: &str, store_ids: &str) -> Url {
    let mut url = base.clone();
    url.set_query(Some(&format!("PedidoNum={order_numbers}&TiendaId={store_ids}")));
    url
}
