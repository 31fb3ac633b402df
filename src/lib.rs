//! # Order Sheet
//!
//! Turns a warehouse shipment export into a deduplicated order table and a
//! print request for the orders an operator keeps checked.
//!
//! ## Features
//!
//! - **Workbook input**: reads the first worksheet of an `.xlsx` workbook,
//!   using the first row as the header. Date-formatted cells become date-times.
//! - **JSON input**: an array of row objects is accepted as an alternative.
//! - **Normalization**: one row per order identifier (first occurrence wins),
//!   ignored customer codes dropped, and `PEDIDO` / `TIENDA` / print link
//!   derived from the composite identifier and the store catalog.
//! - **Age formatting**: numeric `ANTIGUEDAD` serials render as `dd/mm/yyyy HH:MM`.
//! - **Print requests**: `<base>?PedidoNum=<csv>&TiendaId=<csv>` in selection order.
//!
//! ## Entry points
//!
//! - [`Session`]: load, select and process in one place
//! - [`normalize`] / [`normalize_json`]: the pure normalization step
//! - [`build_print_url`]: the print request on its own

pub mod config;
pub mod error;
pub(crate) mod helpers;
pub mod orders;
pub mod session;
pub mod spreadsheet;

pub use config::load_config;
pub use config::Config;
pub use error::OrderSheetError;
pub use orders::build_print_url;
pub use orders::normalize;
pub use orders::normalize_json;
pub use orders::NormalizedOrder;
pub use orders::ReferenceData;
pub use orders::SelectedOrder;
pub use orders::StoreRecord;
pub use session::Session;
