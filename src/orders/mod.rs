//! Order normalization, selection and print dispatch.

pub mod catalog;
pub mod dispatch;
pub mod identifier;
pub mod normalizer;
pub mod record;
pub mod selection;
pub mod table;

pub use catalog::ReferenceData;
pub use catalog::StoreRecord;
pub use dispatch::build_print_url;
pub use dispatch::DispatchError;
pub use dispatch::SelectedOrder;
pub use identifier::OrderIdentifier;
pub use normalizer::normalize;
pub use normalizer::normalize_json;
pub use normalizer::NormalizeError;
pub use record::NormalizedOrder;
pub use selection::Selection;
