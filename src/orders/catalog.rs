//! Static reference data the normalizer works against.

use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::HashSet;
use url::Url;

/// Column holding the composite order identifier unless configured otherwise.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "ID DEL PEDIDO";

/// A store known to the warehouse system.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreRecord {
    /// Display name
    pub customer: String,
    pub code: String,
    /// Store identifier in the printing system
    pub id: u32,
}

/// Lookup tables and constants for one normalization run. Immutable once built.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub identifier_column: String,
    pub ignored_codes: HashSet<String>,
    /// Output projection, in output order
    pub columns: Vec<String>,
    /// Stores keyed by store code
    pub stores: HashMap<String, StoreRecord>,
    pub print_base_url: Url,
}

impl ReferenceData {
    pub fn new(print_base_url: Url) -> Self {
        Self {
            identifier_column: DEFAULT_IDENTIFIER_COLUMN.to_owned(),
            ignored_codes: HashSet::new(),
            columns: Vec::new(),
            stores: HashMap::new(),
            print_base_url,
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignored_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_store(mut self, store: StoreRecord) -> Self {
        self.stores.insert(store.code.to_owned(), store);
        self
    }

    pub fn store(&self, code: Option<&str>) -> Option<&StoreRecord> {
        self.stores.get(code?)
    }

    pub fn is_ignored(&self, code: Option<&str>) -> bool {
        code.map(|code| self.ignored_codes.contains(code)).unwrap_or(false)
    }
}
