use crate::error::OrderSheetError;
use crate::error::ResultMessage;
use crate::orders::catalog::DEFAULT_IDENTIFIER_COLUMN;
use crate::orders::ReferenceData;
use crate::orders::StoreRecord;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// File looked up next to the executable when no path is given.
pub const CONFIG_FILE_NAME: &str = "order-sheet.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_identifier_column")]
    pub identifier_column: String,
    pub print_base_url: String,
    #[serde(default)]
    pub ignored_shipments: Vec<String>,
    pub columns: Vec<String>,
    #[serde(default)]
    pub stores: Vec<StoreRecord>,
}

fn default_identifier_column() -> String {
    DEFAULT_IDENTIFIER_COLUMN.to_owned()
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
identifier_column = "ID DEL PEDIDO"
print_base_url = "http://fmorion.dnsalias.com/orion/paginas/Bodega/ListaBodegaPedidosTienda.aspx"
ignored_shipments = ["444", "999"]
columns = ["PEDIDO", "TIENDA", "ANTIGUEDAD", "ESTADO", "TRANSPORTISTA"]

[[stores]]
customer = "Tienda Centro"
code = "A1"
id = 7

[[stores]]
customer = "Tienda Norte"
code = "B2"
id = 19

[[stores]]
customer = "Tienda Sur"
code = "C3"
id = 9
"#;

/// Load configuration
///
/// Search order:
/// 1. The explicit path, when given
/// 2. `order-sheet.toml` next to the executable
/// 3. The embedded default
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        tracing::info!("Loading config from: {}", path.display());
        return read_config(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return read_config(&config_path);
            }
            tracing::debug!("{} not found at: {}", CONFIG_FILE_NAME, exe_dir.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config '{}'", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Invalid config '{}'", path.display()))
}

impl TryFrom<Config> for ReferenceData {
    type Error = OrderSheetError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        let url = Url::parse(&config.print_base_url)
            .map_err(OrderSheetError::from)
            .with_prefix("Invalid print_base_url")?;
        let mut reference = ReferenceData::new(url)
            .with_columns(config.columns)
            .with_ignored_codes(config.ignored_shipments);
        reference.identifier_column = config.identifier_column;
        for store in config.stores {
            reference = reference.with_store(store);
        }
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.identifier_column, "ID DEL PEDIDO");
        assert_eq!(config.columns[0], "PEDIDO");
        assert_eq!(config.stores.len(), 3);

        let reference = ReferenceData::try_from(config).unwrap();
        assert_eq!(reference.store(Some("B2")).map(|store| store.id), Some(19));
        assert!(reference.is_ignored(Some("444")));
        assert_eq!(reference.print_base_url.host_str(), Some("fmorion.dnsalias.com"));
    }

    #[test]
    fn explicit_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
print_base_url = "http://warehouse.example/print.aspx"
columns = ["PEDIDO"]
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.identifier_column, DEFAULT_IDENTIFIER_COLUMN);
        assert!(config.stores.is_empty());
        assert!(config.ignored_shipments.is_empty());
    }

    #[test]
    fn explicit_path_errors_propagate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "columns = 3").unwrap();
        let error = load_config(Some(file.path())).unwrap_err();
        assert!(error.to_string().starts_with("Invalid config"));

        let missing = file.path().with_extension("missing");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = Config {
            identifier_column: default_identifier_column(),
            print_base_url: "not a url".to_owned(),
            ignored_shipments: Vec::new(),
            columns: Vec::new(),
            stores: Vec::new(),
        };
        let error = ReferenceData::try_from(config).unwrap_err();
        assert!(error.to_string().starts_with("Invalid print_base_url: "));
    }
}
