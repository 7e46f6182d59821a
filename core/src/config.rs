use crate::placeholder::Dialect;
use crate::sql_source::EmptyCollection;
use serde::{Deserialize, Serialize};
use std::env::var;
use std::path::PathBuf;
use tablegen_attr::{GlobalConfig, StrategyConfig};

/// Overrides the config file lookup.
pub const CONFIG_ENV: &str = "TABLEGEN_CONFIG";

pub fn get_var_config_path() -> Option<PathBuf> {
    var(CONFIG_ENV).ok().filter(|s| !s.trim().is_empty()).map(PathBuf::from)
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub strategy: StrategyConfig,
    pub global: GlobalConfig,
    pub injector: InjectorConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct InjectorConfig {
    pub dialect: Dialect,
    pub empty_collection: EmptyCollection,
    /// Value of the logical delete marker on a deleted row. Inserted into the sql verbatim.
    pub logic_delete_value: String,
    pub logic_not_delete_value: String,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            empty_collection: EmptyCollection::default(),
            logic_delete_value: "1".to_string(),
            logic_not_delete_value: "0".to_string(),
        }
    }
}
