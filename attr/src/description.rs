use serde::Deserialize;

/// A table as reported by schema introspection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TableDescription {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDescription>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    /// Database type name, e.g. `varchar(64)` or `timestamptz`.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ColumnDescription {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            ..Self::default()
        }
    }
}
