use crate::naming::{starts_with_prefix, NamingStrategy};
use serde::{Deserialize, Serialize};

/// How a field is filled automatically on write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFill {
    Insert,
    Update,
    InsertUpdate,
}

/// Attach a fill strategy to every column with this name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TableFill {
    pub name: String,
    pub fill: FieldFill,
}

/// Default primary key generation strategy of the generated entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Auto,
    None,
    Input,
    AssignId,
    AssignUuid,
}

/// Options deciding how tables and columns map onto entities.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Naming of table name -> entity name.
    pub naming: NamingStrategy,
    /// Naming of column name -> property name. Falls back to `naming`.
    pub column_naming: Option<NamingStrategy>,
    /// Prefixes stripped from table names, e.g. `t_` or `sys_`.
    pub table_prefix: Vec<String>,
    /// Prefixes stripped from column names.
    pub field_prefix: Vec<String>,
    /// Leave all-uppercase names alone.
    pub capital_mode: bool,
    /// Always emit explicit table and field mappings.
    pub entity_table_field_annotation_enable: bool,
    /// Property name of the logical delete marker.
    pub logic_delete_field_name: Option<String>,
    /// Property name of the optimistic lock version.
    pub version_field_name: Option<String>,
    /// Path of the base entity, e.g. `crate::entity::BaseEntity`.
    pub super_entity_class: Option<String>,
    /// Columns declared on the base entity. These end up in the common field list.
    pub super_entity_columns: Vec<String>,
    pub table_fill_list: Vec<TableFill>,
}

impl StrategyConfig {
    pub fn column_naming(&self) -> NamingStrategy {
        self.column_naming.unwrap_or(self.naming)
    }

    pub fn starts_with_table_prefix(&self, table_name: &str) -> bool {
        starts_with_prefix(table_name, &self.table_prefix)
    }

    /// Capital mode applies to names without lowercase letters, e.g. `SYS_USER`.
    pub fn is_capital_mode_naming(&self, name: &str) -> bool {
        self.capital_mode && crate::naming::is_capital_mode(name)
    }

    pub fn include_super_entity_column(&self, column_name: &str) -> bool {
        self.super_entity_columns.iter().any(|c| c.eq_ignore_ascii_case(column_name))
    }

    pub fn super_entity_class(&self) -> Option<&str> {
        self.super_entity_class.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn fill_for(&self, column_name: &str) -> Option<FieldFill> {
        self.table_fill_list
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(column_name))
            .map(|f| f.fill)
    }
}

/// Name patterns of the artifacts generated next to the entity. `{}` is replaced by the entity name.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct NameFormats {
    pub mapper: String,
    pub xml: String,
    pub service: String,
    pub service_impl: String,
    pub controller: String,
}

impl Default for NameFormats {
    fn default() -> Self {
        Self {
            mapper: "{}Mapper".to_string(),
            xml: "{}Mapper".to_string(),
            service: "{}Service".to_string(),
            service_impl: "{}ServiceImpl".to_string(),
            controller: "{}Controller".to_string(),
        }
    }
}

impl NameFormats {
    pub fn format(pattern: &str, entity_name: &str) -> String {
        pattern.replace("{}", entity_name)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Entities extend the active record base instead of being plain records.
    pub active_record: bool,
    pub id_type: Option<IdType>,
    pub names: NameFormats,
}
