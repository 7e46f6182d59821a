use crate::{GlobalConfig, MetadataError, MetadataResult, StrategyConfig, TableInfo};
use proc_macro2::TokenStream;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// A module-qualified path the generated entity has to import, e.g. `chrono::NaiveDateTime`.
///
/// Declarations are opaque tokens: the resolver only needs equality and ordering over them,
/// and leaves the actual `use` syntax to the renderer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Declaration(Cow<'static, str>);

impl Declaration {
    /// Marker for entities that are plain serializable records.
    pub const SERIALIZE: Declaration = Declaration::from_static("serde::Serialize");
    /// Base of active-record style entities.
    pub const ACTIVE_RECORD_MODEL: Declaration = Declaration::from_static("tablegen::activerecord::Model");
    pub const TABLE_NAME: Declaration = Declaration::from_static("tablegen::annotation::TableName");
    pub const TABLE_ID: Declaration = Declaration::from_static("tablegen::annotation::TableId");
    pub const ID_TYPE: Declaration = Declaration::from_static("tablegen::annotation::IdType");
    pub const TABLE_FIELD: Declaration = Declaration::from_static("tablegen::annotation::TableField");
    pub const FIELD_FILL: Declaration = Declaration::from_static("tablegen::annotation::FieldFill");
    pub const TABLE_LOGIC: Declaration = Declaration::from_static("tablegen::annotation::TableLogic");
    pub const VERSION: Declaration = Declaration::from_static("tablegen::annotation::Version");

    pub(crate) const fn from_static(path: &'static str) -> Self {
        Declaration(Cow::Borrowed(path))
    }

    /// Parse a user supplied path, such as a configured super entity.
    pub fn parse(path: &str) -> MetadataResult<Self> {
        let path = path.trim();
        syn::parse_str::<syn::Path>(path).map_err(|e| MetadataError::InvalidDeclaration {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Declaration(Cow::Owned(path.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Declaration {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl quote::ToTokens for Declaration {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let path: syn::Path = syn::parse_str(&self.0).expect("declarations are always valid paths");
        path.to_tokens(tokens);
    }
}

/// Compute the declarations the entity generated for `table` needs.
///
/// Every rule is additive, so the result does not depend on evaluation order.
pub fn resolve_declarations(
    table: &TableInfo,
    strategy: &StrategyConfig,
    global: &GlobalConfig,
) -> MetadataResult<BTreeSet<Declaration>> {
    if table.entity_name().is_empty() {
        return Err(MetadataError::IncompleteMetadata(format!(
            "cannot resolve declarations for table `{}` before its entity name is set",
            table.name
        )));
    }
    let mut declarations = BTreeSet::new();
    match strategy.super_entity_class() {
        Some(class) => {
            declarations.insert(Declaration::parse(class)?);
        }
        None if global.active_record => {
            declarations.insert(Declaration::ACTIVE_RECORD_MODEL);
        }
        None => {
            declarations.insert(Declaration::SERIALIZE);
        }
    }
    if table.is_convert() {
        declarations.insert(Declaration::TABLE_NAME);
    }
    if let Some(marker) = strategy.logic_delete_field_name.as_deref() {
        if table.is_logic_delete(marker) {
            declarations.insert(Declaration::TABLE_LOGIC);
        }
    }
    if global.id_type.is_some() && table.have_primary_key() {
        declarations.insert(Declaration::ID_TYPE);
        declarations.insert(Declaration::TABLE_ID);
    }
    let version_field = strategy.version_field_name.as_deref().filter(|v| !v.trim().is_empty());
    for field in table.fields() {
        if let Some(d) = field.declaration() {
            declarations.insert(d);
        }
        if field.key_flag {
            if field.convert || field.key_identity_flag {
                declarations.insert(Declaration::TABLE_ID);
            }
            if field.key_identity_flag {
                declarations.insert(Declaration::ID_TYPE);
            }
        } else if field.convert {
            declarations.insert(Declaration::TABLE_FIELD);
        }
        if field.fill.is_some() {
            declarations.insert(Declaration::TABLE_FIELD);
            declarations.insert(Declaration::FIELD_FILL);
        }
        if version_field.is_some_and(|v| field.name == v) {
            declarations.insert(Declaration::VERSION);
        }
    }
    tracing::debug!(table = %table.name, count = declarations.len(), "Resolved declarations");
    Ok(declarations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnType, FieldFill, IdType, TableField};
    use assert_matches::assert_matches;

    fn table() -> TableInfo {
        let mut table = TableInfo::new("user");
        table.set_entity_name(&StrategyConfig::default(), "User").unwrap();
        table.add_fields([
            TableField {
                key_flag: true,
                ..TableField::new("id", "id", ColumnType::I64)
            },
            TableField::new("name", "name", ColumnType::String),
        ]);
        table
    }

    #[test]
    fn test_defaults_to_serializable() {
        let set = resolve_declarations(&table(), &StrategyConfig::default(), &GlobalConfig::default()).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![Declaration::SERIALIZE]);
    }

    #[test]
    fn test_base_entity() {
        let strategy = StrategyConfig {
            super_entity_class: Some("crate::entity::BaseEntity".to_string()),
            ..StrategyConfig::default()
        };
        let global = GlobalConfig {
            active_record: true,
            ..GlobalConfig::default()
        };
        let set = resolve_declarations(&table(), &strategy, &global).unwrap();
        assert!(set.contains(&Declaration::parse("crate::entity::BaseEntity").unwrap()));
        assert!(!set.contains(&Declaration::SERIALIZE));
        assert!(!set.contains(&Declaration::ACTIVE_RECORD_MODEL));

        let set = resolve_declarations(&table(), &StrategyConfig::default(), &global).unwrap();
        assert!(set.contains(&Declaration::ACTIVE_RECORD_MODEL));
        assert!(!set.contains(&Declaration::SERIALIZE));
    }

    #[test]
    fn test_invalid_base_entity() {
        let strategy = StrategyConfig {
            super_entity_class: Some("com.example.BaseEntity".to_string()),
            ..StrategyConfig::default()
        };
        let err = resolve_declarations(&table(), &strategy, &GlobalConfig::default()).unwrap_err();
        assert_matches!(err, MetadataError::InvalidDeclaration { .. });
    }

    #[test]
    fn test_fill_fields_add_field_and_fill_once() {
        let mut table = table();
        let before = resolve_declarations(&table, &StrategyConfig::default(), &GlobalConfig::default()).unwrap();
        table.add_fields([
            TableField {
                fill: Some(FieldFill::Insert),
                ..TableField::new("createdAt", "created_at", ColumnType::I64)
            },
            TableField {
                fill: Some(FieldFill::InsertUpdate),
                ..TableField::new("updatedAt", "updated_at", ColumnType::I64)
            },
        ]);
        let after = resolve_declarations(&table, &StrategyConfig::default(), &GlobalConfig::default()).unwrap();
        let added = after.difference(&before).cloned().collect::<Vec<_>>();
        assert_eq!(added, vec![Declaration::FIELD_FILL, Declaration::TABLE_FIELD]);
    }

    #[test]
    fn test_key_and_version() {
        let mut table = TableInfo::new("account");
        table.set_entity_name(&StrategyConfig::default(), "Account").unwrap();
        table.add_fields([
            TableField {
                key_flag: true,
                key_identity_flag: true,
                ..TableField::new("id", "id", ColumnType::I64)
            },
            TableField::new("revision", "revision", ColumnType::I32),
            TableField::new("createdAt", "created_at", ColumnType::DateTime),
        ]);
        let strategy = StrategyConfig {
            version_field_name: Some("revision".to_string()),
            ..StrategyConfig::default()
        };
        let set = resolve_declarations(&table, &strategy, &GlobalConfig::default()).unwrap();
        assert!(set.contains(&Declaration::TABLE_ID));
        assert!(set.contains(&Declaration::ID_TYPE));
        assert!(set.contains(&Declaration::VERSION));
        assert!(set.contains(&Declaration::from_static("chrono::NaiveDateTime")));
        assert!(!set.contains(&Declaration::TABLE_FIELD));
    }

    #[test]
    fn test_global_id_type_and_logic_delete() {
        let mut table = table();
        table.add_fields([TableField::new("deleted", "deleted", ColumnType::Bool)]);
        let strategy = StrategyConfig {
            logic_delete_field_name: Some("deleted".to_string()),
            ..StrategyConfig::default()
        };
        let global = GlobalConfig {
            id_type: Some(IdType::AssignId),
            ..GlobalConfig::default()
        };
        let set = resolve_declarations(&table, &strategy, &global).unwrap();
        assert!(set.contains(&Declaration::TABLE_LOGIC));
        assert!(set.contains(&Declaration::TABLE_ID));
        assert!(set.contains(&Declaration::ID_TYPE));
    }

    #[test]
    fn test_is_a_set() {
        let mut table = table();
        table.set_convert(true);
        let strategy = StrategyConfig::default();
        let global = GlobalConfig::default();
        let a = resolve_declarations(&table, &strategy, &global).unwrap();
        let b = resolve_declarations(&table, &strategy, &global).unwrap();
        assert_eq!(a, b);
        assert!(a.contains(&Declaration::TABLE_NAME));
    }

    #[test]
    fn test_requires_entity_name() {
        let table = TableInfo::new("user");
        let err = resolve_declarations(&table, &StrategyConfig::default(), &GlobalConfig::default()).unwrap_err();
        assert_matches!(err, MetadataError::IncompleteMetadata(_));
    }

    #[test]
    fn test_declaration_tokens() {
        let d = Declaration::TABLE_ID;
        assert_eq!(quote::quote!(use #d;).to_string(), "use tablegen :: annotation :: TableId ;");
    }
}
