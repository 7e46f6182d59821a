use crate::naming::{property_name, resolve_field_convert};
use crate::{ColumnDescription, ColumnType, Declaration, FieldFill, Ident, StrategyConfig};
use serde::Serialize;

/// All the metadata we capture about one column and the entity property it maps to.
#[derive(Clone, Debug, Serialize)]
pub struct TableField {
    /// Property name on the entity
    pub name: Ident,
    /// Name of the column in the database
    pub column_name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub comment: Option<String>,
    pub key_flag: bool,
    /// Auto increment. Only ever set together with `key_flag`.
    pub key_identity_flag: bool,
    pub fill: Option<FieldFill>,
    pub version_flag: bool,
    /// The property must declare its column name explicitly.
    pub convert: bool,
}

impl TableField {
    pub fn new(name: impl Into<Ident>, column_name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_name: column_name.into(),
            column_type,
            nullable: false,
            comment: None,
            key_flag: false,
            key_identity_flag: false,
            fill: None,
            version_flag: false,
            convert: false,
        }
    }

    pub fn from_column(column: &ColumnDescription, strategy: &StrategyConfig) -> Self {
        let name = property_name(&column.name, strategy);
        let key_identity_flag = if column.auto_increment && !column.primary_key {
            tracing::warn!(
                column = %column.name,
                "Ignoring auto increment on a column that is not the primary key"
            );
            false
        } else {
            column.auto_increment
        };
        let convert = resolve_field_convert(&column.name, &name, column.primary_key, strategy);
        let version_flag = strategy.version_field_name.as_deref().is_some_and(|v| v == name);
        Self {
            column_type: ColumnType::from_sql(&column.type_name),
            nullable: column.nullable,
            comment: column.comment.clone(),
            key_flag: column.primary_key,
            key_identity_flag,
            fill: strategy.fill_for(&column.name),
            version_flag,
            convert,
            ..TableField::new(name, &column.name, ColumnType::String)
        }
    }

    /// Only changes after creation when table level resolution pins the mapping.
    pub fn set_convert(&mut self, convert: bool) {
        self.convert = convert;
    }

    pub fn property_type(&self) -> &str {
        self.column_type.type_name()
    }

    pub fn declaration(&self) -> Option<Declaration> {
        self.column_type.declaration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NamingStrategy;

    #[test]
    fn test_from_column() {
        let strategy = StrategyConfig {
            naming: NamingStrategy::UnderscoreToCamel,
            version_field_name: Some("revision".to_string()),
            ..StrategyConfig::default()
        };
        let column = ColumnDescription {
            nullable: true,
            ..ColumnDescription::new("created_at", "datetime")
        };
        let field = TableField::from_column(&column, &strategy);
        assert_eq!(field.name, "createdAt");
        assert_eq!(field.column_name, "created_at");
        assert_eq!(field.property_type(), "NaiveDateTime");
        assert!(field.nullable);
        assert!(!field.key_flag);
        assert!(!field.convert);

        let field = TableField::from_column(&ColumnDescription::new("revision", "int"), &strategy);
        assert!(field.version_flag);
    }

    #[test]
    fn test_identity_requires_key() {
        let strategy = StrategyConfig::default();
        let column = ColumnDescription {
            auto_increment: true,
            ..ColumnDescription::new("seq", "bigint")
        };
        let field = TableField::from_column(&column, &strategy);
        assert!(!field.key_identity_flag);

        let column = ColumnDescription {
            auto_increment: true,
            primary_key: true,
            ..ColumnDescription::new("id", "bigint")
        };
        let field = TableField::from_column(&column, &strategy);
        assert!(field.key_flag);
        assert!(field.key_identity_flag);
        assert!(field.convert);
    }
}
