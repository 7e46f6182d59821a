use crate::Declaration;
use serde::Serialize;

/// Semantic type of a column, as seen by the generated entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnType {
    Bool,
    I16,
    I32,
    I64,
    U32,
    F32,
    F64,
    Decimal,
    String,
    Bytes,
    Date,
    Time,
    DateTime,
    DateTimeTz,
    Uuid,
    Json,
    /// A database type we don't know about. Rendered as `String`, keeps the raw database type.
    Other(String),
}

impl ColumnType {
    /// Convert a database type name (as reported by schema introspection) into a column type.
    /// Length and precision arguments are ignored, e.g. `varchar(255)` and `decimal(10, 2)`.
    pub fn from_sql(type_name: &str) -> Self {
        let normalized = type_name.trim().to_lowercase();
        let base = normalized
            .split('(')
            .next()
            .unwrap_or_default()
            .trim_end_matches(" unsigned")
            .trim();
        match base {
            "bool" | "boolean" | "bit" => ColumnType::Bool,
            "tinyint" | "smallint" | "int2" | "smallserial" => ColumnType::I16,
            "int" | "integer" | "int4" | "mediumint" | "serial" | "xid" => ColumnType::I32,
            "bigint" | "int8" | "bigserial" | "xid8" => ColumnType::I64,
            "oid" => ColumnType::U32,
            "real" | "float" | "float4" => ColumnType::F32,
            "double" | "double precision" | "float8" => ColumnType::F64,
            "numeric" | "decimal" | "money" => ColumnType::Decimal,
            "char" | "character" | "varchar" | "character varying" | "bpchar" | "name" | "text" | "tinytext"
            | "mediumtext" | "longtext" | "enum" | "set" => ColumnType::String,
            "bytea" | "binary" | "varbinary" | "blob" | "tinyblob" | "mediumblob" | "longblob" => {
                ColumnType::Bytes
            }
            "date" => ColumnType::Date,
            "time" | "timetz" => ColumnType::Time,
            "timestamp" | "datetime" => ColumnType::DateTime,
            "timestamptz" | "timestamp with time zone" => ColumnType::DateTimeTz,
            "uuid" => ColumnType::Uuid,
            "json" | "jsonb" => ColumnType::Json,
            _ => ColumnType::Other(type_name.to_string()),
        }
    }

    /// The type as written in the generated entity.
    pub fn type_name(&self) -> &str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::I16 => "i16",
            ColumnType::I32 => "i32",
            ColumnType::I64 => "i64",
            ColumnType::U32 => "u32",
            ColumnType::F32 => "f32",
            ColumnType::F64 => "f64",
            ColumnType::Decimal => "Decimal",
            ColumnType::String | ColumnType::Other(_) => "String",
            ColumnType::Bytes => "Vec<u8>",
            ColumnType::Date => "NaiveDate",
            ColumnType::Time => "NaiveTime",
            ColumnType::DateTime => "NaiveDateTime",
            ColumnType::DateTimeTz => "DateTime<chrono::Utc>",
            ColumnType::Uuid => "Uuid",
            ColumnType::Json => "Value",
        }
    }

    /// The external declaration the generated entity must import to use this type, if any.
    pub fn declaration(&self) -> Option<Declaration> {
        let path = match self {
            ColumnType::Decimal => "rust_decimal::Decimal",
            ColumnType::Date => "chrono::NaiveDate",
            ColumnType::Time => "chrono::NaiveTime",
            ColumnType::DateTime => "chrono::NaiveDateTime",
            ColumnType::DateTimeTz => "chrono::DateTime",
            ColumnType::Uuid => "uuid::Uuid",
            ColumnType::Json => "serde_json::Value",
            _ => return None,
        };
        Some(Declaration::from_static(path))
    }
}
