pub use tablegen_attr::{
    resolve_declarations, ColumnDescription, ColumnType, Declaration, FieldFill, GlobalConfig, IdType, Ident,
    MetadataError, MetadataResult, NameFormats, NamingStrategy, StrategyConfig, TableDescription, TableField,
    TableFill, TableInfo,
};
pub use tablegen_core::config::{Config, InjectorConfig};
pub use tablegen_core::placeholder::Dialect;
pub use tablegen_core::{Error, Result};

pub mod config {
    pub use tablegen_core::config::*;
}

pub mod naming {
    pub use tablegen_attr::naming::*;
}

pub mod statement {
    pub use tablegen_core::injector::*;
    pub use tablegen_core::registry::*;
    pub use tablegen_core::sql_source::*;
    pub use tablegen_core::template::*;
}
