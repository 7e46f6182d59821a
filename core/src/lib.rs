pub use self::error::{Error, Result};
pub use self::injector::{DeleteBatchByIds, LogicDeleteBatchByIds, Method, SqlInjector};
pub use self::registry::{SqlCommandType, StatementDefinition, StatementRegistry, StatementTarget};
pub use self::sql_source::{BoundSql, EmptyCollection, SqlSource};
pub use self::template::{LogicDelete, SqlMethod};

mod error;
pub mod config;
pub mod injector;
pub mod placeholder;
pub mod registry;
pub mod sql_source;
pub mod template;
