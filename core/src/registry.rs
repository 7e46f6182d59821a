use crate::placeholder::Dialect;
use crate::sql_source::{BoundSql, EmptyCollection, SqlSource};
use crate::{Error, Result};
use indexmap::map::Entry;
use indexmap::IndexMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SqlCommandType {
    Delete,
}

/// Table and column a statement matches rows on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementTarget {
    pub table: String,
    pub key_column: String,
}

/// A registered, executable statement.
#[derive(Clone, Debug)]
pub struct StatementDefinition {
    /// `scope.method`
    pub id: String,
    pub scope: String,
    pub method: String,
    /// The template the statement was compiled from.
    pub source: String,
    pub sql_source: SqlSource,
    pub target: StatementTarget,
    pub command_type: SqlCommandType,
    /// Model type rows are mapped to.
    pub result_type: String,
}

impl StatementDefinition {
    pub fn bind<T: Clone>(&self, ids: &[T], dialect: Dialect, empty: EmptyCollection) -> Result<Option<BoundSql<T>>> {
        self.sql_source.bind(ids, dialect, empty)
    }
}

/// Statements by owner scope and method id.
///
/// Registration needs `&mut self`, so there is a single writer while statements are set up;
/// afterwards the registry can be shared for reads.
#[derive(Debug, Default)]
pub struct StatementRegistry {
    statements: IndexMap<(String, String), StatementDefinition>,
}

impl StatementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `sql` and register it as a delete statement of `scope`.
    ///
    /// Either the statement is registered, or an error is returned and the registry is unchanged.
    /// Registering the same method twice in a scope is a [`Error::RegistrationConflict`].
    pub fn add_delete_statement(
        &mut self,
        scope: &str,
        method: &str,
        sql: &str,
        target: StatementTarget,
        result_type: &str,
    ) -> Result<&StatementDefinition> {
        let sql_source = SqlSource::compile(sql)?;
        match self.statements.entry((scope.to_string(), method.to_string())) {
            Entry::Occupied(_) => {
                tracing::warn!(scope, method, "Statement already registered");
                Err(Error::RegistrationConflict {
                    scope: scope.to_string(),
                    method: method.to_string(),
                })
            }
            Entry::Vacant(entry) => {
                tracing::debug!(scope, method, table = %target.table, "Registered statement");
                Ok(entry.insert(StatementDefinition {
                    id: format!("{scope}.{method}"),
                    scope: scope.to_string(),
                    method: method.to_string(),
                    source: sql.to_string(),
                    sql_source,
                    target,
                    command_type: SqlCommandType::Delete,
                    result_type: result_type.to_string(),
                }))
            }
        }
    }

    pub fn get(&self, scope: &str, method: &str) -> Option<&StatementDefinition> {
        self.statements.get(&(scope.to_string(), method.to_string()))
    }

    pub fn contains(&self, scope: &str, method: &str) -> bool {
        self.get(scope, method).is_some()
    }

    /// Tear down a scope. Returns how many statements were removed.
    pub fn remove_scope(&mut self, scope: &str) -> usize {
        let before = self.statements.len();
        self.statements.retain(|(s, _), _| s != scope);
        before - self.statements.len()
    }

    pub fn statements(&self) -> impl Iterator<Item = &StatementDefinition> + '_ {
        self.statements.values()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
