use crate::config::Config;
use crate::registry::{StatementDefinition, StatementRegistry, StatementTarget};
use crate::template::{LogicDelete, SqlMethod, DELETE_BATCH_BY_IDS, LOGIC_DELETE_BATCH_BY_IDS};
use crate::{Error, Result};
use tablegen_attr::TableInfo;

/// A statement the injector can add to a table's scope.
pub trait Method {
    /// Method id the statement is registered under.
    fn method(&self) -> &'static str;

    /// Whether the statement makes sense for `table`. Methods that don't apply are skipped.
    fn applies_to(&self, _table: &TableInfo) -> bool {
        true
    }

    fn inject_statement<'r>(
        &self,
        registry: &'r mut StatementRegistry,
        scope: &str,
        table: &TableInfo,
        model_type: &str,
    ) -> Result<&'r StatementDefinition>;
}

fn target(table: &TableInfo) -> Result<StatementTarget> {
    let key_column = table.key_column().ok_or_else(|| {
        Error::IncompleteMetadata(format!("table `{}` has no primary key", table.name))
    })?;
    Ok(StatementTarget {
        table: table.name.clone(),
        key_column: key_column.to_string(),
    })
}

fn inject_template<'r>(
    sql_method: &SqlMethod,
    registry: &'r mut StatementRegistry,
    scope: &str,
    table: &TableInfo,
    model_type: &str,
) -> Result<&'r StatementDefinition> {
    let target = target(table)?;
    let sql = sql_method.build_batch_delete_template(&target.table, &target.key_column);
    registry.add_delete_statement(scope, sql_method.method(), &sql, target, model_type)
}

/// `DELETE FROM .. WHERE key IN (..)`
#[derive(Clone, Copy, Debug, Default)]
pub struct DeleteBatchByIds;

impl Method for DeleteBatchByIds {
    fn method(&self) -> &'static str {
        DELETE_BATCH_BY_IDS
    }

    fn applies_to(&self, table: &TableInfo) -> bool {
        table.have_primary_key()
    }

    fn inject_statement<'r>(
        &self,
        registry: &'r mut StatementRegistry,
        scope: &str,
        table: &TableInfo,
        model_type: &str,
    ) -> Result<&'r StatementDefinition> {
        inject_template(&SqlMethod::DeleteBatchByIds, registry, scope, table, model_type)
    }
}

/// `UPDATE .. SET flag = deleted WHERE key IN (..) AND flag = not deleted`
#[derive(Clone, Debug)]
pub struct LogicDeleteBatchByIds {
    /// Property name of the logical delete marker.
    pub marker: String,
    pub delete_value: String,
    pub not_delete_value: String,
}

impl LogicDeleteBatchByIds {
    fn logic_delete(&self, table: &TableInfo) -> Result<LogicDelete> {
        let field = table.logic_delete_field(&self.marker).ok_or_else(|| {
            Error::IncompleteMetadata(format!(
                "table `{}` has no logical delete field `{}`",
                table.name, self.marker
            ))
        })?;
        Ok(LogicDelete {
            column: field.column_name.clone(),
            delete_value: self.delete_value.clone(),
            not_delete_value: self.not_delete_value.clone(),
        })
    }
}

impl Method for LogicDeleteBatchByIds {
    fn method(&self) -> &'static str {
        LOGIC_DELETE_BATCH_BY_IDS
    }

    fn applies_to(&self, table: &TableInfo) -> bool {
        table.have_primary_key() && table.is_logic_delete(&self.marker)
    }

    fn inject_statement<'r>(
        &self,
        registry: &'r mut StatementRegistry,
        scope: &str,
        table: &TableInfo,
        model_type: &str,
    ) -> Result<&'r StatementDefinition> {
        let sql_method = SqlMethod::LogicDeleteBatchByIds(self.logic_delete(table)?);
        inject_template(&sql_method, registry, scope, table, model_type)
    }
}

/// The list of methods injected into every scope.
#[derive(Default)]
pub struct SqlInjector {
    methods: Vec<Box<dyn Method>>,
}

impl SqlInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical batch delete, plus the logical one when a marker is configured.
    pub fn from_config(config: &Config) -> Self {
        let mut injector = Self::new().with_method(DeleteBatchByIds);
        if let Some(marker) = config.strategy.logic_delete_field_name.as_deref() {
            injector = injector.with_method(LogicDeleteBatchByIds {
                marker: marker.to_string(),
                delete_value: config.injector.logic_delete_value.clone(),
                not_delete_value: config.injector.logic_not_delete_value.clone(),
            });
        }
        injector
    }

    pub fn with_method(mut self, method: impl Method + 'static) -> Self {
        self.methods.push(Box::new(method));
        self
    }

    pub fn methods(&self) -> impl Iterator<Item = &dyn Method> + '_ {
        self.methods.iter().map(|m| m.as_ref())
    }

    /// Register every applicable method for `table` in `scope`. Returns the number of
    /// statements registered.
    ///
    /// Stops at the first error. Statements registered before it stay registered; use
    /// [`StatementRegistry::remove_scope`] to tear the scope down.
    pub fn inject(
        &self,
        registry: &mut StatementRegistry,
        scope: &str,
        table: &TableInfo,
        model_type: &str,
    ) -> Result<usize> {
        let mut count = 0;
        for method in &self.methods {
            if !method.applies_to(table) {
                tracing::debug!(scope, method = method.method(), table = %table.name, "Skipping method");
                continue;
            }
            method.inject_statement(registry, scope, table, model_type)?;
            count += 1;
        }
        Ok(count)
    }
}
