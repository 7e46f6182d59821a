//! SQL templates for the injected batch delete methods.
//!
//! Templates contain a `<foreach>` element: the collection-expansion placeholder. At bind time it
//! expands to one parameter per element of the bound collection, e.g.
//! ```sql
//! DELETE FROM user WHERE id IN (<foreach item="item" index="index" collection="coll" separator=",">#{item}</foreach>)
//! ```
//! becomes `DELETE FROM user WHERE id IN (?,?,?)` for three ids.

/// The collection every batch template expands.
pub const COLLECTION: &str = "coll";

pub const DELETE_BATCH_BY_IDS: &str = "delete_batch_by_ids";
pub const LOGIC_DELETE_BATCH_BY_IDS: &str = "logic_delete_batch_by_ids";

fn foreach_ids() -> String {
    format!(r#"<foreach item="item" index="index" collection="{COLLECTION}" separator=",">#{{item}}</foreach>"#)
}

/// Soft delete flag of a table, and the values that mark a row deleted or live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicDelete {
    pub column: String,
    pub delete_value: String,
    pub not_delete_value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlMethod {
    DeleteBatchByIds,
    LogicDeleteBatchByIds(LogicDelete),
}

impl SqlMethod {
    /// Method id the statement is registered under.
    pub fn method(&self) -> &'static str {
        match self {
            SqlMethod::DeleteBatchByIds => DELETE_BATCH_BY_IDS,
            SqlMethod::LogicDeleteBatchByIds(_) => LOGIC_DELETE_BATCH_BY_IDS,
        }
    }

    /// Pure string assembly; nothing is validated here.
    pub fn build_batch_delete_template(&self, table_name: &str, key_column: &str) -> String {
        let ids = foreach_ids();
        match self {
            SqlMethod::DeleteBatchByIds => {
                format!("DELETE FROM {table_name} WHERE {key_column} IN ({ids})")
            }
            SqlMethod::LogicDeleteBatchByIds(LogicDelete {
                column,
                delete_value,
                not_delete_value,
            }) => format!(
                "UPDATE {table_name} SET {column}={delete_value} WHERE {key_column} IN ({ids}) AND {column}={not_delete_value}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logic() -> SqlMethod {
        SqlMethod::LogicDeleteBatchByIds(LogicDelete {
            column: "deleted".to_string(),
            delete_value: "1".to_string(),
            not_delete_value: "0".to_string(),
        })
    }

    #[test]
    fn test_delete_template() {
        let sql = SqlMethod::DeleteBatchByIds.build_batch_delete_template("user", "id");
        assert_eq!(
            sql,
            r#"DELETE FROM user WHERE id IN (<foreach item="item" index="index" collection="coll" separator=",">#{item}</foreach>)"#
        );
    }

    #[test]
    fn test_logic_delete_template() {
        let sql = logic().build_batch_delete_template("user", "id");
        assert_eq!(sql.matches("<foreach").count(), 1);
        assert_eq!(sql.matches("</foreach>").count(), 1);
        assert!(sql.starts_with("UPDATE user SET deleted=1 WHERE id IN ("));
        assert!(sql.ends_with(") AND deleted=0"));
        assert_eq!(sql, logic().build_batch_delete_template("user", "id"));
    }

    #[test]
    fn test_method_ids() {
        assert_eq!(SqlMethod::DeleteBatchByIds.method(), "delete_batch_by_ids");
        assert_eq!(logic().method(), "logic_delete_batch_by_ids");
    }
}
