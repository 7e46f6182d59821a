use anyhow::{Context, Result};
use std::path::Path;
use tablegen::{Config, TableDescription, TableInfo};

/// Read a table description. `.json` files are parsed as JSON, everything else as TOML.
pub fn read_table_description(path: &Path) -> Result<TableDescription> {
    let buf = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_table_description(&buf, path.extension().and_then(|e| e.to_str()))
        .with_context(|| format!("Invalid table description {}", path.display()))
}

fn parse_table_description(buf: &str, extension: Option<&str>) -> Result<TableDescription> {
    let description = match extension {
        Some(ext) if ext.eq_ignore_ascii_case("json") => serde_json::from_str(buf)?,
        _ => toml::from_str(buf)?,
    };
    Ok(description)
}

pub fn load_table(path: &Path, config: &Config) -> Result<TableInfo> {
    let description = read_table_description(path)?;
    let mut table = TableInfo::from_description(&description, &config.strategy, &config.global)?;
    table.finalize();
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_description() {
        let description = parse_table_description(
            r#"
            name = "sys_user"
            comment = "users"

            [[columns]]
            name = "id"
            type = "bigint"
            primary_key = true
            auto_increment = true

            [[columns]]
            name = "user_name"
            type = "varchar(64)"
            nullable = true
            "#,
            Some("toml"),
        )
        .unwrap();
        assert_eq!(description.name, "sys_user");
        assert_eq!(description.columns.len(), 2);
        assert!(description.columns[0].primary_key);
        assert_eq!(description.columns[1].type_name, "varchar(64)");
    }

    #[test]
    fn test_parse_json_description() {
        let description = parse_table_description(
            r#"{"name": "role", "columns": [{"name": "id", "type": "int"}]}"#,
            Some("JSON"),
        )
        .unwrap();
        assert_eq!(description.name, "role");
        assert!(parse_table_description("name = ", None).is_err());
    }
}
