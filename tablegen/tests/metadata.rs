use tablegen::naming::resolve_table_convert;
use tablegen::*;

fn underscore_to_camel() -> StrategyConfig {
    StrategyConfig {
        naming: NamingStrategy::UnderscoreToCamel,
        ..StrategyConfig::default()
    }
}

fn described(name: &str) -> TableDescription {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "columns": [
            {"name": "id", "type": "bigint", "primary_key": true, "auto_increment": true},
            {"name": "user_name", "type": "varchar(64)", "nullable": true},
        ]
    }))
    .unwrap()
}

#[test]
fn test_lowercase_table_needs_no_explicit_mapping() {
    let strategy = underscore_to_camel();
    let table = TableInfo::from_description(&described("sys_user"), &strategy, &GlobalConfig::default()).unwrap();
    assert_eq!(table.entity_name().as_str(), "SysUser");
    assert!(!table.is_convert());
    assert!(!table.declarations().contains(&Declaration::TABLE_NAME));
}

#[test]
fn test_uppercase_table_needs_explicit_mapping() {
    let strategy = underscore_to_camel();
    let table = TableInfo::from_description(&described("SYS_USER"), &strategy, &GlobalConfig::default()).unwrap();
    assert_eq!(table.entity_name().as_str(), "SysUser");
    assert!(table.is_convert());
    assert!(table.declarations().contains(&Declaration::TABLE_NAME));
}

#[test]
fn test_table_convert_is_pure() {
    let strategy = underscore_to_camel();
    let first = resolve_table_convert("sys_user", "SysUser", &strategy);
    resolve_table_convert("SYS_USER", "SysUser", &strategy);
    resolve_table_convert("t_order", "Order", &strategy);
    assert_eq!(resolve_table_convert("sys_user", "SysUser", &strategy), first);
}

#[test]
fn test_declarations_are_a_set() {
    let strategy = StrategyConfig {
        table_fill_list: vec![
            TableFill {
                name: "created_at".to_string(),
                fill: FieldFill::Insert,
            },
            TableFill {
                name: "updated_at".to_string(),
                fill: FieldFill::InsertUpdate,
            },
        ],
        ..underscore_to_camel()
    };
    let description: TableDescription = serde_json::from_value(serde_json::json!({
        "name": "sys_user",
        "columns": [
            {"name": "id", "type": "bigint", "primary_key": true},
            {"name": "created_at", "type": "timestamp"},
            {"name": "updated_at", "type": "timestamp"},
        ]
    }))
    .unwrap();
    let table = TableInfo::from_description(&description, &strategy, &GlobalConfig::default()).unwrap();
    let again = resolve_declarations(&table, &strategy, &GlobalConfig::default()).unwrap();
    assert_eq!(table.declarations(), &again);
    assert!(again.contains(&Declaration::FIELD_FILL));
    assert!(again.contains(&Declaration::TABLE_FIELD));
    assert_eq!(again.iter().filter(|d| **d == Declaration::FIELD_FILL).count(), 1);
}

#[test]
fn test_table_info_serializes_for_the_renderer() {
    let strategy = underscore_to_camel();
    let table = TableInfo::from_description(&described("sys_user"), &strategy, &GlobalConfig::default()).unwrap();
    let value = serde_json::to_value(&table).unwrap();
    assert_eq!(value["name"], "sys_user");
    assert_eq!(value["entity_name"], "SysUser");
    assert_eq!(value["mapper_name"], "SysUserMapper");
    assert_eq!(value["fields"][1]["name"], "userName");
    assert_eq!(value["fields"][1]["column_name"], "user_name");
}

#[test]
fn test_finalized_table_serializes_field_names() {
    let strategy = underscore_to_camel();
    let mut table = TableInfo::from_description(&described("sys_user"), &strategy, &GlobalConfig::default()).unwrap();
    table.finalize();
    let value = serde_json::to_value(&table).unwrap();
    assert_eq!(value["field_names"], "id, user_name");
}
