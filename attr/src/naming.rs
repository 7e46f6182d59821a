//! Naming conventions, and the decision whether a name must be mapped explicitly.
use crate::StrategyConfig;
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Keep the database name as is.
    #[default]
    NoChange,
    /// `sys_user` -> `sysUser`
    #[serde(alias = "underline_to_camel")]
    UnderscoreToCamel,
}

pub fn contains_uppercase(name: &str) -> bool {
    name.chars().any(char::is_uppercase)
}

/// True for names with at least one letter and no lowercase letters.
pub fn is_capital_mode(name: &str) -> bool {
    name.chars().any(char::is_alphabetic) && !name.chars().any(char::is_lowercase)
}

pub fn capital_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn starts_with_prefix(name: &str, prefixes: &[String]) -> bool {
    strip_prefix(name, prefixes).is_some()
}

fn strip_prefix<'a>(name: &'a str, prefixes: &[String]) -> Option<&'a str> {
    prefixes
        .iter()
        .filter(|p| !p.is_empty() && name.len() >= p.len())
        .find(|p| name.is_char_boundary(p.len()) && name[..p.len()].eq_ignore_ascii_case(p))
        .map(|p| &name[p.len()..])
}

/// Mixed and upper case input is lower cased first, so `SYS_USER` and `sys_user` both become `sysUser`.
pub fn underscore_to_camel(name: &str) -> String {
    name.to_lowercase().from_case(Case::Snake).to_case(Case::Camel)
}

/// Strip the first matching prefix, then apply the naming strategy.
pub fn process_name(name: &str, naming: NamingStrategy, prefixes: &[String]) -> String {
    let name = strip_prefix(name, prefixes).unwrap_or(name);
    match naming {
        NamingStrategy::UnderscoreToCamel => underscore_to_camel(name),
        NamingStrategy::NoChange => name.to_string(),
    }
}

pub fn entity_name(table_name: &str, strategy: &StrategyConfig) -> String {
    capital_first(&process_name(table_name, strategy.naming, &strategy.table_prefix))
}

pub fn property_name(column_name: &str, strategy: &StrategyConfig) -> String {
    process_name(column_name, strategy.column_naming(), &strategy.field_prefix)
}

/// Whether the entity for `table_name` must declare its table name explicitly.
///
/// Never fails: when no rule applies, the name maps by convention.
pub fn resolve_table_convert(table_name: &str, entity_name: &str, strategy: &StrategyConfig) -> bool {
    if strategy.starts_with_table_prefix(table_name) || strategy.entity_table_field_annotation_enable {
        return true;
    }
    if strategy.is_capital_mode_naming(table_name) {
        return false;
    }
    match strategy.column_naming() {
        // the converted name always matches unless the raw casing is ambiguous
        NamingStrategy::UnderscoreToCamel => contains_uppercase(table_name),
        NamingStrategy::NoChange => !entity_name.eq_ignore_ascii_case(table_name),
    }
}

/// Whether a property must declare its column name explicitly. Key columns always do.
pub fn resolve_field_convert(column_name: &str, property_name: &str, key: bool, strategy: &StrategyConfig) -> bool {
    if strategy.entity_table_field_annotation_enable || key {
        return true;
    }
    if strategy.is_capital_mode_naming(column_name) {
        return false;
    }
    match strategy.column_naming() {
        NamingStrategy::UnderscoreToCamel => contains_uppercase(column_name),
        NamingStrategy::NoChange => !property_name.eq_ignore_ascii_case(column_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camel() -> StrategyConfig {
        StrategyConfig {
            naming: NamingStrategy::UnderscoreToCamel,
            ..StrategyConfig::default()
        }
    }

    #[test]
    fn test_underscore_to_camel() {
        assert_eq!(underscore_to_camel("sys_user"), "sysUser");
        assert_eq!(underscore_to_camel("SYS_USER"), "sysUser");
        assert_eq!(underscore_to_camel("name"), "name");
        assert_eq!(underscore_to_camel("user2_role"), "user2Role");
    }

    #[test]
    fn test_process_name() {
        let prefixes = vec!["t_".to_string()];
        assert_eq!(process_name("t_order_item", NamingStrategy::UnderscoreToCamel, &prefixes), "orderItem");
        assert_eq!(process_name("T_order", NamingStrategy::NoChange, &prefixes), "order");
        assert_eq!(process_name("order", NamingStrategy::NoChange, &prefixes), "order");
        assert_eq!(entity_name("t_order_item", &StrategyConfig {
            table_prefix: prefixes,
            ..camel()
        }), "OrderItem");
    }

    #[test]
    fn test_table_convert() {
        let strategy = camel();
        assert!(!resolve_table_convert("sys_user", "SysUser", &strategy));
        assert!(resolve_table_convert("SYS_USER", "SysUser", &strategy));

        let prefixed = StrategyConfig {
            table_prefix: vec!["sys_".to_string()],
            ..camel()
        };
        assert!(resolve_table_convert("sys_user", "User", &prefixed));

        let annotated = StrategyConfig {
            entity_table_field_annotation_enable: true,
            ..camel()
        };
        assert!(resolve_table_convert("user", "User", &annotated));

        let capital = StrategyConfig {
            capital_mode: true,
            ..camel()
        };
        assert!(!resolve_table_convert("SYS_USER", "SysUser", &capital));

        let plain = StrategyConfig::default();
        assert!(!resolve_table_convert("user", "User", &plain));
        assert!(resolve_table_convert("user_info", "UserInfo", &plain));
    }

    #[test]
    fn test_table_convert_is_pure() {
        let strategy = camel();
        let first = resolve_table_convert("SYS_USER", "SysUser", &strategy);
        assert!(!resolve_table_convert("sys_role", "SysRole", &strategy));
        assert_eq!(first, resolve_table_convert("SYS_USER", "SysUser", &strategy));
    }

    #[test]
    fn test_field_convert() {
        let strategy = camel();
        assert!(!resolve_field_convert("user_name", "userName", false, &strategy));
        assert!(resolve_field_convert("userName", "username", false, &strategy));
        assert!(resolve_field_convert("id", "id", true, &strategy));
        let plain = StrategyConfig::default();
        assert!(!resolve_field_convert("name", "name", false, &plain));
        assert!(resolve_field_convert("name", "title", false, &plain));
    }
}
