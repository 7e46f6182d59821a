use crate::config::Config;
use crate::util::load_table;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct Info {
    /// Table description, as TOML or JSON
    path: PathBuf,

    /// Print the full model as JSON
    #[clap(long)]
    json: bool,
}

impl Info {
    pub fn run(self, config: &Config) -> Result<()> {
        let mut table = load_table(&self.path, config)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&table)?);
            return Ok(());
        }
        let explicit = if table.is_convert() { " (explicit mapping)" } else { "" };
        println!("{} {} -> {}{}", "Table:".bold(), table.name, table.entity_name(), explicit.yellow());
        println!("  mapper: {}, service: {}", table.mapper_name, table.service_name);
        for field in table.all_fields() {
            let key = if field.key_flag { " KEY".green().to_string() } else { String::new() };
            let nullable = if field.nullable { " NULL" } else { "" };
            println!(
                "  {}: {} <- {}{}{}",
                field.name,
                field.property_type(),
                field.column_name,
                nullable,
                key
            );
        }
        println!("  {} {}", "columns:".bold(), table.field_names());
        println!("{}", "Declarations:".bold());
        for declaration in table.declarations() {
            println!("  use {declaration};");
        }
        Ok(())
    }
}
