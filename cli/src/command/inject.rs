use crate::config::Config;
use crate::util::load_table;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use sqlformat::{FormatOptions, QueryParams};
use std::path::PathBuf;
use tablegen::statement::{SqlInjector, StatementRegistry};

#[derive(Parser, Debug)]
pub struct Inject {
    /// Table description, as TOML or JSON
    path: PathBuf,

    /// Scope the statements are registered in. Defaults to the mapper name.
    #[clap(long, short)]
    scope: Option<String>,

    /// Bind this many example ids to each statement
    #[clap(long, default_value_t = 3)]
    ids: usize,
}

impl Inject {
    pub fn run(self, config: &Config) -> Result<()> {
        let table = load_table(&self.path, config)?;
        let scope = self.scope.unwrap_or_else(|| table.mapper_name.clone());
        let mut registry = StatementRegistry::new();
        let injector = SqlInjector::from_config(config);
        let count = injector.inject(&mut registry, &scope, &table, table.entity_name().as_str())?;
        if count == 0 {
            eprintln!("{} No statements apply to table {}", "WARNING".yellow(), table.name);
            return Ok(());
        }
        let ids = (1..=self.ids as i64).collect::<Vec<_>>();
        for statement in registry.statements() {
            println!("{} {}", "Statement:".bold(), statement.id);
            println!("  {}", statement.source.dimmed());
            let dialect = config.injector.dialect;
            match statement.bind(&ids, dialect, config.injector.empty_collection)? {
                Some(bound) => {
                    let sql = sqlformat::format(&bound.sql, &QueryParams::None, FormatOptions::default());
                    println!("{sql}");
                    println!("  -- parameters: {:?}", bound.parameters);
                }
                None => println!("  -- skipped, nothing to bind"),
            }
        }
        eprintln!("{} Injected {} statements into {}", "SUCCESS".green(), count, scope);
        Ok(())
    }
}
