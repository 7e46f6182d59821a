use crate::naming::{entity_name, resolve_field_convert, resolve_table_convert};
use crate::{
    resolve_declarations, Declaration, GlobalConfig, Ident, MetadataError, MetadataResult, NameFormats,
    StrategyConfig, TableDescription, TableField,
};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeSet;

/// Everything the renderer needs to know about one table.
///
/// A `TableInfo` is built up over a generation run (fields, common fields, declarations,
/// derived names) and handed to the renderer once complete.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TableInfo {
    /// Name of the table in the database
    pub name: String,
    pub comment: Option<String>,
    entity_name: Ident,
    pub mapper_name: String,
    pub xml_name: String,
    pub service_name: String,
    pub service_impl_name: String,
    pub controller_name: String,
    fields: Vec<TableField>,
    /// Fields declared on the base entity. Rendered after `fields`.
    common_fields: Vec<TableField>,
    have_primary_key: bool,
    field_names: String,
    declarations: BTreeSet<Declaration>,
    convert: bool,
}

impl TableInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build the model for a described table: entity naming, field extraction, and declarations.
    pub fn from_description(
        description: &TableDescription,
        strategy: &StrategyConfig,
        global: &GlobalConfig,
    ) -> MetadataResult<Self> {
        let mut table = TableInfo::new(&description.name);
        table.comment = description.comment.clone();
        table.set_entity_name(strategy, entity_name(&description.name, strategy))?;
        table.set_derived_names(&global.names);
        let mut fields = description
            .columns
            .iter()
            .map(|c| TableField::from_column(c, strategy))
            .collect::<Vec<_>>();
        keep_first_key(&description.name, &mut fields, strategy);
        let (common_fields, fields): (Vec<_>, Vec<_>) = fields
            .into_iter()
            .partition(|f| strategy.include_super_entity_column(&f.column_name));
        table.add_fields(fields);
        table.add_common_fields(common_fields);
        table.import_declarations(strategy, global)?;
        tracing::debug!(
            table = %table.name,
            entity = %table.entity_name,
            convert = table.convert,
            "Extracted table metadata"
        );
        Ok(table)
    }

    pub fn entity_name(&self) -> &Ident {
        &self.entity_name
    }

    /// Sets the entity name and re-resolves whether the table name must be mapped explicitly.
    pub fn set_entity_name(&mut self, strategy: &StrategyConfig, entity_name: impl Into<Ident>) -> MetadataResult<()> {
        let entity_name = entity_name.into();
        if entity_name.is_empty() {
            return Err(MetadataError::IncompleteMetadata(format!(
                "empty entity name for table `{}`",
                self.name
            )));
        }
        self.convert = resolve_table_convert(&self.name, entity_name.as_str(), strategy);
        self.entity_name = entity_name;
        Ok(())
    }

    pub fn set_derived_names(&mut self, names: &NameFormats) {
        let entity = self.entity_name.as_str();
        self.mapper_name = NameFormats::format(&names.mapper, entity);
        self.xml_name = NameFormats::format(&names.xml, entity);
        self.service_name = NameFormats::format(&names.service, entity);
        self.service_impl_name = NameFormats::format(&names.service_impl, entity);
        self.controller_name = NameFormats::format(&names.controller, entity);
    }

    /// Entity name with a lower case first character, e.g. `sysUser`.
    pub fn entity_path(&self) -> MetadataResult<String> {
        let mut chars = self.entity_name.as_str().chars();
        let Some(first) = chars.next() else {
            return Err(MetadataError::IncompleteMetadata(format!(
                "entity name of table `{}` is not set",
                self.name
            )));
        };
        Ok(first.to_lowercase().chain(chars).collect())
    }

    pub fn is_convert(&self) -> bool {
        self.convert
    }

    pub fn set_convert(&mut self, convert: bool) {
        self.convert = convert;
    }

    /// Appends fields. Duplicate property names are not checked; that's on the caller.
    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = TableField>) {
        for field in fields {
            self.have_primary_key |= field.key_flag;
            self.fields.push(field);
        }
    }

    #[deprecated(note = "Please use `add_fields` instead")]
    pub fn set_fields(&mut self, fields: impl IntoIterator<Item = TableField>) {
        self.add_fields(fields)
    }

    pub fn add_common_fields(&mut self, fields: impl IntoIterator<Item = TableField>) {
        for field in fields {
            self.have_primary_key |= field.key_flag;
            self.common_fields.push(field);
        }
    }

    #[deprecated(note = "Please use `add_common_fields` instead")]
    pub fn set_common_fields(&mut self, fields: impl IntoIterator<Item = TableField>) {
        self.add_common_fields(fields)
    }

    pub fn fields(&self) -> &[TableField] {
        &self.fields
    }

    pub fn common_fields(&self) -> &[TableField] {
        &self.common_fields
    }

    /// Fields in rendering order: own fields, then common fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &TableField> + '_ {
        self.fields.iter().chain(self.common_fields.iter())
    }

    pub fn have_primary_key(&self) -> bool {
        self.have_primary_key
    }

    pub fn primary_key(&self) -> Option<&TableField> {
        self.all_fields().find(|f| f.key_flag)
    }

    pub fn key_column(&self) -> Option<&str> {
        self.primary_key().map(|f| f.column_name.as_str())
    }

    /// Scans every field on each call, since fields may still be added after a check.
    pub fn is_logic_delete(&self, logic_delete_property: &str) -> bool {
        self.fields.iter().any(|f| f.name == logic_delete_property)
    }

    pub fn logic_delete_field(&self, logic_delete_property: &str) -> Option<&TableField> {
        self.fields.iter().find(|f| f.name == logic_delete_property)
    }

    /// Comma separated column names of `fields`, in insertion order.
    ///
    /// Computed on the first read and cached. Fields added after that are not reflected until
    /// [`finalize`](Self::finalize) is called. A blank cache is always recomputed.
    pub fn field_names(&mut self) -> &str {
        if self.field_names.trim().is_empty() {
            self.field_names = self.join_field_names();
        }
        &self.field_names
    }

    /// Declare field population done. Recomputes the cached field names from every field, so
    /// the serialized model carries them too.
    pub fn finalize(&mut self) {
        self.field_names = self.join_field_names();
    }

    fn join_field_names(&self) -> String {
        self.fields.iter().map(|f| f.column_name.as_str()).join(", ")
    }

    pub fn declarations(&self) -> &BTreeSet<Declaration> {
        &self.declarations
    }

    pub fn add_declarations(&mut self, declarations: impl IntoIterator<Item = Declaration>) {
        self.declarations.extend(declarations);
    }

    /// Resolve and merge the declarations this table's entity needs.
    pub fn import_declarations(&mut self, strategy: &StrategyConfig, global: &GlobalConfig) -> MetadataResult<()> {
        let declarations = resolve_declarations(self, strategy, global)?;
        self.add_declarations(declarations);
        Ok(())
    }
}

/// A table maps onto a single key property. Later key columns become plain fields.
fn keep_first_key(table_name: &str, fields: &mut [TableField], strategy: &StrategyConfig) {
    let mut keys = fields.iter_mut().filter(|f| f.key_flag);
    if keys.next().is_none() {
        return;
    }
    let demoted = keys
        .map(|f| {
            f.key_flag = false;
            f.key_identity_flag = false;
            let convert = resolve_field_convert(&f.column_name, f.name.as_str(), false, strategy);
            f.set_convert(convert);
            f.column_name.clone()
        })
        .collect::<Vec<_>>();
    if !demoted.is_empty() {
        tracing::warn!(
            table = %table_name,
            columns = ?demoted,
            "Only the first primary key column is used as the key"
        );
    }
}
