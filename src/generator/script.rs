use super::{
    naming::{qualified, staging_table},
    render, DdlError,
};
use crate::model::FeatureClass;

pub const DEFAULT_SCHEMA: &str = "public";

/// Options that shape the generated script
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOptions {
    /// Target schema
    pub schema: String,
    /// Prefix the script with `DROP TABLE IF EXISTS ... CASCADE`
    pub drop_before_create: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            drop_before_create: true,
        }
    }
}

/// The generated output for one feature class
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetScript {
    /// Dataset name as declared in the workspace; also the name of the source layer
    pub table_name: String,
    pub sql: String,
    /// See [`FeatureClass::column_list`]
    pub columns: String,
}

impl DatasetScript {
    /// `class` is expected to have been assembled for `options.schema`.
    pub fn build(class: &FeatureClass, options: &ImportOptions) -> Result<Self, DdlError> {
        let ddl = render(class)?;
        let sql = if options.drop_before_create {
            format!(
                "DROP TABLE IF EXISTS {} CASCADE;\n{ddl}",
                qualified(&class.schema, &class.name)
            )
        } else {
            ddl
        };

        Ok(Self {
            table_name: class.name.clone(),
            sql,
            columns: class.column_list(),
        })
    }

    /// Move the rows of the staging table filled by the bulk import into the final table and
    /// drop the staging table.
    pub fn copy_from_staging(&self, schema: &str) -> String {
        let table = qualified(schema, &self.table_name);
        let staging = qualified(schema, &staging_table(&self.table_name));
        format!(
            "INSERT INTO {table}({columns}) SELECT {columns} FROM {staging};\nDROP TABLE {staging};\n",
            columns = self.columns
        )
    }
}
