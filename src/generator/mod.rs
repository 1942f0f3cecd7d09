//! Rendering of [`FeatureClass`]es as PostgreSQL/PostGIS DDL.

pub mod naming;
pub mod script;

use thiserror::Error;

use crate::model::{FeatureClass, GeometryFacets};
use naming::{foreign_key_name, partition_table, qualified};

pub use script::{DatasetScript, ImportOptions};

#[derive(Debug, Error)]
pub enum DdlError {
    #[error("feature class {name:?} has no columns")]
    NoColumns { name: String },
    #[error("feature class {name:?} has no geometry field")]
    NoGeometry { name: String },
}

/// Render the statements creating `class`: the table, its geometry column and either its
/// domain foreign keys or, for classes with subtypes, one list partition per subtype with
/// the foreign keys of that subtype.
///
/// Every statement is terminated by `;` and a newline.
pub fn render(class: &FeatureClass) -> Result<String, DdlError> {
    if !class.is_valid() {
        let name = class.name.clone();
        return Err(if class.geometry_field.is_none() {
            DdlError::NoGeometry { name }
        } else {
            DdlError::NoColumns { name }
        });
    }
    let geometry = class
        .geometry_field
        .as_ref()
        .and_then(|field| field.geometry)
        .ok_or_else(|| DdlError::NoGeometry {
            name: class.name.clone(),
        })?;

    let mut statements = vec![create_table(class), add_geometry_column(class, geometry)];
    if class.is_partitioned() {
        statements.extend(partitions(class));
    } else {
        statements.extend(domain_foreign_keys(class));
    }

    Ok(statements
        .into_iter()
        .map(|statement| statement + ";\n")
        .collect())
}

fn create_table(class: &FeatureClass) -> String {
    let mut columns = class
        .valid_fields()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    if let Some(object_id) = &class.object_id_field {
        let key = match &class.subtype_field {
            Some(subtype) => format!("PRIMARY KEY({object_id}, {subtype})"),
            None => format!("PRIMARY KEY({object_id})"),
        };
        columns.push(key);
    }

    let mut sql = format!(
        "CREATE TABLE {}(\n   {}\n)",
        qualified(&class.schema, &class.name),
        columns.join(",\n   ")
    );
    if let Some(subtype) = &class.subtype_field {
        sql.push_str(&format!(" PARTITION BY LIST({subtype})"));
    }
    sql
}

fn add_geometry_column(class: &FeatureClass, geometry: GeometryFacets) -> String {
    format!(
        "SELECT AddGeometryColumn('{}', '{}', 'geom', {}, '{}', {})",
        class.schema.to_lowercase(),
        class.name.to_lowercase(),
        geometry.srid,
        geometry.kind,
        geometry.dimension
    )
}

fn foreign_key(table: &str, constraint: &str, column: &str, schema: &str, domain: &str) -> String {
    format!(
        "ALTER TABLE {table} ADD CONSTRAINT {constraint} FOREIGN KEY({}) REFERENCES {}(CODE)",
        column.to_lowercase(),
        qualified(schema, domain)
    )
}

fn domain_foreign_keys(class: &FeatureClass) -> Vec<String> {
    let table = qualified(&class.schema, &class.name);
    class
        .domain_fields()
        .enumerate()
        .map(|(i, (field, domain))| {
            foreign_key(
                &table,
                &foreign_key_name(&class.name, i + 1),
                &field.name,
                &class.schema,
                domain,
            )
        })
        .collect()
}

fn partitions(class: &FeatureClass) -> Vec<String> {
    let parent = qualified(&class.schema, &class.name);
    let mut statements = Vec::new();
    for subtype in &class.subtypes {
        let partition = partition_table(&class.name, &subtype.code);
        let partition_qualified = qualified(&class.schema, &partition);
        statements.push(format!(
            "CREATE TABLE {partition_qualified} PARTITION OF {parent} FOR VALUES IN ({})",
            subtype.code
        ));
        for (i, field_domain) in subtype.field_domains.iter().enumerate() {
            statements.push(foreign_key(
                &partition_qualified,
                &foreign_key_name(&partition, i + 1),
                &field_domain.field_name,
                &class.schema,
                &field_domain.domain_name,
            ));
        }
    }
    statements
}
