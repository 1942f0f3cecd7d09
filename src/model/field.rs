use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;

use super::{
    geometry::GeometryFacets,
    types::{pg_type, EsriFieldType, Facets},
};
use crate::generator::naming::quote_literal;
use crate::workspace::{locations::LOCATIONS, FieldDef, SchemaError};

lazy_static! {
    /// Columns maintained by the geodatabase itself; never created in the target table
    static ref RESERVED_NAMES: HashSet<&'static str> =
        ["shape_length", "shape_area", "globalid"].into_iter().collect();
}

/// Why a field has no column in the generated table
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exclusion {
    MissingName,
    UnsupportedType(EsriFieldType),
    ReservedName,
}

/// One attribute column of a feature class
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub esri_type: EsriFieldType,
    pub nullable: bool,
    pub facets: Facets,
    pub domain_name: Option<String>,
    pub default_value: Option<String>,
    pub auto_increment: bool,
    /// Only set on the `Shape` geometry field
    pub geometry: Option<GeometryFacets>,
}

impl Field {
    pub fn from_def(def: FieldDef) -> Result<Self, SchemaError> {
        let esri_type = EsriFieldType::from_name(&def.field_type);
        let geometry = if is_geometry(&def.name, &esri_type) {
            let geometry_def = def
                .geometry_def
                .as_ref()
                .ok_or(SchemaError::MissingElement {
                    parent: LOCATIONS.field,
                    tag: LOCATIONS.geometry_def,
                })?;
            Some(GeometryFacets::resolve(&def.name, geometry_def)?)
        } else {
            None
        };

        Ok(Self {
            name: def.name,
            esri_type,
            nullable: def.is_nullable,
            facets: Facets {
                length: def.length,
                precision: def.precision,
                scale: def.scale,
            },
            domain_name: def.domain_name.filter(|d| !d.is_empty()),
            default_value: def.default_value,
            auto_increment: false,
            geometry,
        })
    }

    pub fn pg_type(&self) -> Option<String> {
        pg_type(&self.esri_type, self.facets)
    }

    /// `None` if the field becomes a column.
    ///
    /// Reserved names are excluded even when their type has a mapping.
    pub fn exclusion(&self) -> Option<Exclusion> {
        if self.name.is_empty() {
            Some(Exclusion::MissingName)
        } else if self.pg_type().is_none() {
            Some(Exclusion::UnsupportedType(self.esri_type.clone()))
        } else if RESERVED_NAMES.contains(self.name.to_lowercase().as_str()) {
            Some(Exclusion::ReservedName)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.exclusion().is_none()
    }

    pub fn is_geometry_field(&self) -> bool {
        is_geometry(&self.name, &self.esri_type)
    }

    pub fn column_name(&self) -> String {
        self.name.to_lowercase()
    }

    fn default_clause(&self) -> Option<String> {
        let value = self.default_value.as_deref()?;
        Some(if self.esri_type == EsriFieldType::String {
            format!("DEFAULT {}", quote_literal(value))
        } else {
            format!("DEFAULT {value}")
        })
    }
}

fn is_geometry(name: &str, esri_type: &EsriFieldType) -> bool {
    name.eq_ignore_ascii_case("shape") && *esri_type == EsriFieldType::Geometry
}

/// Column definition as it appears inside `CREATE TABLE`
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.auto_increment {
            return write!(f, "{} SERIAL", self.column_name());
        }

        // Unmapped fields never reach rendering through valid_fields()
        let pg_type = self.pg_type().unwrap_or_default();
        let null = if self.nullable { "NULL" } else { "NOT NULL" };
        write!(f, "{} {} {}", self.column_name(), pg_type, null)?;
        if let Some(default) = self.default_clause() {
            write!(f, " {default}")?;
        }
        Ok(())
    }
}
