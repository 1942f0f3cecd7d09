use roxmltree::Node;

use super::{
    error::SchemaError,
    locations::LOCATIONS,
    values::{child, children, optional_value, raw_value, required_child, required_value},
};

/// Workspace element: `DataElement`, decoded according to its `DatasetType`.
#[derive(Clone, Debug)]
pub enum Dataset {
    FeatureClass(FeatureClassElement),
    /// Tables, feature datasets, raster catalogs, ... produce no DDL
    Other { name: String, dataset_type: String },
}

/// A `DataElement` whose `DatasetType` is `esriDTFeatureClass`
#[derive(Clone, Debug)]
pub struct FeatureClassElement {
    pub name: String,
    pub oid_field_name: Option<String>,
    pub subtype_field_name: Option<String>,
    pub default_subtype_code: Option<String>,
    pub subtypes: Vec<SubtypeDef>,
    pub fields: Vec<FieldDef>,
}

/// Workspace element: `Field`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub field_type: String,
    pub is_nullable: bool,
    pub length: Option<i32>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    pub domain_name: Option<String>,
    pub default_value: Option<String>,
    pub geometry_def: Option<GeometryDef>,
}

/// Workspace element: `GeometryDef`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeometryDef {
    pub geometry_type: Option<String>,
    pub has_z: bool,
    pub has_m: bool,
    pub wkid: Option<i32>,
}

/// Workspace element: `Subtype`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtypeDef {
    pub name: String,
    pub code: String,
    pub field_infos: Vec<SubtypeFieldInfo>,
}

/// Workspace element: `SubtypeFieldInfo`. Infos that only carry a default value are not kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtypeFieldInfo {
    pub field_name: String,
    pub domain_name: String,
}

impl Dataset {
    pub fn name(&self) -> &str {
        match self {
            Self::FeatureClass(feature_class) => &feature_class.name,
            Self::Other { name, .. } => name,
        }
    }

    pub fn map_from_xml(element: Node) -> Result<Self, SchemaError> {
        let name = required_value::<String>(element, LOCATIONS.data_element, LOCATIONS.name)?;
        let dataset_type =
            required_value::<String>(element, LOCATIONS.data_element, LOCATIONS.dataset_type)?;

        if dataset_type == LOCATIONS.feature_class_type {
            FeatureClassElement::map_from_xml(element, name).map(Self::FeatureClass)
        } else {
            Ok(Self::Other { name, dataset_type })
        }
    }
}

impl FeatureClassElement {
    fn map_from_xml(element: Node, name: String) -> Result<Self, SchemaError> {
        let has_oid = optional_value::<bool>(element, LOCATIONS.has_oid)?.unwrap_or(false);
        let oid_field_name = if has_oid {
            Some(required_value(
                element,
                LOCATIONS.data_element,
                LOCATIONS.oid_field_name,
            )?)
        } else {
            None
        };

        // An empty <SubtypeFieldName/> is how classes without subtypes are usually exported
        let subtype_field_name = optional_value::<String>(element, LOCATIONS.subtype_field_name)?;
        let (default_subtype_code, subtypes) = if subtype_field_name.is_some() {
            let default_subtype_code =
                optional_value::<String>(element, LOCATIONS.default_subtype_code)?;
            let subtypes = match child(element, LOCATIONS.subtypes) {
                Some(subtypes) => children(subtypes, LOCATIONS.subtype)
                    .map(SubtypeDef::map_from_xml)
                    .collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };
            (default_subtype_code, subtypes)
        } else {
            (None, Vec::new())
        };

        let fields = required_child(element, LOCATIONS.data_element, LOCATIONS.fields)?;
        let field_array = required_child(fields, LOCATIONS.fields, LOCATIONS.field_array)?;
        let fields = children(field_array, LOCATIONS.field)
            .map(FieldDef::map_from_xml)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            oid_field_name,
            subtype_field_name,
            default_subtype_code,
            subtypes,
            fields,
        })
    }
}

impl FieldDef {
    pub fn map_from_xml(field: Node) -> Result<Self, SchemaError> {
        let name = required_value(field, LOCATIONS.field, LOCATIONS.name)?;
        let field_type = required_value(field, LOCATIONS.field, LOCATIONS.field_type)?;
        let is_nullable = optional_value::<bool>(field, LOCATIONS.is_nullable)?.unwrap_or(false);
        let length = optional_value(field, LOCATIONS.length)?;
        let precision = optional_value(field, LOCATIONS.precision)?;
        let scale = optional_value(field, LOCATIONS.scale)?;

        let domain_name = match child(field, LOCATIONS.domain) {
            Some(domain) => optional_value(domain, LOCATIONS.domain_name)?,
            None => None,
        };
        let default_value = raw_value(field, LOCATIONS.default_value);
        let geometry_def = child(field, LOCATIONS.geometry_def)
            .map(GeometryDef::map_from_xml)
            .transpose()?;

        Ok(Self {
            name,
            field_type,
            is_nullable,
            length,
            precision,
            scale,
            domain_name,
            default_value,
            geometry_def,
        })
    }
}

impl GeometryDef {
    pub fn map_from_xml(geometry_def: Node) -> Result<Self, SchemaError> {
        let geometry_type = optional_value(geometry_def, LOCATIONS.geometry_type)?;
        let has_z = optional_value::<bool>(geometry_def, LOCATIONS.has_z)?.unwrap_or(false);
        let has_m = optional_value::<bool>(geometry_def, LOCATIONS.has_m)?.unwrap_or(false);
        let wkid = match child(geometry_def, LOCATIONS.spatial_reference) {
            Some(spatial_reference) => optional_value(spatial_reference, LOCATIONS.wkid)?,
            None => None,
        };

        Ok(Self {
            geometry_type,
            has_z,
            has_m,
            wkid,
        })
    }
}

impl SubtypeDef {
    pub fn map_from_xml(subtype: Node) -> Result<Self, SchemaError> {
        let name = required_value(subtype, LOCATIONS.subtype, LOCATIONS.subtype_name)?;
        let code = required_value(subtype, LOCATIONS.subtype, LOCATIONS.subtype_code)?;

        let mut field_infos = Vec::new();
        if let Some(infos) = child(subtype, LOCATIONS.field_infos) {
            for info in children(infos, LOCATIONS.subtype_field_info) {
                let field_name =
                    required_value(info, LOCATIONS.subtype_field_info, LOCATIONS.field_name)?;
                if let Some(domain_name) = optional_value(info, LOCATIONS.domain_name)? {
                    field_infos.push(SubtypeFieldInfo {
                        field_name,
                        domain_name,
                    });
                }
            }
        }

        Ok(Self {
            name,
            code,
            field_infos,
        })
    }
}
