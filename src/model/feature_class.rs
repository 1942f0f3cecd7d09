use tracing::debug;

use super::{
    field::{Exclusion, Field},
    subtype::Subtype,
};
use crate::workspace::{FeatureClassElement, SchemaError};

/// One output table: the columns, geometry and subtype partitions of a feature class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureClass {
    /// Target PostgreSQL schema, as configured
    pub schema: String,
    pub name: String,
    pub object_id_field: Option<String>,
    pub subtype_field: Option<String>,
    pub subtype_default_code: Option<String>,
    /// Every non-geometry field in document order, including the ones without a column
    pub fields: Vec<Field>,
    pub geometry_field: Option<Field>,
    pub subtypes: Vec<Subtype>,
}

impl FeatureClass {
    /// Build the table model for a decoded feature class element.
    ///
    /// The subtype field receives the default subtype code as its default value, the object id
    /// field becomes auto-incrementing and the `Shape` field is split off as the geometry field.
    pub fn assemble(schema: &str, element: FeatureClassElement) -> Result<Self, SchemaError> {
        let FeatureClassElement {
            name,
            oid_field_name: object_id_field,
            subtype_field_name: subtype_field,
            default_subtype_code: subtype_default_code,
            subtypes,
            fields,
        } = element;

        let mut columns = Vec::with_capacity(fields.len());
        let mut geometry_field = None;
        for def in fields {
            let mut field = Field::from_def(def)?;
            if subtype_field.as_deref() == Some(field.name.as_str()) {
                field.default_value = subtype_default_code.clone();
            }
            if object_id_field
                .as_deref()
                .is_some_and(|oid| oid.eq_ignore_ascii_case(&field.name))
            {
                field.auto_increment = true;
            }

            if field.is_geometry_field() {
                geometry_field = Some(field);
                continue;
            }
            match field.exclusion() {
                Some(Exclusion::UnsupportedType(esri_type)) => {
                    debug!(class = %name, field = %field.name, %esri_type, "no column type for field")
                }
                Some(reason) => {
                    debug!(class = %name, field = %field.name, ?reason, "field excluded")
                }
                None => {}
            }
            columns.push(field);
        }

        Ok(Self {
            schema: schema.to_string(),
            name,
            object_id_field,
            subtype_field,
            subtype_default_code,
            fields: columns,
            geometry_field,
            subtypes: subtypes.into_iter().map(Subtype::from).collect(),
        })
    }

    pub fn valid_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_valid())
    }

    /// Valid fields that reference a domain
    pub fn domain_fields(&self) -> impl Iterator<Item = (&Field, &str)> {
        self.valid_fields()
            .filter_map(|f| f.domain_name.as_deref().map(|domain| (f, domain)))
    }

    /// Column projection used to copy imported rows into the table: the valid columns,
    /// followed by `geom` when the class has a geometry field.
    pub fn column_list(&self) -> String {
        let mut list = self
            .valid_fields()
            .map(Field::column_name)
            .collect::<Vec<_>>()
            .join(", ");
        if self.geometry_field.is_some() {
            list.push_str(", geom");
        }
        list
    }

    pub fn is_partitioned(&self) -> bool {
        self.subtype_field.is_some()
    }

    /// A class can only be rendered with at least one column and a geometry field
    pub fn is_valid(&self) -> bool {
        self.valid_fields().next().is_some() && self.geometry_field.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::{FieldDef, GeometryDef, SubtypeDef, SubtypeFieldInfo};

    fn def(name: &str, field_type: &str) -> FieldDef {
        FieldDef {
            name: name.into(),
            field_type: field_type.into(),
            is_nullable: true,
            length: None,
            precision: Some(0),
            scale: Some(0),
            domain_name: None,
            default_value: None,
            geometry_def: None,
        }
    }

    fn shape() -> FieldDef {
        FieldDef {
            geometry_def: Some(GeometryDef {
                geometry_type: Some("esriGeometryPoint".into()),
                has_z: false,
                has_m: false,
                wkid: Some(4326),
            }),
            ..def("Shape", "esriFieldTypeGeometry")
        }
    }

    fn element(fields: Vec<FieldDef>) -> FeatureClassElement {
        FeatureClassElement {
            name: "Valves".into(),
            oid_field_name: Some("OBJECTID".into()),
            subtype_field_name: None,
            default_subtype_code: None,
            subtypes: vec![],
            fields,
        }
    }

    #[test]
    fn object_id_is_matched_case_insensitively() {
        let class = FeatureClass::assemble(
            "public",
            element(vec![def("ObjectId", "esriFieldTypeOID"), shape()]),
        )
        .unwrap();
        assert!(class.fields[0].auto_increment);
    }

    #[test]
    fn geometry_field_is_kept_apart() {
        let class = FeatureClass::assemble(
            "public",
            element(vec![def("OBJECTID", "esriFieldTypeOID"), shape()]),
        )
        .unwrap();
        assert_eq!(class.fields.len(), 1);
        assert_eq!(class.geometry_field.as_ref().unwrap().name, "Shape");
    }

    #[test]
    fn invalid_fields_are_kept_but_filtered() {
        let class = FeatureClass::assemble(
            "public",
            element(vec![
                def("OBJECTID", "esriFieldTypeOID"),
                def("GlobalID", "esriFieldTypeGlobalID"),
                def("Photo", "esriFieldTypeBlob"),
                def("Shape_Length", "esriFieldTypeDouble"),
                def("Label", "esriFieldTypeString"),
                shape(),
            ]),
        )
        .unwrap();
        assert_eq!(class.fields.len(), 5);
        let valid: Vec<_> = class.valid_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(valid, ["OBJECTID", "Label"]);
        assert_eq!(class.column_list(), "objectid, label, geom");
    }

    #[test]
    fn column_list_has_geom_only_with_geometry() {
        let class = FeatureClass::assemble(
            "public",
            element(vec![def("OBJECTID", "esriFieldTypeOID")]),
        )
        .unwrap();
        assert_eq!(class.column_list(), "objectid");
        assert!(!class.is_valid());
    }

    #[test]
    fn domain_fields_require_validity() {
        let mut diameter = def("Diameter", "esriFieldTypeInteger");
        diameter.domain_name = Some("DIAMETERS".into());
        let mut photo = def("Photo", "esriFieldTypeBlob");
        photo.domain_name = Some("PHOTOS".into());
        let class =
            FeatureClass::assemble("public", element(vec![photo, diameter, shape()])).unwrap();
        let domains: Vec<_> = class
            .domain_fields()
            .map(|(f, d)| (f.name.as_str(), d))
            .collect();
        assert_eq!(domains, [("Diameter", "DIAMETERS")]);
    }

    #[test]
    fn subtype_field_gets_the_default_code() {
        let mut element = element(vec![
            def("OBJECTID", "esriFieldTypeOID"),
            def("SUBTYPE", "esriFieldTypeInteger"),
            def("subtype_note", "esriFieldTypeString"),
            shape(),
        ]);
        element.subtype_field_name = Some("SUBTYPE".into());
        element.default_subtype_code = Some("4".into());
        element.subtypes = vec![SubtypeDef {
            name: "Gate".into(),
            code: "4".into(),
            field_infos: vec![SubtypeFieldInfo {
                field_name: "NOT_A_FIELD".into(),
                domain_name: "GATES".into(),
            }],
        }];

        let class = FeatureClass::assemble("public", element).unwrap();
        assert!(class.is_partitioned());
        assert_eq!(class.fields[1].default_value.as_deref(), Some("4"));
        assert_eq!(class.fields[2].default_value, None);
        assert_eq!(class.subtypes[0].field_domains[0].field_name, "NOT_A_FIELD");
    }

    #[test]
    fn field_errors_fail_the_class() {
        let mut broken = shape();
        broken.geometry_def.as_mut().unwrap().wkid = None;
        assert!(matches!(
            FeatureClass::assemble("public", element(vec![broken])),
            Err(SchemaError::MissingSpatialReference { .. })
        ));
    }
}
