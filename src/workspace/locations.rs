//! Where things live in an Esri workspace definition document.
//!
//! The decode step looks up every element through [`LOCATIONS`]; nothing outside of
//! [`super`] needs to know the shape of the XML.

/// Tag names (local names, without the `esri:` prefix) and literal values of the
/// workspace definition format.
#[derive(Debug)]
pub struct SchemaLocations {
    pub root: &'static str,
    pub workspace_definition: &'static str,
    pub dataset_definitions: &'static str,
    pub data_element: &'static str,

    pub name: &'static str,
    pub dataset_type: &'static str,
    pub has_oid: &'static str,
    pub oid_field_name: &'static str,
    pub subtype_field_name: &'static str,
    pub default_subtype_code: &'static str,
    pub subtypes: &'static str,
    pub subtype: &'static str,
    pub subtype_name: &'static str,
    pub subtype_code: &'static str,
    pub field_infos: &'static str,
    pub subtype_field_info: &'static str,
    pub field_name: &'static str,

    pub fields: &'static str,
    pub field_array: &'static str,
    pub field: &'static str,
    pub field_type: &'static str,
    pub is_nullable: &'static str,
    pub length: &'static str,
    pub precision: &'static str,
    pub scale: &'static str,
    pub domain: &'static str,
    pub domain_name: &'static str,
    pub default_value: &'static str,

    pub geometry_def: &'static str,
    pub geometry_type: &'static str,
    pub has_z: &'static str,
    pub has_m: &'static str,
    pub spatial_reference: &'static str,
    pub wkid: &'static str,

    /// The only `DatasetType` that produces a table
    pub feature_class_type: &'static str,
}

pub const LOCATIONS: SchemaLocations = SchemaLocations {
    root: "Workspace",
    workspace_definition: "WorkspaceDefinition",
    dataset_definitions: "DatasetDefinitions",
    data_element: "DataElement",

    name: "Name",
    dataset_type: "DatasetType",
    has_oid: "HasOID",
    oid_field_name: "OIDFieldName",
    subtype_field_name: "SubtypeFieldName",
    default_subtype_code: "DefaultSubtypeCode",
    subtypes: "Subtypes",
    subtype: "Subtype",
    subtype_name: "SubtypeName",
    subtype_code: "SubtypeCode",
    field_infos: "FieldInfos",
    subtype_field_info: "SubtypeFieldInfo",
    field_name: "FieldName",

    fields: "Fields",
    field_array: "FieldArray",
    field: "Field",
    field_type: "Type",
    is_nullable: "IsNullable",
    length: "Length",
    precision: "Precision",
    scale: "Scale",
    domain: "Domain",
    domain_name: "DomainName",
    default_value: "DefaultValue",

    geometry_def: "GeometryDef",
    geometry_type: "GeometryType",
    has_z: "HasZ",
    has_m: "HasM",
    spatial_reference: "SpatialReference",
    wkid: "WKID",

    feature_class_type: "esriDTFeatureClass",
};
