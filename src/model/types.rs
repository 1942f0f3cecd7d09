use std::fmt;

/// The Esri field type vocabulary (`esriFieldType*`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EsriFieldType {
    SmallInteger,
    Integer,
    Single,
    Double,
    String,
    Date,
    Oid,
    Geometry,
    Blob,
    Raster,
    Guid,
    GlobalId,
    Xml,
    /// Anything outside of the vocabulary, kept verbatim for diagnostics
    Unknown(std::string::String),
}

impl EsriFieldType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "esriFieldTypeSmallInteger" => Self::SmallInteger,
            "esriFieldTypeInteger" => Self::Integer,
            "esriFieldTypeSingle" => Self::Single,
            "esriFieldTypeDouble" => Self::Double,
            "esriFieldTypeString" => Self::String,
            "esriFieldTypeDate" => Self::Date,
            "esriFieldTypeOID" => Self::Oid,
            "esriFieldTypeGeometry" => Self::Geometry,
            "esriFieldTypeBlob" => Self::Blob,
            "esriFieldTypeRaster" => Self::Raster,
            "esriFieldTypeGUID" => Self::Guid,
            "esriFieldTypeGlobalID" => Self::GlobalId,
            "esriFieldTypeXML" => Self::Xml,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for EsriFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SmallInteger => "esriFieldTypeSmallInteger",
            Self::Integer => "esriFieldTypeInteger",
            Self::Single => "esriFieldTypeSingle",
            Self::Double => "esriFieldTypeDouble",
            Self::String => "esriFieldTypeString",
            Self::Date => "esriFieldTypeDate",
            Self::Oid => "esriFieldTypeOID",
            Self::Geometry => "esriFieldTypeGeometry",
            Self::Blob => "esriFieldTypeBlob",
            Self::Raster => "esriFieldTypeRaster",
            Self::Guid => "esriFieldTypeGUID",
            Self::GlobalId => "esriFieldTypeGlobalID",
            Self::Xml => "esriFieldTypeXML",
            Self::Unknown(name) => name,
        };
        f.write_str(name)
    }
}

/// Numeric facets of a field as exported; absent facets are `None`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Facets {
    pub length: Option<i32>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
}

pub const DEFAULT_STRING_LENGTH: i32 = 255;

/// Map an Esri field type to a PostgreSQL column type. `None` means the field has no column
/// representation and is left out of the table.
///
/// An absent precision or scale counts as zero.
pub fn pg_type(esri_type: &EsriFieldType, facets: Facets) -> Option<String> {
    let precision = facets.precision.unwrap_or(0);
    let scale = facets.scale.unwrap_or(0);
    let floating = precision == 0 && scale == 0;

    let pg_type = match esri_type {
        EsriFieldType::SmallInteger => "SMALLINT".into(),
        EsriFieldType::Integer => "INTEGER".into(),
        EsriFieldType::Double if floating => "DOUBLE PRECISION".into(),
        EsriFieldType::Single if floating => "REAL".into(),
        EsriFieldType::Double | EsriFieldType::Single => format!("NUMERIC({precision}, {scale})"),
        EsriFieldType::String => format!(
            "VARCHAR({})",
            facets.length.unwrap_or(DEFAULT_STRING_LENGTH)
        ),
        EsriFieldType::Date => "TIMESTAMP".into(),
        EsriFieldType::Oid => "BIGINT".into(),
        EsriFieldType::GlobalId => "VARCHAR(32)".into(),
        EsriFieldType::Geometry
        | EsriFieldType::Blob
        | EsriFieldType::Raster
        | EsriFieldType::Guid
        | EsriFieldType::Xml
        | EsriFieldType::Unknown(_) => return None,
    };
    Some(pg_type)
}
