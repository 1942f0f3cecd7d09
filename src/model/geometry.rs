use std::fmt;

use crate::workspace::{GeometryDef, SchemaError};

/// PostGIS geometry type registered for the `geom` column
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    MultiPolygon,
    MultiLineString,
    MultiPoint,
}

impl GeometryKind {
    /// Anything that is not a polygon, polyline or multipoint is stored as a point.
    pub fn from_esri(geometry_type: Option<&str>) -> Self {
        match geometry_type {
            Some("esriGeometryPolygon") => Self::MultiPolygon,
            Some("esriGeometryPolyline") => Self::MultiLineString,
            Some("esriGeometryMultipoint" | "esriGeometryMultiPoint") => Self::MultiPoint,
            _ => Self::Point,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Point => "POINT",
            Self::MultiPolygon => "MULTIPOLYGON",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPoint => "MULTIPOINT",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GeometryFacets {
    pub kind: GeometryKind,
    /// 2, plus one each for Z and M
    pub dimension: u8,
    /// EPSG code of the spatial reference
    pub srid: i32,
}

impl GeometryFacets {
    pub fn resolve(field_name: &str, def: &GeometryDef) -> Result<Self, SchemaError> {
        let srid = def.wkid.ok_or_else(|| SchemaError::MissingSpatialReference {
            field: field_name.to_string(),
        })?;
        Ok(Self {
            kind: GeometryKind::from_esri(def.geometry_type.as_deref()),
            dimension: 2 + u8::from(def.has_z) + u8::from(def.has_m),
            srid,
        })
    }
}
