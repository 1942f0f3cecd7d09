//! Relational model of the feature classes in a workspace.

pub mod feature_class;
pub mod field;
pub mod geometry;
pub mod subtype;
pub mod types;

pub use feature_class::FeatureClass;
pub use field::{Exclusion, Field};
pub use geometry::{GeometryFacets, GeometryKind};
pub use subtype::{Subtype, SubtypeFieldDomain};
pub use types::{pg_type, EsriFieldType, Facets};
