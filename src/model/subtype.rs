use crate::workspace::{SubtypeDef, SubtypeFieldInfo};

/// A domain that applies to one field within one subtype partition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtypeFieldDomain {
    pub field_name: String,
    pub domain_name: String,
}

/// A subtype of a feature class; its code is the partition key value.
///
/// Field names are not checked against the fields of the class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subtype {
    pub name: String,
    pub code: String,
    pub field_domains: Vec<SubtypeFieldDomain>,
}

impl From<SubtypeFieldInfo> for SubtypeFieldDomain {
    fn from(info: SubtypeFieldInfo) -> Self {
        Self {
            field_name: info.field_name,
            domain_name: info.domain_name,
        }
    }
}

impl From<SubtypeDef> for Subtype {
    fn from(def: SubtypeDef) -> Self {
        Self {
            name: def.name,
            code: def.code,
            field_domains: def.field_infos.into_iter().map(Into::into).collect(),
        }
    }
}
