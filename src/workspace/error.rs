use thiserror::Error;

/// Malformed or missing structure in a workspace definition.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("the document is not well-formed XML")]
    Xml(#[from] roxmltree::Error),
    #[error("expected <{parent}> to contain <{tag}>")]
    MissingElement {
        parent: &'static str,
        tag: &'static str,
    },
    #[error("<{tag}> must not be empty")]
    EmptyElement { tag: &'static str },
    #[error("invalid integer {value:?} in <{tag}>")]
    InvalidInteger { tag: &'static str, value: String },
    #[error("invalid boolean {value:?} in <{tag}>")]
    InvalidBoolean { tag: &'static str, value: String },
    #[error("geometry field {field:?} has no spatial reference WKID")]
    MissingSpatialReference { field: String },
}
