use roxmltree::Node;

use super::error::SchemaError;

/// Conversion of the text content of an element into a typed value.
pub trait ActualValue: Sized {
    fn convert(src: &str, tag: &'static str) -> Result<Self, SchemaError>;
}

impl ActualValue for String {
    fn convert(src: &str, _tag: &'static str) -> Result<Self, SchemaError> {
        Ok(src.to_string())
    }
}

impl ActualValue for bool {
    fn convert(src: &str, tag: &'static str) -> Result<Self, SchemaError> {
        match src {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(SchemaError::InvalidBoolean {
                tag,
                value: src.to_string(),
            }),
        }
    }
}

impl ActualValue for i32 {
    fn convert(src: &str, tag: &'static str) -> Result<Self, SchemaError> {
        src.parse().map_err(|_| SchemaError::InvalidInteger {
            tag,
            value: src.to_string(),
        })
    }
}

/// First element child of `parent` with the local name `tag`.
pub fn child<'a, 'input>(parent: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    parent
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == tag)
}

pub fn children<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    parent
        .children()
        .filter(move |c| c.is_element() && c.tag_name().name() == tag)
}

pub fn required_child<'a, 'input>(
    parent: Node<'a, 'input>,
    parent_tag: &'static str,
    tag: &'static str,
) -> Result<Node<'a, 'input>, SchemaError> {
    child(parent, tag).ok_or(SchemaError::MissingElement {
        parent: parent_tag,
        tag,
    })
}

/// The trimmed text of the child `tag`; an element without text counts as absent.
pub fn optional_value<T: ActualValue>(
    parent: Node,
    tag: &'static str,
) -> Result<Option<T>, SchemaError> {
    child(parent, tag)
        .and_then(|node| node.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| T::convert(text, tag))
        .transpose()
}

/// The untrimmed text of the child `tag`, for values that are literals rather than tokens.
pub fn raw_value(parent: Node, tag: &str) -> Option<String> {
    child(parent, tag)
        .and_then(|node| node.text())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

pub fn required_value<T: ActualValue>(
    parent: Node,
    parent_tag: &'static str,
    tag: &'static str,
) -> Result<T, SchemaError> {
    let node = required_child(parent, parent_tag, tag)?;
    let text = node.text().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(SchemaError::EmptyElement { tag });
    }
    T::convert(text, tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_accept_xml_schema_lexical_forms() {
        assert!(bool::convert("true", "HasZ").unwrap());
        assert!(bool::convert("1", "HasZ").unwrap());
        assert!(!bool::convert("false", "HasZ").unwrap());
        assert!(matches!(
            bool::convert("yes", "HasZ"),
            Err(SchemaError::InvalidBoolean { tag: "HasZ", .. })
        ));
    }

    #[test]
    fn integers_are_not_rounded() {
        assert_eq!(i32::convert("-12", "Scale").unwrap(), -12);
        assert!(matches!(
            i32::convert("12.5", "Scale"),
            Err(SchemaError::InvalidInteger { tag: "Scale", .. })
        ));
    }

    #[test]
    fn empty_optional_value_is_absent() {
        let doc = roxmltree::Document::parse("<Field><Length/><Scale> 3 </Scale></Field>").unwrap();
        let field = doc.root_element();
        assert_eq!(optional_value::<i32>(field, "Length").unwrap(), None);
        assert_eq!(optional_value::<i32>(field, "Precision").unwrap(), None);
        assert_eq!(optional_value::<i32>(field, "Scale").unwrap(), Some(3));
    }

    #[test]
    fn raw_value_keeps_surrounding_whitespace() {
        let doc = roxmltree::Document::parse(
            "<Field><DefaultValue>  padded </DefaultValue><Blank>   </Blank><Empty/></Field>",
        )
        .unwrap();
        let field = doc.root_element();
        assert_eq!(raw_value(field, "DefaultValue").as_deref(), Some("  padded "));
        assert_eq!(raw_value(field, "Blank").as_deref(), Some("   "));
        assert_eq!(raw_value(field, "Empty"), None);
        assert_eq!(raw_value(field, "Missing"), None);
    }

    #[test]
    fn required_value_reports_missing_and_empty_elements() {
        let doc = roxmltree::Document::parse("<Field><Name></Name></Field>").unwrap();
        let field = doc.root_element();
        assert!(matches!(
            required_value::<String>(field, "Field", "Name"),
            Err(SchemaError::EmptyElement { tag: "Name" })
        ));
        assert!(matches!(
            required_value::<String>(field, "Field", "Type"),
            Err(SchemaError::MissingElement {
                parent: "Field",
                tag: "Type"
            })
        ));
    }
}
