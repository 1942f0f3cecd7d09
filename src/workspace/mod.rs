//! Decoding of Esri XML workspace definitions into plain data.
//!
//! This is the only place that touches `roxmltree` nodes; the schema model is built from the
//! [`Dataset`] values produced here.

pub mod data_element;
pub mod error;
pub mod locations;

mod values;

pub use data_element::{
    Dataset, FeatureClassElement, FieldDef, GeometryDef, SubtypeDef, SubtypeFieldInfo,
};
pub use error::SchemaError;

use locations::LOCATIONS;
use roxmltree::Node;
use values::required_child;

/// Result of decoding one `DataElement`. The name is recovered on a best-effort basis so that
/// failures can still be attributed to a dataset.
#[derive(Debug)]
pub struct DecodedDataset {
    pub name: String,
    pub dataset: Result<Dataset, SchemaError>,
}

/// Decode every `DataElement` below `WorkspaceDefinition/DatasetDefinitions`, in document
/// order. Elements nested in feature datasets are included.
///
/// Only a missing workspace or dataset definition list fails the whole document; problems
/// inside a single data element are reported through [`DecodedDataset::dataset`].
pub fn read_workspace(document: &roxmltree::Document) -> Result<Vec<DecodedDataset>, SchemaError> {
    let root = document.root_element();
    let workspace_definition =
        required_child(root, LOCATIONS.root, LOCATIONS.workspace_definition)?;
    let dataset_definitions = required_child(
        workspace_definition,
        LOCATIONS.workspace_definition,
        LOCATIONS.dataset_definitions,
    )?;

    let datasets = dataset_definitions
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == LOCATIONS.data_element)
        .map(|element| DecodedDataset {
            name: element_name(element),
            dataset: Dataset::map_from_xml(element),
        })
        .collect();
    Ok(datasets)
}

fn element_name(element: Node) -> String {
    values::child(element, LOCATIONS.name)
        .and_then(|name| name.text())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("<unnamed>")
        .to_string()
}
