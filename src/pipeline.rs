use tracing::{debug, info_span};

use crate::{
    error::Error,
    generator::{DatasetScript, ImportOptions},
    model::FeatureClass,
    workspace::{read_workspace, Dataset, FeatureClassElement, SchemaError},
};

/// The script generated for one feature class, or why it could not be generated
#[derive(Debug)]
pub struct DatasetOutcome {
    pub name: String,
    pub script: Result<DatasetScript, Error>,
}

/// Generate the scripts of every feature class in the document, in document order. Other
/// dataset types produce no outcome.
pub fn generate_scripts(
    document: &roxmltree::Document,
    options: &ImportOptions,
) -> Result<Vec<DatasetOutcome>, SchemaError> {
    let outcomes = read_workspace(document)?
        .into_iter()
        .filter_map(|decoded| {
            let _span = info_span!("dataset", name = %decoded.name).entered();
            let script = match decoded.dataset {
                Ok(Dataset::FeatureClass(element)) => build(element, options),
                Ok(Dataset::Other { dataset_type, .. }) => {
                    debug!(%dataset_type, "skipping dataset");
                    return None;
                }
                Err(err) => Err(err.into()),
            };
            Some(DatasetOutcome {
                name: decoded.name,
                script,
            })
        })
        .collect();
    Ok(outcomes)
}

fn build(
    element: FeatureClassElement,
    options: &ImportOptions,
) -> Result<DatasetScript, Error> {
    let class = FeatureClass::assemble(&options.schema, element)?;
    Ok(DatasetScript::build(&class, options)?)
}
