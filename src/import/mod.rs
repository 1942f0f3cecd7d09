//! Loading generated tables through external services.
//!
//! Opening layers in a package, executing SQL and bulk-importing features are provided by
//! implementations of [`LayerSource`], [`SqlExecutor`] and [`BulkImporter`]. This module only
//! sequences them per dataset.

pub mod recorder;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    error::Error,
    generator::{naming::staging_table, DatasetScript, ImportOptions},
    pipeline::DatasetOutcome,
};

pub use recorder::{PackageLayers, ScriptRecorder};

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("failed to execute SQL on connection {connection:?}: {message}")]
    Execute { connection: String, message: String },
    #[error("failed to import layer {layer:?}: {message}")]
    Import { layer: String, message: String },
    #[error("failed to record the import plan")]
    Io(#[from] std::io::Error),
}

/// A vector layer inside a package, as handed out by a [`LayerSource`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerHandle {
    pub package: PathBuf,
    pub name: String,
}

pub trait LayerSource {
    /// `None` if the package has no layer called `name`
    fn open_layer(&self, package: &Path, name: &str) -> Option<LayerHandle>;
}

pub trait SqlExecutor {
    fn execute(&self, connection: &str, sql: &str) -> Result<(), OrchestrationError>;
}

/// Settings for loading all features of a layer into a table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRequest {
    pub schema: String,
    pub table: String,
    pub geometry_column: &'static str,
    pub lowercase_names: bool,
    pub overwrite: bool,
    pub encoding: &'static str,
    pub create_spatial_index: bool,
}

impl ImportRequest {
    /// Staging import for `table`; the rows are copied into the real table afterwards
    pub fn staging(schema: &str, table: &str) -> Self {
        Self {
            schema: schema.to_string(),
            table: staging_table(table),
            geometry_column: "geom",
            lowercase_names: true,
            overwrite: true,
            encoding: "UTF-8",
            create_spatial_index: false,
        }
    }
}

pub trait BulkImporter {
    fn import(
        &self,
        connection: &str,
        layer: &LayerHandle,
        request: &ImportRequest,
    ) -> Result<(), OrchestrationError>;
}

/// Where the data comes from and where it goes
#[derive(Clone, Debug)]
pub struct ImportTarget {
    pub package: PathBuf,
    pub connection: String,
}

pub struct Collaborators<'a> {
    pub layers: &'a dyn LayerSource,
    pub executor: &'a dyn SqlExecutor,
    pub importer: &'a dyn BulkImporter,
}

#[derive(Debug)]
pub enum DatasetStatus {
    Imported,
    /// The package has no layer for the dataset
    Skipped,
    Failed(Error),
}

#[derive(Debug)]
pub struct DatasetReport {
    pub name: String,
    pub status: DatasetStatus,
}

impl DatasetReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, DatasetStatus::Failed(_))
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            DatasetStatus::Imported => write!(f, "Feature Class: {}", self.name),
            DatasetStatus::Skipped => write!(f, "Skipped {}: no layer in package", self.name),
            DatasetStatus::Failed(err) => {
                write!(f, "Error importing {}: {}", self.name, err)?;
                let mut source = std::error::Error::source(err);
                while let Some(cause) = source {
                    write!(f, ": {cause}")?;
                    source = cause.source();
                }
                Ok(())
            }
        }
    }
}

/// Create and fill the table of every dataset. A failing dataset is reported and the
/// remaining ones are still processed.
pub fn run_import(
    outcomes: Vec<DatasetOutcome>,
    options: &ImportOptions,
    target: &ImportTarget,
    collaborators: &Collaborators,
) -> Vec<DatasetReport> {
    outcomes
        .into_iter()
        .map(|outcome| {
            let status = match outcome.script {
                Ok(script) => import_dataset(&script, options, target, collaborators),
                Err(err) => DatasetStatus::Failed(err),
            };
            match &status {
                DatasetStatus::Imported => info!(dataset = %outcome.name, "imported"),
                DatasetStatus::Skipped => info!(dataset = %outcome.name, "no layer, skipped"),
                DatasetStatus::Failed(err) => warn!(dataset = %outcome.name, %err, "failed"),
            }
            DatasetReport {
                name: outcome.name,
                status,
            }
        })
        .collect()
}

fn import_dataset(
    script: &DatasetScript,
    options: &ImportOptions,
    target: &ImportTarget,
    collaborators: &Collaborators,
) -> DatasetStatus {
    let Some(layer) = collaborators
        .layers
        .open_layer(&target.package, &script.table_name)
    else {
        return DatasetStatus::Skipped;
    };

    match load(script, &layer, options, target, collaborators) {
        Ok(()) => DatasetStatus::Imported,
        Err(err) => DatasetStatus::Failed(err.into()),
    }
}

fn load(
    script: &DatasetScript,
    layer: &LayerHandle,
    options: &ImportOptions,
    target: &ImportTarget,
    collaborators: &Collaborators,
) -> Result<(), OrchestrationError> {
    let connection = target.connection.as_str();
    collaborators.executor.execute(connection, &script.sql)?;
    let request = ImportRequest::staging(&options.schema, &script.table_name);
    collaborators.importer.import(connection, layer, &request)?;
    collaborators
        .executor
        .execute(connection, &script.copy_from_staging(&options.schema))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Calls(RefCell<Vec<String>>);

    struct FailingSql<'a> {
        calls: &'a Calls,
        fail_on: &'a str,
    }

    impl SqlExecutor for FailingSql<'_> {
        fn execute(&self, connection: &str, sql: &str) -> Result<(), OrchestrationError> {
            self.calls.0.borrow_mut().push(format!("sql {connection}: {sql}"));
            if sql.contains(self.fail_on) {
                return Err(OrchestrationError::Execute {
                    connection: connection.into(),
                    message: "relation already exists".into(),
                });
            }
            Ok(())
        }
    }

    impl BulkImporter for Calls {
        fn import(
            &self,
            connection: &str,
            layer: &LayerHandle,
            request: &ImportRequest,
        ) -> Result<(), OrchestrationError> {
            self.0.borrow_mut().push(format!(
                "import {connection}: {} -> {}.{}",
                layer.name, request.schema, request.table
            ));
            Ok(())
        }
    }

    fn outcome(name: &str) -> DatasetOutcome {
        DatasetOutcome {
            name: name.into(),
            script: Ok(DatasetScript {
                table_name: name.into(),
                sql: format!("CREATE TABLE public.{};\n", name.to_lowercase()),
                columns: "a, geom".into(),
            }),
        }
    }

    fn target() -> ImportTarget {
        ImportTarget {
            package: "data.gpkg".into(),
            connection: "gis".into(),
        }
    }

    #[test]
    fn datasets_are_created_imported_and_copied_in_order() {
        let calls = Calls::default();
        let executor = FailingSql {
            calls: &calls,
            fail_on: "never",
        };
        let layers = PackageLayers::new(Some(vec!["Roads".to_string()]));
        let collaborators = Collaborators {
            layers: &layers,
            executor: &executor,
            importer: &calls,
        };
        let reports = run_import(
            vec![outcome("Roads"), outcome("Rivers")],
            &ImportOptions::default(),
            &target(),
            &collaborators,
        );

        assert!(matches!(reports[0].status, DatasetStatus::Imported));
        assert!(matches!(reports[1].status, DatasetStatus::Skipped));
        assert_eq!(
            calls.0.into_inner(),
            [
                "sql gis: CREATE TABLE public.roads;\n",
                "import gis: Roads -> public.roads_tmp",
                "sql gis: INSERT INTO public.roads(a, geom) SELECT a, geom FROM public.roads_tmp;\nDROP TABLE public.roads_tmp;\n",
            ]
        );
    }

    #[test]
    fn failures_are_reported_per_dataset() {
        let calls = Calls::default();
        let executor = FailingSql {
            calls: &calls,
            fail_on: "public.roads;",
        };
        let layers = PackageLayers::new(None);
        let collaborators = Collaborators {
            layers: &layers,
            executor: &executor,
            importer: &calls,
        };
        let broken = DatasetOutcome {
            name: "Broken".into(),
            script: Err(crate::workspace::SchemaError::EmptyElement { tag: "Name" }.into()),
        };
        let reports = run_import(
            vec![outcome("Roads"), broken, outcome("Rivers")],
            &ImportOptions::default(),
            &target(),
            &collaborators,
        );

        assert!(reports[0].is_failure());
        assert!(reports[1].is_failure());
        assert!(matches!(reports[2].status, DatasetStatus::Imported));
        assert_eq!(
            reports[0].to_string(),
            "Error importing Roads: failed to execute SQL on connection \"gis\": relation already exists"
        );
        assert_eq!(reports[2].to_string(), "Feature Class: Rivers");
        // nothing but the failed CREATE TABLE ran for Roads
        assert_eq!(calls.0.borrow().len(), 4);
    }
}
