use std::cell::RefCell;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use super::{BulkImporter, ImportRequest, LayerHandle, LayerSource, OrchestrationError, SqlExecutor};

/// Layer source answering from a known list of layer names, or accepting every name when no
/// list is given.
#[derive(Clone, Debug, Default)]
pub struct PackageLayers {
    names: Option<HashSet<String>>,
}

impl PackageLayers {
    pub fn new(names: Option<Vec<String>>) -> Self {
        Self {
            names: names.map(|names| names.into_iter().collect()),
        }
    }
}

impl LayerSource for PackageLayers {
    fn open_layer(&self, package: &Path, name: &str) -> Option<LayerHandle> {
        let present = self.names.as_ref().map_or(true, |names| names.contains(name));
        present.then(|| LayerHandle {
            package: package.to_path_buf(),
            name: name.to_string(),
        })
    }
}

/// Executor and importer that write what would be done, in order, instead of doing it.
///
/// SQL is written as is; imports are written as SQL comments.
pub struct ScriptRecorder<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> ScriptRecorder<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> SqlExecutor for ScriptRecorder<W> {
    fn execute(&self, connection: &str, sql: &str) -> Result<(), OrchestrationError> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "-- execute on {connection}")?;
        out.write_all(sql.as_bytes())?;
        if !sql.ends_with('\n') {
            writeln!(out)?;
        }
        Ok(())
    }
}

impl<W: Write> BulkImporter for ScriptRecorder<W> {
    fn import(
        &self,
        connection: &str,
        layer: &LayerHandle,
        request: &ImportRequest,
    ) -> Result<(), OrchestrationError> {
        let mut out = self.out.borrow_mut();
        writeln!(
            out,
            "-- import layer {:?} from {} into {}.{} on {connection} \
             (geometry column {}, lowercase names {}, overwrite {}, encoding {}, spatial index {})",
            layer.name,
            layer.package.display(),
            request.schema,
            request.table,
            request.geometry_column,
            request.lowercase_names,
            request.overwrite,
            request.encoding,
            request.create_spatial_index,
        )?;
        Ok(())
    }
}
