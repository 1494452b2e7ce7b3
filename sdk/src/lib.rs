//! lwm2m-stubgen
//!
//! Generates Zephyr LwM2M engine object stubs from OMA object definition files.
//!
//! - `generate_from_str` / `generate_from_path`: one document in, one C unit out
//! - `GeneratedStub::write_to`: writes the unit under its derived file name
//! - `model_to_json`: the parsed object definition as pretty JSON

pub use lwm2m_stubgen_compiler::config::{Cardinality, InstanceConfig};
pub use lwm2m_stubgen_compiler::error::{SchemaError, StubError};
pub use lwm2m_stubgen_compiler::types::{FieldDefinition, IntegerLayout, ObjectDefinition, ValueType};

use lwm2m_stubgen_compiler::{compile_schema, output_file_name};
use std::fs;
use std::path::{Path, PathBuf};

/// A fully rendered C unit, held in memory until it is written.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedStub {
    pub object:    ObjectDefinition,
    pub file_name: String,
    pub source:    String,
}

impl GeneratedStub {
    /// Writes the unit to `dir/<file_name>` and returns the path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, StubError> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.source)?;
        log::info!("wrote {} bytes to {}", self.source.len(), path.display());
        Ok(path)
    }
}

pub fn generate_from_str(xml: &str, config: &InstanceConfig) -> Result<GeneratedStub, StubError> {
    let (object, source) = compile_schema(xml, config)?;
    Ok(GeneratedStub {
        file_name: output_file_name(&object),
        object,
        source,
    })
}

pub fn generate_from_path(path: &Path, config: &InstanceConfig) -> Result<GeneratedStub, StubError> {
    let xml = fs::read_to_string(path)?;
    generate_from_str(&xml, config)
}

/// Pretty JSON of an object definition.
pub fn model_to_json(object: &ObjectDefinition) -> Result<String, StubError> {
    let json = serde_json::to_string_pretty(object).map_err(std::io::Error::from)?;
    Ok(json)
}

pub mod error {
    pub use lwm2m_stubgen_compiler::error::{SchemaError, StubError};
}

pub mod schema {
    pub use lwm2m_stubgen_schema::{from_str, ItemNode, Lwm2mDocument, ObjectNode};
}
