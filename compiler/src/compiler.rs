use crate::{
    config::InstanceConfig,
    error::StubError,
    gen_c::compile_object_to_c,
    parser::parse_object_str,
    types::ObjectDefinition,
    verifier::verify_object,
};

/// Parse and verify an object definition document.
pub fn load_object(xml: &str) -> Result<ObjectDefinition, StubError> {
    let object = parse_object_str(xml)?;
    verify_object(&object)?;
    Ok(object)
}

/// Compile an object definition document into `(ObjectDefinition, C source)`.
/// Returns `Err(StubError)` if parsing, verification or rendering fails; no
/// partial source is ever returned.
pub fn compile_schema(
    xml: &str,
    config: &InstanceConfig,
) -> Result<(ObjectDefinition, String), StubError> {
    let object = load_object(xml)?;
    let source = compile_object_to_c(&object, config)?;
    log::debug!("rendered {} bytes for object {}", source.len(), object.id);
    Ok((object, source))
}
