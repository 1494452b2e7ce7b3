use crate::{
    error::{SchemaError, StubError},
    layout::{field_kind, max_field_id},
    names,
    types::ObjectDefinition,
};
use std::collections::HashSet;

/// Returns `Ok(())` if the object can be rendered, or the first problem found.
pub fn verify_object(obj: &ObjectDefinition) -> Result<(), StubError> {
    // 1) Resource ids must be unique
    let mut ids = HashSet::new();
    for field in &obj.fields {
        if !ids.insert(field.id) {
            return Err(SchemaError::DuplicateFieldId { id: field.id }.into());
        }
    }

    // 2) So must the macros derived from the resource names
    let mut identifiers = HashSet::new();
    for field in &obj.fields {
        let identifier = names::res_id(obj, field);
        if !identifiers.insert(identifier.clone()) {
            return Err(SchemaError::DuplicateIdentifier { identifier }.into());
        }
    }

    // 3) Every data resource needs a type
    for field in &obj.fields {
        field_kind(field)?;
    }

    // `res[]` is sized by the resource count, not by the highest id
    let max_id = max_field_id(obj);
    if let Some(field) = obj.fields.iter().find(|f| usize::from(f.id) >= max_id) {
        log::warn!(
            "resource \"{}\" has id {} but {} is {}; check the sizing before using the stub",
            field.name,
            field.id,
            names::max_id(obj),
            max_id
        );
    }

    Ok(())
}
