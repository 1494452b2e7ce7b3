use thiserror::Error;

/// Malformed or incomplete object definition content.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Document has no <Object> element")]
    MissingObject,

    #[error("Missing required element <{element}> in {owner}")]
    MissingElement {
        element: &'static str,
        owner:   String,
    },

    #[error("Element <{element}> is not a valid number: \"{value}\"")]
    InvalidNumber {
        element: &'static str,
        value:   String,
    },

    #[error("Resource \"{field}\" has an invalid range \"{range}\", expected min..max")]
    InvalidRange {
        field: String,
        range: String,
    },

    #[error("Resource \"{field}\" needs a {bits} bit integer, the limit is 64")]
    IntegerTooWide {
        field: String,
        bits:  u32,
    },

    #[error("Resource \"{field}\" is not executable but has no type")]
    EmptyValueType { field: String },

    #[error("The resource id {id} is used twice")]
    DuplicateFieldId { id: u16 },

    #[error("The identifier {identifier} is generated twice")]
    DuplicateIdentifier { identifier: String },
}

#[derive(Debug, Error)]
pub enum StubError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::errors::serialize::DeError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Unhandled resource type \"{type_name}\" for resource \"{field}\"")]
    UnsupportedType {
        field:     String,
        type_name: String,
    },
}
