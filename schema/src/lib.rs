//! Serde model of the OMA LwM2M object definition document (the "DDF" XML
//! published in the OMA object registry), plus a thin loader on top of
//! `quick-xml`.
//!
//! ```
//! use lwm2m_stubgen_schema::*;
//!
//! let xml = r#"<LWM2M><Object ObjectType="MODefinition">
//!     <Name>Light Control</Name>
//!     <ObjectID>3311</ObjectID>
//!     <Resources><Item ID="5850"><Name>On/Off</Name></Item></Resources>
//! </Object></LWM2M>"#;
//!
//! let doc = from_str(xml).unwrap();
//! let object = doc.object().unwrap();
//! assert_eq!(text(&object.name), Some("Light Control"));
//! assert_eq!(object.items().len(), 1);
//! assert_eq!(text(&object.items()[0].id), Some("5850"));
//! ```

pub mod document;

pub use document::*;
pub use quick_xml::errors::serialize::DeError;

/// Deserialize a whole DDF document.
pub fn from_str(xml: &str) -> Result<Lwm2mDocument, DeError> {
    quick_xml::de::from_str(xml)
}

/// Trimmed text of an optional element, `None` when the element is absent
/// or blank. `<Type></Type>` and a missing `<Type>` read the same.
pub fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
