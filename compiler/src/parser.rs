use crate::{
    error::{SchemaError, StubError},
    types::{FieldDefinition, IntegerLayout, ObjectDefinition, ValueType},
};
use lazy_static::lazy_static;
use lwm2m_stubgen_schema::{text, ItemNode, Lwm2mDocument, ObjectNode};
use regex::Regex;

lazy_static! {
    static ref RANGE: Regex =
        Regex::new(r"^\s*(?P<min>-?\d+\.?\d*)\.\.+(?P<max>-?\d+\.?\d*)\s*$").unwrap();
}

const INTEGER_WIDTHS: [u32; 4] = [8, 16, 32, 64];

/// Deserialize and normalize an object definition document.
pub fn parse_object_str(xml: &str) -> Result<ObjectDefinition, StubError> {
    let document = lwm2m_stubgen_schema::from_str(xml)?;
    parse_object(&document)
}

/// Build the object definition from the first `<Object>` of the document.
pub fn parse_object(document: &Lwm2mDocument) -> Result<ObjectDefinition, StubError> {
    let node = document.object().ok_or(SchemaError::MissingObject)?;
    let object = parse_object_node(node)?;

    log::debug!(
        "parsed object {} \"{}\" with {} resources",
        object.id,
        object.name,
        object.fields.len()
    );
    Ok(object)
}

fn parse_object_node(node: &ObjectNode) -> Result<ObjectDefinition, StubError> {
    let owner = "<Object>";
    let name = required(&node.name, "Name", owner)?.to_string();
    let owner = format!("object \"{}\"", name);

    let id = parse_number(required(&node.object_id, "ObjectID", &owner)?, "ObjectID")?;
    let urn = required(&node.object_urn, "ObjectURN", &owner)?.to_string();
    let version = text(&node.object_version).map(str::to_string);
    let singleton = required(&node.multiple_instances, "MultipleInstances", &owner)? == "Single";
    let mandatory = required(&node.mandatory, "Mandatory", &owner)? == "Mandatory";

    let fields = node
        .items()
        .iter()
        .map(parse_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ObjectDefinition {
        name,
        description:  text(&node.description1).unwrap_or_default().to_string(),
        description2: text(&node.description2).map(str::to_string),
        id,
        urn,
        version,
        singleton,
        mandatory,
        fields,
    })
}

fn parse_item(item: &ItemNode) -> Result<FieldDefinition, StubError> {
    let id_text = text(&item.id).ok_or_else(|| SchemaError::MissingElement {
        element: "ID",
        owner:   "<Item>".to_string(),
    })?;
    let id = parse_number(id_text, "ID")?;
    let owner = format!("<Item ID=\"{}\">", id);

    let name = required(&item.name, "Name", &owner)?.to_string();
    let operations = required(&item.operations, "Operations", &owner)?.to_string();
    let singleton = required(&item.multiple_instances, "MultipleInstances", &owner)? == "Single";
    let mandatory = required(&item.mandatory, "Mandatory", &owner)? == "Mandatory";
    let range = text(&item.range_enumeration);

    let value_type = match text(&item.type_) {
        Some(type_name) => Some(parse_value_type(&name, type_name, range)?),
        None => None,
    };

    let field = FieldDefinition {
        id,
        name,
        operations,
        singleton,
        mandatory,
        value_type,
        range:       range.map(str::to_string),
        units:       text(&item.units).map(str::to_string),
        description: text(&item.description).unwrap_or_default().to_string(),
    };

    if !field.is_exec() && field.value_type.is_none() {
        return Err(SchemaError::EmptyValueType { field: field.name }.into());
    }

    Ok(field)
}

/// Maps a document type name onto the closed set of supported types.
pub fn parse_value_type(
    field: &str,
    type_name: &str,
    range: Option<&str>,
) -> Result<ValueType, StubError> {
    let value_type = match type_name {
        "String"  => ValueType::String,
        "Integer" => ValueType::Integer(integer_layout(field, range)?),
        "Objlnk"  => ValueType::Objlnk,
        "Float"   => ValueType::Float,
        "Opaque"  => ValueType::Opaque,
        "Time"    => ValueType::Time,
        "Boolean" => ValueType::Boolean,
        other => {
            return Err(StubError::UnsupportedType {
                field:     field.to_string(),
                type_name: other.to_string(),
            })
        }
    };
    Ok(value_type)
}

/// Splits a `min..max` range into its bounds.
pub fn parse_range(field: &str, range: &str) -> Result<(f64, f64), SchemaError> {
    let invalid = || SchemaError::InvalidRange {
        field: field.to_string(),
        range: range.to_string(),
    };

    let caps = RANGE.captures(range).ok_or_else(invalid)?;
    let min = caps["min"].parse::<f64>().map_err(|_| invalid())?;
    let max = caps["max"].parse::<f64>().map_err(|_| invalid())?;
    Ok((min, max))
}

/// Derives the storage width of an Integer resource from its declared range.
///
/// The width is the smallest of 8/16/32/64 bits that holds `max`, doubled when
/// `min` is negative. No range means a signed 32 bit integer.
///
/// `max` is sized by its bit length rather than `ceil(log2(max))`, so an exact
/// power of two such as `0..256` needs 16 bits and the maximum still fits.
pub fn integer_layout(field: &str, range: Option<&str>) -> Result<IntegerLayout, SchemaError> {
    let Some(range) = range else {
        return Ok(IntegerLayout::default());
    };

    let (min, max) = parse_range(field, range)?;
    let signed = min < 0.0;

    let needed = bit_length(max);
    let mut bits = INTEGER_WIDTHS
        .iter()
        .copied()
        .find(|&w| w >= needed)
        .unwrap_or_else(|| needed.next_power_of_two());
    if signed {
        bits *= 2;
    }

    if bits > 64 {
        return Err(SchemaError::IntegerTooWide {
            field: field.to_string(),
            bits,
        });
    }

    Ok(IntegerLayout {
        signed,
        bits: bits as u8,
    })
}

/// Number of bits needed for the magnitude of `value`, at least 1.
fn bit_length(value: f64) -> u32 {
    let magnitude = value.abs().ceil();
    // Also catches a bound too long to be finite as f64
    if magnitude >= u64::MAX as f64 {
        return u64::BITS + 1;
    }
    (u64::BITS - (magnitude as u64).leading_zeros()).max(1)
}

fn required<'a>(
    value: &'a Option<String>,
    element: &'static str,
    owner: &str,
) -> Result<&'a str, SchemaError> {
    text(value).ok_or_else(|| SchemaError::MissingElement {
        element,
        owner: owner.to_string(),
    })
}

fn parse_number(value: &str, element: &'static str) -> Result<u16, SchemaError> {
    value.parse::<u16>().map_err(|_| SchemaError::InvalidNumber {
        element,
        value: value.to_string(),
    })
}
