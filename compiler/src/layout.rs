//! Maps resource definitions onto C storage and onto the engine's field
//! descriptors and init macros.

use crate::{
    config::{Cardinality, InstanceConfig},
    error::{SchemaError, StubError},
    types::{FieldDefinition, IntegerLayout, ObjectDefinition, ValueType},
};
use std::fmt;

/// Length of the fixed buffers backing String and Opaque resources.
pub const DATA_BUFFER_LEN: usize = 64;

/// C storage of one resource inside the generated data struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    CharBuffer(usize),
    Integer(IntegerLayout),
    Objlnk,
    Float32,
    ByteBuffer(usize),
    Time,
    Bool,
}

impl StorageType {
    pub fn for_value_type(value_type: ValueType) -> Self {
        match value_type {
            ValueType::String           => StorageType::CharBuffer(DATA_BUFFER_LEN),
            ValueType::Integer(layout)  => StorageType::Integer(layout),
            ValueType::Objlnk           => StorageType::Objlnk,
            ValueType::Float            => StorageType::Float32,
            ValueType::Opaque           => StorageType::ByteBuffer(DATA_BUFFER_LEN),
            ValueType::Time             => StorageType::Time,
            ValueType::Boolean          => StorageType::Bool,
        }
    }

    pub fn c_type(&self) -> String {
        match self {
            StorageType::CharBuffer(_) => "char".to_string(),
            StorageType::Integer(IntegerLayout { signed: true, bits }) => format!("int{}_t", bits),
            StorageType::Integer(IntegerLayout { signed: false, bits }) => format!("uint{}_t", bits),
            StorageType::Objlnk        => "struct lwm2m_objlnk".to_string(),
            StorageType::Float32       => "float32_value_t".to_string(),
            StorageType::ByteBuffer(_) => "uint8_t".to_string(),
            StorageType::Time          => "uint32_t".to_string(),
            StorageType::Bool          => "bool".to_string(),
        }
    }

    pub fn array_suffix(&self) -> String {
        match self {
            StorageType::CharBuffer(len) | StorageType::ByteBuffer(len) => format!("[{}]", len),
            _ => String::new(),
        }
    }

    /// Struct member declaration, e.g. `char manufacturer[64]`.
    pub fn declaration(&self, member: &str) -> String {
        format!("{} {}{}", self.c_type(), member, self.array_suffix())
    }
}

/// Value type of a data resource, `None` for execute resources.
fn data_type(field: &FieldDefinition) -> Result<Option<ValueType>, StubError> {
    if field.is_exec() {
        return Ok(None);
    }
    match field.value_type {
        Some(value_type) => Ok(Some(value_type)),
        None => Err(SchemaError::EmptyValueType {
            field: field.name.clone(),
        }
        .into()),
    }
}

/// Storage of a resource in the data struct. Execute resources have none.
pub fn storage_type(field: &FieldDefinition) -> Result<Option<StorageType>, StubError> {
    Ok(data_type(field)?.map(StorageType::for_value_type))
}

/// Type argument of `OBJ_FIELD_DATA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    String,
    Integer(IntegerLayout),
    Objlnk,
    Float32,
    Opaque,
    Time,
    Bool,
}

impl From<ValueType> for TypeTag {
    fn from(value_type: ValueType) -> Self {
        match value_type {
            ValueType::String          => TypeTag::String,
            ValueType::Integer(layout) => TypeTag::Integer(layout),
            ValueType::Objlnk          => TypeTag::Objlnk,
            ValueType::Float           => TypeTag::Float32,
            ValueType::Opaque          => TypeTag::Opaque,
            ValueType::Time            => TypeTag::Time,
            ValueType::Boolean         => TypeTag::Bool,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::String  => f.write_str("STRING"),
            TypeTag::Integer(IntegerLayout { signed: true, bits }) => write!(f, "S{}", bits),
            TypeTag::Integer(IntegerLayout { signed: false, bits }) => write!(f, "U{}", bits),
            TypeTag::Objlnk  => f.write_str("OBJLNK"),
            TypeTag::Float32 => f.write_str("FLOAT32"),
            TypeTag::Opaque  => f.write_str("OPAQUE"),
            TypeTag::Time    => f.write_str("TIME"),
            TypeTag::Bool    => f.write_str("BOOL"),
        }
    }
}

/// Entry of the object's `fields[]` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Execute {
        optional: bool,
    },
    Data {
        access:   String,
        optional: bool,
        tag:      TypeTag,
    },
}

impl FieldKind {
    /// The descriptor macro call for the resource id macro `id_name`.
    pub fn descriptor(&self, id_name: &str) -> String {
        match self {
            FieldKind::Execute { optional: false } => format!("OBJ_FIELD_EXECUTE({})", id_name),
            FieldKind::Execute { optional: true } => format!("OBJ_FIELD_EXECUTE_OPT({})", id_name),
            FieldKind::Data { access, optional, tag } => {
                let opt = if *optional { "_OPT" } else { "" };
                format!("OBJ_FIELD_DATA({}, {}{}, {})", id_name, access, opt, tag)
            }
        }
    }
}

pub fn field_kind(field: &FieldDefinition) -> Result<FieldKind, StubError> {
    let optional = !field.mandatory;
    Ok(match data_type(field)? {
        None => FieldKind::Execute { optional },
        Some(value_type) => FieldKind::Data {
            access: field.operations.clone(),
            optional,
            tag: value_type.into(),
        },
    })
}

/// `INIT_OBJ_RES_*` macro used by the create callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMacro {
    Execute,
    Data,
    OptData,
    MultiData,
    MultiOptData,
}

impl InitMacro {
    pub fn name(&self) -> &'static str {
        match self {
            InitMacro::Execute      => "INIT_OBJ_RES_EXECUTE",
            InitMacro::Data         => "INIT_OBJ_RES_DATA",
            InitMacro::OptData      => "INIT_OBJ_RES_OPTDATA",
            InitMacro::MultiData    => "INIT_OBJ_RES_MULTI_DATA",
            InitMacro::MultiOptData => "INIT_OBJ_RES_MULTI_OPTDATA",
        }
    }

    /// Multi variants take the resource instance count and create flag.
    pub fn is_multi(&self) -> bool {
        matches!(self, InitMacro::MultiData | InitMacro::MultiOptData)
    }

    /// Mandatory data variants point at the backing struct member.
    pub fn has_data(&self) -> bool {
        matches!(self, InitMacro::Data | InitMacro::MultiData)
    }
}

pub fn init_macro(field: &FieldDefinition) -> InitMacro {
    match (field.is_exec(), field.singleton, field.mandatory) {
        (true, _, _)          => InitMacro::Execute,
        (false, true, true)   => InitMacro::Data,
        (false, true, false)  => InitMacro::OptData,
        (false, false, true)  => InitMacro::MultiData,
        (false, false, false) => InitMacro::MultiOptData,
    }
}

/// Multi-instance resources get a `<OBJ>_<RES>_MAX` constant.
pub fn needs_max_constant(field: &FieldDefinition) -> bool {
    !field.singleton
}

/// Multi-instance objects get a `MAX_INSTANCE_COUNT` constant.
pub fn needs_instance_count(obj: &ObjectDefinition) -> bool {
    !obj.singleton
}

/// Value of `<OBJ>_MAX_ID`.
///
/// This is the number of resources, not the highest resource id. Objects
/// with sparse ids still size their `res[]` array by it.
pub fn max_field_id(obj: &ObjectDefinition) -> usize {
    obj.fields.len()
}

/// The terms of `RESOURCE_INSTANCE_COUNT`.
///
/// Every data resource starts with one instance slot; multi-instance data
/// resources trade it for their configured maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceInstanceBudget<'a> {
    pub max_field_id: usize,
    pub exec_count:   usize,
    pub multi:        Vec<(&'a FieldDefinition, Cardinality)>,
}

impl<'a> ResourceInstanceBudget<'a> {
    pub fn new(obj: &'a ObjectDefinition, config: &InstanceConfig) -> Self {
        ResourceInstanceBudget {
            max_field_id: max_field_id(obj),
            exec_count:   obj.exec_fields().count(),
            multi:        obj
                .multi_data_fields()
                .map(|f| (f, config.resource_instance_max(f.id)))
                .collect(),
        }
    }

    pub fn total(&self) -> i64 {
        let added: i64 = self.multi.iter().map(|(_, max)| i64::from(max.value)).sum();
        self.max_field_id as i64 - self.exec_count as i64 - self.multi.len() as i64 + added
    }
}

pub fn resource_instance_count(obj: &ObjectDefinition, config: &InstanceConfig) -> i64 {
    ResourceInstanceBudget::new(obj, config).total()
}
