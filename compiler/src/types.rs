use serde::Serialize;

/// Width and signedness derived from an Integer resource's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegerLayout {
    pub signed: bool,
    pub bits:   u8,
}

impl Default for IntegerLayout {
    /// Integers without a declared range are stored as `int32_t`.
    fn default() -> Self {
        IntegerLayout { signed: true, bits: 32 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueType {
    String,
    Integer(IntegerLayout),
    Objlnk,
    Float,
    Opaque,
    Time,
    Boolean,
}

impl ValueType {
    /// The name used for this type in object definition documents.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String     => "String",
            ValueType::Integer(_) => "Integer",
            ValueType::Objlnk     => "Objlnk",
            ValueType::Float      => "Float",
            ValueType::Opaque     => "Opaque",
            ValueType::Time       => "Time",
            ValueType::Boolean    => "Boolean",
        }
    }
}

/// One resource of an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub id:          u16,
    pub name:        String,
    pub operations:  String,
    pub singleton:   bool,
    pub mandatory:   bool,
    pub value_type:  Option<ValueType>,
    pub range:       Option<String>,
    pub units:       Option<String>,
    pub description: String,
}

impl FieldDefinition {
    /// Execute-only resources are actions and carry no storage.
    pub fn is_exec(&self) -> bool {
        self.operations.eq_ignore_ascii_case("E")
    }

    /// Non-executable resources that hold more than one value.
    pub fn is_multi_data(&self) -> bool {
        !self.is_exec() && !self.singleton
    }
}

/// One LwM2M object definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDefinition {
    pub name:         String,
    pub description:  String,
    pub description2: Option<String>,
    pub id:           u16,
    pub urn:          String,
    /// `<ObjectVersion>` as written; objects older than LwM2M 1.1 omit it.
    pub version:      Option<String>,
    pub singleton:    bool,
    pub mandatory:    bool,
    pub fields:       Vec<FieldDefinition>,
}

impl ObjectDefinition {
    pub fn exec_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.is_exec())
    }

    pub fn data_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| !f.is_exec())
    }

    pub fn multi_data_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.is_multi_data())
    }
}
