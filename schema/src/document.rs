use serde::Deserialize;

/// The `<LWM2M>` root element.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Lwm2mDocument {
    #[serde(rename = "Object", default)]
    pub objects: Vec<ObjectNode>,
}

impl Lwm2mDocument {
    /// The first `<Object>` of the document. DDF files carry exactly one.
    pub fn object(&self) -> Option<&ObjectNode> {
        self.objects.first()
    }
}

/// One `<Object>` element. Every child is optional here; the compiler decides
/// which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObjectNode {
    #[serde(rename = "@ObjectType", default)]
    pub object_type: Option<String>,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "Description1", default)]
    pub description1: Option<String>,

    #[serde(rename = "Description2", default)]
    pub description2: Option<String>,

    #[serde(rename = "ObjectID", default)]
    pub object_id: Option<String>,

    #[serde(rename = "ObjectURN", default)]
    pub object_urn: Option<String>,

    #[serde(rename = "LWM2MVersion", default)]
    pub lwm2m_version: Option<String>,

    #[serde(rename = "ObjectVersion", default)]
    pub object_version: Option<String>,

    #[serde(rename = "MultipleInstances", default)]
    pub multiple_instances: Option<String>,

    #[serde(rename = "Mandatory", default)]
    pub mandatory: Option<String>,

    #[serde(rename = "Resources", default)]
    pub resources: Option<ResourcesNode>,
}

impl ObjectNode {
    /// Resource items in document order.
    pub fn items(&self) -> &[ItemNode] {
        self.resources
            .as_ref()
            .map(|r| r.items.as_slice())
            .unwrap_or_default()
    }
}

/// The `<Resources>` wrapper.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourcesNode {
    #[serde(rename = "Item", default)]
    pub items: Vec<ItemNode>,
}

/// One `<Item ID="...">` resource definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemNode {
    #[serde(rename = "@ID", default)]
    pub id: Option<String>,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "Operations", default)]
    pub operations: Option<String>,

    #[serde(rename = "MultipleInstances", default)]
    pub multiple_instances: Option<String>,

    #[serde(rename = "Mandatory", default)]
    pub mandatory: Option<String>,

    #[serde(rename = "Type", default)]
    pub type_: Option<String>,

    #[serde(rename = "RangeEnumeration", default)]
    pub range_enumeration: Option<String>,

    #[serde(rename = "Units", default)]
    pub units: Option<String>,

    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}
