use crate::error::SchemaError;
use std::collections::BTreeMap;

/// The fallback for every instance count the generated unit declares.
pub const DEFAULT_INSTANCE_COUNT: u32 = 1;

/// A resolved instance count and whether it came from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub value:      u32,
    pub configured: bool,
}

impl Cardinality {
    fn resolve(value: Option<u32>) -> Self {
        match value {
            Some(value) => Cardinality { value, configured: true },
            None => Cardinality {
                value:      DEFAULT_INSTANCE_COUNT,
                configured: false,
            },
        }
    }
}

/// Build-time defaults for the instance counts of one object.
///
/// The generated unit still lets a Kconfig symbol win; these values only
/// replace the `1` used when the symbol is not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceConfig {
    /// Default for `MAX_INSTANCE_COUNT` of a multi-instance object.
    pub object_instances:   Option<u32>,
    /// Default for `<OBJ>_<RES>_MAX`, keyed by resource id.
    pub resource_instances: BTreeMap<u16, u32>,
}

impl InstanceConfig {
    pub fn object_instance_count(&self) -> Cardinality {
        Cardinality::resolve(self.object_instances)
    }

    pub fn resource_instance_max(&self, field_id: u16) -> Cardinality {
        Cardinality::resolve(self.resource_instances.get(&field_id).copied())
    }

    /// Parses a `<resource id>=<count>` override as given on the command line.
    pub fn parse_resource_override(arg: &str) -> Result<(u16, u32), SchemaError> {
        let invalid = || SchemaError::InvalidNumber {
            element: "resource instance override",
            value:   arg.to_string(),
        };

        let (id, count) = arg.split_once('=').ok_or_else(invalid)?;
        let id = id.trim().parse::<u16>().map_err(|_| invalid())?;
        let count = count.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok((id, count))
    }
}
