//! Every C identifier the generated unit defines or references, derived from
//! the object and resource names.

use crate::types::{FieldDefinition, ObjectDefinition};
use crate::utils::{def_format, name_format};

pub const MAX_INSTANCE_COUNT: &str = "MAX_INSTANCE_COUNT";
pub const RESOURCE_INSTANCE_COUNT: &str = "RESOURCE_INSTANCE_COUNT";

pub fn obj_id_def(obj: &ObjectDefinition) -> String {
    format!("LWM2M_OBJECT_{}_ID", def_format(&obj.name))
}

pub fn max_id(obj: &ObjectDefinition) -> String {
    format!("{}_MAX_ID", def_format(&obj.name))
}

pub fn instance_count_config(obj: &ObjectDefinition) -> String {
    format!("CONFIG_LWM2M_{}_INSTANCE_COUNT", def_format(&obj.name))
}

fn res_def_name(obj: &ObjectDefinition, res: &FieldDefinition) -> String {
    format!("{}_{}", def_format(&obj.name), def_format(&res.name))
}

pub fn res_id(obj: &ObjectDefinition, res: &FieldDefinition) -> String {
    format!("{}_ID", res_def_name(obj, res))
}

pub fn res_max(obj: &ObjectDefinition, res: &FieldDefinition) -> String {
    format!("{}_MAX", res_def_name(obj, res))
}

pub fn res_max_config(obj: &ObjectDefinition, res: &FieldDefinition) -> String {
    format!("CONFIG_{}", res_max(obj, res))
}

/// Name of the `struct lwm2m_engine_obj` and prefix of the module functions.
pub fn obj_var(obj: &ObjectDefinition) -> String {
    name_format(&obj.name)
}

pub fn member(res: &FieldDefinition) -> String {
    name_format(&res.name)
}

pub fn data_var(obj: &ObjectDefinition) -> String {
    format!("{}_data", name_format(&obj.name))
}

pub fn data_type(obj: &ObjectDefinition) -> String {
    format!("struct {}_t", data_var(obj))
}

pub fn exec_cb(obj: &ObjectDefinition, res: &FieldDefinition) -> String {
    format!("{}_{}_exec_cb", name_format(&obj.name), name_format(&res.name))
}

pub fn create_fn(obj: &ObjectDefinition) -> String {
    format!("{}_create", name_format(&obj.name))
}

pub fn init_fn(obj: &ObjectDefinition) -> String {
    format!("lwm2m_{}_init", name_format(&obj.name))
}

pub fn log_module(obj: &ObjectDefinition) -> String {
    format!("net_lwm2m_obj_{}", name_format(&obj.name))
}

pub fn output_file_name(obj: &ObjectDefinition) -> String {
    format!("lwm2m_obj_{}_stub.c", name_format(&obj.name))
}
