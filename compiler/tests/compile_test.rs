use lwm2m_stubgen_compiler::{
    compile_object_to_c, compile_schema,
    config::InstanceConfig,
    error::{SchemaError, StubError},
    layout::{field_kind, max_field_id, resource_instance_count, storage_type, FieldKind, StorageType, TypeTag},
    load_object, output_file_name,
    types::{IntegerLayout, ValueType},
};
use std::fs;
use std::path::PathBuf;

/// Helper function to load a document from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

#[test]
fn test_parse_test_object() {
    let object = load_object(&load_test_file("test_object.xml")).expect("load_object failed");

    assert_eq!(object.name, "Test Object");
    assert_eq!(object.id, 9999);
    assert_eq!(object.urn, "urn:oma:lwm2m:x:9999");
    assert_eq!(object.version.as_deref(), Some("1.0"));
    assert_eq!(object.description, "Object used by the generator tests.");
    assert!(!object.singleton);
    assert!(object.mandatory);
    assert_eq!(object.fields.len(), 2);

    let level = &object.fields[0];
    assert_eq!(level.id, 1);
    assert_eq!(level.name, "Level");
    assert_eq!(level.operations, "RW");
    assert!(level.singleton);
    assert!(level.mandatory);
    assert_eq!(
        level.value_type,
        Some(ValueType::Integer(IntegerLayout { signed: false, bits: 8 }))
    );
    assert_eq!(level.range.as_deref(), Some("0..255"));

    let trigger = &object.fields[1];
    assert_eq!(trigger.id, 2);
    assert!(trigger.is_exec());
    assert_eq!(trigger.value_type, Some(ValueType::String));
}

#[test]
fn test_end_to_end_test_object() {
    let config = InstanceConfig::default();
    let (object, code) = compile_schema(&load_test_file("test_object.xml"), &config)
        .expect("compile_schema failed");

    // Level: unsigned 8 bit storage and a RW data descriptor
    let level = &object.fields[0];
    assert_eq!(
        storage_type(level).unwrap(),
        Some(StorageType::Integer(IntegerLayout { signed: false, bits: 8 }))
    );
    assert_eq!(
        field_kind(level).unwrap(),
        FieldKind::Data {
            access:   "RW".to_string(),
            optional: false,
            tag:      TypeTag::Integer(IntegerLayout { signed: false, bits: 8 }),
        }
    );
    assert!(code.contains("\tuint8_t level;\n"));
    assert!(code.contains("\tOBJ_FIELD_DATA(TEST_OBJECT_LEVEL_ID, RW, U8),\n"));

    // Trigger: execute only, no storage, callback stub
    let trigger = &object.fields[1];
    assert_eq!(storage_type(trigger).unwrap(), None);
    assert_eq!(field_kind(trigger).unwrap(), FieldKind::Execute { optional: false });
    assert!(!code.contains("char trigger"));
    assert!(code.contains("\tOBJ_FIELD_EXECUTE(TEST_OBJECT_TRIGGER_ID)\n"));
    assert!(code.contains("static int test_object_trigger_exec_cb(uint16_t obj_inst_id)\n"));

    // Multi-instance object
    assert!(code.contains("#define MAX_INSTANCE_COUNT 1\n"));
    assert!(code.contains("static struct test_object_data_t test_object_data[MAX_INSTANCE_COUNT];\n"));

    // 2 resources - 1 exec - 0 multi
    assert_eq!(resource_instance_count(&object, &config), 1);
    assert!(code.contains("#define RESOURCE_INSTANCE_COUNT (TEST_OBJECT_MAX_ID - 1 - 0)\n"));

    assert_eq!(output_file_name(&object), "lwm2m_obj_test_object_stub.c");
}

#[test]
fn test_device_object() {
    let config = InstanceConfig::default();
    let (object, code) = compile_schema(&load_test_file("device.xml"), &config)
        .expect("compile_schema failed");

    assert!(object.singleton);
    // ObjectVersion is absent from 1.0 objects
    assert_eq!(object.version, None);
    assert!(code.contains(" * urn:oma:lwm2m:oma:3\n"));
    assert!(!code.contains(" version "));
    assert_eq!(object.fields.len(), 8);
    assert_eq!(max_field_id(&object), 8);
    assert_eq!(resource_instance_count(&object, &config), 8 - 2 - 3 + 3);

    assert!(code.contains("#define DEVICE_ERROR_CODE_ID 11\n"));
    assert!(code.contains("#define DEVICE_MAX_ID 8\n"));
    assert!(!code.contains("MAX_INSTANCE_COUNT"));
    assert!(code.contains("#define DEVICE_ERROR_CODE_MAX 1\n"));
    assert!(code.contains("\tint32_t power_source_voltage;\n"));
    assert!(code.contains("\tuint8_t available_power_sources;\n"));
    assert!(code.contains("\tuint32_t current_time;\n"));
    assert!(code.contains("\tchar supported_binding_and_modes[64];\n"));
    assert!(code.contains("\tOBJ_FIELD_DATA(DEVICE_MANUFACTURER_ID, R_OPT, STRING),\n"));
    assert!(code.contains("\tOBJ_FIELD_DATA(DEVICE_CURRENT_TIME_ID, RW_OPT, TIME),\n"));
    assert!(code.contains("\tOBJ_FIELD_EXECUTE_OPT(DEVICE_FACTORY_RESET_ID),\n"));
    assert!(code.contains("static int device_reboot_exec_cb(uint16_t obj_inst_id)\n"));
    assert!(!code.contains("device_factory_reset_exec_cb"));
    assert!(code.contains("\tINIT_OBJ_RES_MULTI_DATA(DEVICE_ERROR_CODE_ID,\n"));
    assert!(code.contains("\t                        &device_data.error_code,\n"));
    assert!(code.contains("/* auto create the only instance */\n"));
    assert_eq!(output_file_name(&object), "lwm2m_obj_device_stub.c");
}

#[test]
fn test_generation_is_deterministic() {
    let xml = load_test_file("device.xml");
    let config = InstanceConfig::default();
    let (_, first) = compile_schema(&xml, &config).unwrap();
    let (_, second) = compile_schema(&xml, &config).unwrap();
    assert_eq!(first, second);

    let object = load_object(&xml).unwrap();
    assert_eq!(compile_object_to_c(&object, &config).unwrap(), first);
}

#[test]
fn test_unknown_type() {
    let err = compile_schema(&load_test_file("corge.xml"), &InstanceConfig::default()).unwrap_err();
    match err {
        StubError::UnsupportedType { field, type_name } => {
            assert_eq!(field, "Level");
            assert_eq!(type_name, "Corge");
        }
        other => panic!("expected UnsupportedType but got {:?}", other),
    }
}

#[test]
fn test_missing_mandatory_element() {
    let err = load_object(&load_test_file("missing_mandatory.xml")).unwrap_err();
    assert!(
        matches!(
            err,
            StubError::Schema(SchemaError::MissingElement { element: "Mandatory", .. })
        ),
        "expected a MissingElement but got {:?}",
        err
    );
}

#[test]
fn test_bad_range() {
    let xml = load_test_file("test_object.xml").replace("0..255", "0-255");
    let err = load_object(&xml).unwrap_err();
    assert!(matches!(err, StubError::Schema(SchemaError::InvalidRange { .. })));
}

#[test]
fn test_integer_too_wide() {
    let xml = load_test_file("test_object.xml").replace("0..255", "-1..4294967296");
    let err = load_object(&xml).unwrap_err();
    assert!(matches!(err, StubError::Schema(SchemaError::IntegerTooWide { bits: 128, .. })));
}

#[test]
fn test_data_resource_without_type() {
    let xml = load_test_file("test_object.xml").replace("<Type>Integer</Type>", "<Type></Type>");
    let err = load_object(&xml).unwrap_err();
    assert!(matches!(err, StubError::Schema(SchemaError::EmptyValueType { .. })));
}

#[test]
fn test_duplicate_resource_id() {
    let xml = load_test_file("test_object.xml").replace("<Item ID=\"2\">", "<Item ID=\"1\">");
    let err = load_object(&xml).unwrap_err();
    assert!(matches!(err, StubError::Schema(SchemaError::DuplicateFieldId { id: 1 })));
}

#[test]
fn test_not_xml() {
    let err = load_object("this is not xml <").unwrap_err();
    assert!(matches!(err, StubError::Xml(_)));
}

#[test]
fn test_configured_instances() {
    let xml = load_test_file("device.xml");
    let mut config = InstanceConfig::default();
    config.resource_instances.insert(11, 4);
    config.resource_instances.insert(6, 2);

    let (object, code) = compile_schema(&xml, &config).unwrap();
    assert_eq!(resource_instance_count(&object, &config), 8 - 2 - 3 + 2 + 1 + 4);
    assert!(code.contains("#define DEVICE_ERROR_CODE_MAX 4\n"));
    assert!(code.contains("#define DEVICE_AVAILABLE_POWER_SOURCES_MAX 2\n"));
    assert!(code.contains("#define DEVICE_POWER_SOURCE_VOLTAGE_MAX 1\n"));
}
