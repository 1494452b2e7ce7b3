use lwm2m_stubgen_compiler::{
    compile_object_to_c,
    config::InstanceConfig,
    layout::resource_instance_count,
    parser::integer_layout,
    types::{FieldDefinition, ObjectDefinition, ValueType},
};
use proptest::prelude::*;

fn width_for(bits_needed: u32) -> u32 {
    [8, 16, 32, 64].into_iter().find(|&w| w >= bits_needed).unwrap()
}

fn arb_field() -> impl Strategy<Value = (bool, bool, bool, Option<u32>)> {
    // (exec, singleton, mandatory, configured max)
    (any::<bool>(), any::<bool>(), any::<bool>(), prop::option::of(1u32..16))
}

fn build_object(singleton: bool, specs: &[(bool, bool, bool, Option<u32>)]) -> (ObjectDefinition, InstanceConfig) {
    let mut config = InstanceConfig::default();
    let fields = specs
        .iter()
        .enumerate()
        .map(|(i, &(exec, singleton, mandatory, max))| {
            let id = i as u16;
            if let Some(max) = max {
                config.resource_instances.insert(id, max);
            }
            FieldDefinition {
                id,
                name:        format!("Res {}", i),
                operations:  if exec { "E".to_string() } else { "RW".to_string() },
                singleton,
                mandatory,
                value_type:  if exec { None } else { Some(ValueType::Boolean) },
                range:       None,
                units:       None,
                description: String::new(),
            }
        })
        .collect();

    let object = ObjectDefinition {
        name:         "Synthetic".to_string(),
        description:  String::new(),
        description2: None,
        id:           32000,
        urn:          String::new(),
        version:      Some("1.0".to_string()),
        singleton,
        mandatory:    false,
        fields,
    };
    (object, config)
}

proptest! {
    #[test]
    fn unsigned_width_covers_max(max in 0u64..=u64::MAX / 2) {
        let layout = integer_layout("v", Some(&format!("0..{}", max))).unwrap();
        let needed = (64 - max.leading_zeros()).max(1);
        prop_assert!(!layout.signed);
        prop_assert_eq!(u32::from(layout.bits), width_for(needed));
    }

    #[test]
    fn signed_width_is_doubled(min in i64::MIN / 2..0i64, max in 0u64..=u32::MAX as u64) {
        let range = format!("{}..{}", min, max);
        let needed = (64 - max.leading_zeros()).max(1);
        let doubled = width_for(needed) * 2;
        match integer_layout("v", Some(&range)) {
            Ok(layout) => {
                prop_assert!(layout.signed);
                prop_assert_eq!(u32::from(layout.bits), doubled);
            }
            Err(_) => prop_assert!(doubled > 64),
        }
    }

    #[test]
    fn resource_instance_formula(singleton in any::<bool>(), specs in prop::collection::vec(arb_field(), 0..12)) {
        let (object, config) = build_object(singleton, &specs);

        let exec = specs.iter().filter(|s| s.0).count() as i64;
        let multi: Vec<_> = specs.iter().filter(|s| !s.0 && !s.1).collect();
        let added: i64 = multi.iter().map(|s| i64::from(s.3.unwrap_or(1))).sum();
        let expected = specs.len() as i64 - exec - multi.len() as i64 + added;

        prop_assert_eq!(resource_instance_count(&object, &config), expected);
    }

    #[test]
    fn rendering_is_deterministic(singleton in any::<bool>(), specs in prop::collection::vec(arb_field(), 0..8)) {
        let (object, config) = build_object(singleton, &specs);
        let first = compile_object_to_c(&object, &config).unwrap();
        let second = compile_object_to_c(&object, &config).unwrap();
        prop_assert_eq!(first, second);
    }
}
