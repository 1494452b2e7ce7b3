use crate::{
    config::{Cardinality, InstanceConfig},
    error::StubError,
    layout::{
        field_kind, init_macro, needs_instance_count, needs_max_constant, storage_type,
        InitMacro, ResourceInstanceBudget,
    },
    names::{self, MAX_INSTANCE_COUNT, RESOURCE_INSTANCE_COUNT},
    types::ObjectDefinition,
};

/// Text fragments produced by one stage.
pub type Fragments = Result<Vec<String>, StubError>;

/// Everything a stage may read.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub object: &'a ObjectDefinition,
    pub config: &'a InstanceConfig,
}

impl<'a> RenderContext<'a> {
    pub fn new(object: &'a ObjectDefinition, config: &'a InstanceConfig) -> Self {
        RenderContext { object, config }
    }
}

pub type Stage = fn(&RenderContext<'_>) -> Fragments;

/// The stages in output order.
pub static STAGES: [(&str, Stage); 8] = [
    ("file head",               file_head),
    ("resource defines",        resource_defines),
    ("resource instance count", resource_instance_count),
    ("data struct",             data_struct),
    ("field table",             field_table),
    ("exec callbacks",          exec_callbacks),
    ("create function",         create_function),
    ("init function",           init_function),
];

/// Runs the stages one after the other as the iterator is consumed.
/// Each call starts over, so the same context always yields the same text.
pub fn render_fragments<'a>(ctx: &'a RenderContext<'a>) -> impl Iterator<Item = Fragments> + 'a {
    STAGES.iter().map(move |(name, stage)| {
        log::debug!("rendering {}", name);
        stage(ctx)
    })
}

/// Renders the whole C unit. Nothing is returned unless every stage succeeds.
pub fn compile_object_to_c(object: &ObjectDefinition, config: &InstanceConfig) -> Result<String, StubError> {
    let ctx = RenderContext::new(object, config);
    let mut code = String::new();
    for fragments in render_fragments(&ctx) {
        code.extend(fragments?);
    }
    Ok(code)
}

/// Override-or-default block for an instance count constant.
fn config_default(symbol: &str, config_symbol: &str, count: Cardinality) -> Vec<String> {
    let mut out = vec![
        format!("#ifdef {}\n", config_symbol),
        format!("#define {} {}\n", symbol, config_symbol),
        "#else\n".to_string(),
    ];
    if !count.configured {
        out.push(
            "// FIXME: This default value is generated. Please evaluate if it is sane and remove this comment.\n"
                .to_string(),
        );
    }
    out.push(format!("#define {} {}\n", symbol, count.value));
    out.push("#endif\n\n".to_string());
    out
}

/// Array suffix for per-instance storage of a multi-instance object.
fn instance_suffix(obj: &ObjectDefinition) -> String {
    if needs_instance_count(obj) {
        format!("[{}]", MAX_INSTANCE_COUNT)
    } else {
        String::new()
    }
}

pub fn file_head(ctx: &RenderContext<'_>) -> Fragments {
    let obj = ctx.object;
    Ok(vec![
        "/*\n".to_string(),
        format!(" * Generated stub for LwM2M object {} ({})\n", obj.id, obj.name),
        match &obj.version {
            Some(version) => format!(" * {} version {}\n", obj.urn, version),
            None => format!(" * {}\n", obj.urn),
        },
        " *\n".to_string(),
        " * SPDX-License-Identifier: Apache-2.0\n".to_string(),
        " */\n\n".to_string(),
        format!("#define LOG_MODULE_NAME {}\n", names::log_module(obj)),
        "#define LOG_LEVEL CONFIG_LWM2M_LOG_LEVEL\n\n".to_string(),
        "#include <logging/log.h>\n".to_string(),
        "LOG_MODULE_REGISTER(LOG_MODULE_NAME);\n\n".to_string(),
        "#include <string.h>\n".to_string(),
        "#include <stdio.h>\n".to_string(),
        "#include <init.h>\n\n".to_string(),
        "#include \"lwm2m_object.h\"\n".to_string(),
        "#include \"lwm2m_engine.h\"\n\n".to_string(),
    ])
}

pub fn resource_defines(ctx: &RenderContext<'_>) -> Fragments {
    let obj = ctx.object;
    let mut out = vec![
        "// FIXME: This should probably be defined elsewhere\n".to_string(),
        format!("#define {} {}\n\n", names::obj_id_def(obj), obj.id),
        format!("/* {} resource IDs */\n", obj.name),
    ];

    for res in &obj.fields {
        out.push(format!("#define {} {}\n", names::res_id(obj, res), res.id));
    }
    out.push(format!("#define {} {}\n\n", names::max_id(obj), obj.fields.len()));

    if needs_instance_count(obj) {
        out.extend(config_default(
            MAX_INSTANCE_COUNT,
            &names::instance_count_config(obj),
            ctx.config.object_instance_count(),
        ));
    }

    for res in obj.fields.iter().filter(|f| needs_max_constant(f)) {
        out.extend(config_default(
            &names::res_max(obj, res),
            &names::res_max_config(obj, res),
            ctx.config.resource_instance_max(res.id),
        ));
    }

    Ok(out)
}

pub fn resource_instance_count(ctx: &RenderContext<'_>) -> Fragments {
    let obj = ctx.object;
    let budget = ResourceInstanceBudget::new(obj, ctx.config);
    let max_id = names::max_id(obj);

    let mut out = vec![
        "/*\n".to_string(),
        " * Calculate resource instances as follows:\n".to_string(),
        format!(" * start with {}\n", max_id),
        format!(" * subtract EXEC resources ({})\n", budget.exec_count),
        format!(
            " * subtract MULTI resources because their counts include 0 resource ({})\n",
            budget.multi.len()
        ),
    ];
    for (res, _) in &budget.multi {
        out.push(format!(" * add {}\n", names::res_max(obj, res)));
    }
    out.push(" */\n".to_string());

    out.push(format!(
        "#define {} ({} - {} - {}",
        RESOURCE_INSTANCE_COUNT,
        max_id,
        budget.exec_count,
        budget.multi.len()
    ));
    for (res, _) in &budget.multi {
        out.push(format!(
            " \\\n                                 + {}",
            names::res_max(obj, res)
        ));
    }
    out.push(")\n\n".to_string());

    Ok(out)
}

pub fn data_struct(ctx: &RenderContext<'_>) -> Fragments {
    let obj = ctx.object;
    let mut out = vec![format!("{} {{\n", names::data_type(obj))];

    for res in &obj.fields {
        if let Some(storage) = storage_type(res)? {
            out.push(format!("\t{};\n", storage.declaration(&names::member(res))));
        }
    }
    out.push("};\n\n".to_string());

    out.push(format!(
        "static {} {}{};\n\n",
        names::data_type(obj),
        names::data_var(obj),
        instance_suffix(obj)
    ));

    Ok(out)
}

pub fn field_table(ctx: &RenderContext<'_>) -> Fragments {
    let obj = ctx.object;
    let max_inst = instance_suffix(obj);

    let mut out = vec![
        format!("static struct lwm2m_engine_obj {};\n", names::obj_var(obj)),
        "static struct lwm2m_engine_obj_field fields[] = {\n".to_string(),
    ];

    let entries = obj
        .fields
        .iter()
        .map(|res| -> Result<String, StubError> {
            let kind = field_kind(res)?;
            Ok(format!("\t{}", kind.descriptor(&names::res_id(obj, res))))
        })
        .collect::<Result<Vec<_>, _>>()?;
    out.push(entries.join(",\n"));
    if !entries.is_empty() {
        out.push("\n".to_string());
    }
    out.push("};\n\n".to_string());

    out.push(format!("static struct lwm2m_engine_obj_inst inst{};\n", max_inst));
    out.push(format!(
        "static struct lwm2m_engine_res res{}[{}];\n",
        max_inst,
        names::max_id(obj)
    ));
    out.push(format!(
        "static struct lwm2m_engine_res_inst res_inst{}[{}];\n\n",
        max_inst, RESOURCE_INSTANCE_COUNT
    ));

    Ok(out)
}

pub fn exec_callbacks(ctx: &RenderContext<'_>) -> Fragments {
    let obj = ctx.object;
    let mut out = Vec::new();

    for res in obj.exec_fields().filter(|f| f.mandatory) {
        out.push(format!("static int {}(uint16_t obj_inst_id)\n", names::exec_cb(obj, res)));
        out.push("{\n".to_string());
        out.push("\t/* FIXME: Add exec callback implementation here */\n".to_string());
        out.push("\treturn 0;\n".to_string());
        out.push("}\n\n".to_string());
    }

    Ok(out)
}

/// Slot scan of a multi-instance object's create callback.
const CHECK_AVAIL: &str = "\t/* Check that there is no other instance with this ID */
	for (index = 0; index < ARRAY_SIZE(inst); index++) {
		if (inst[index].obj && inst[index].obj_inst_id == obj_inst_id) {
			LOG_ERR(\"Can not create instance - \"
				\"already existing: %u\", obj_inst_id);
			return NULL;
		}

		/* Save first available slot index */
		if (avail < 0 && !inst[index].obj) {
			avail = index;
		}
	}

	if (avail < 0) {
		LOG_ERR(\"Can not create instance - no more room: %u\",
			obj_inst_id);
		return NULL;
	}

";

pub fn create_function(ctx: &RenderContext<'_>) -> Fragments {
    let obj = ctx.object;
    let data_var = names::data_var(obj);

    let mut out = vec![
        format!(
            "static struct lwm2m_engine_obj_inst *{}(uint16_t obj_inst_id)\n",
            names::create_fn(obj)
        ),
        "{\n".to_string(),
        "\tint i = 0;\n".to_string(),
        "\tint j = 0;\n".to_string(),
    ];

    let data: String;
    let res: &str;
    let res_inst: &str;
    let inst: &str;
    if needs_instance_count(obj) {
        out.push("\tint index;\n".to_string());
        out.push("\tint avail = -1;\n".to_string());
        out.push(format!("\t{} *instance;\n\n", names::data_type(obj)));
        out.push(CHECK_AVAIL.to_string());
        out.push("\t/* Set default values */\n".to_string());
        out.push(format!("\tinstance = &{}[avail];\n", data_var));
        out.push(format!("\t(void)memset(instance, 0, sizeof({}[avail]));\n", data_var));

        data = "instance->".to_string();
        res = "res[avail]";
        res_inst = "res_inst[avail]";
        inst = "inst[avail]";
    } else {
        out.push("\n\t/* Set default values */\n".to_string());
        out.push(format!("\t(void)memset(&{0}, 0, sizeof({0}));\n", data_var));

        data = format!("{}.", data_var);
        res = "res";
        res_inst = "res_inst";
        inst = "inst";
    }

    out.push(format!("\t(void)memset({}, 0,\n", res));
    out.push(format!("\t             sizeof({0}[0]) * ARRAY_SIZE({0}));\n\n", res));
    out.push(format!("\tinit_res_instance({0}, ARRAY_SIZE({0}));\n\n", res_inst));
    out.push("\t/* initialize instance resource data */\n".to_string());

    for field in &obj.fields {
        let id = names::res_id(obj, field);
        let init = init_macro(field);

        if init == InitMacro::Execute {
            let cb = if field.mandatory {
                names::exec_cb(obj, field)
            } else {
                "NULL".to_string()
            };
            out.push(format!("\t{}({}, {}, i,\n", init.name(), id, res));
            out.push(format!("\t{} {});\n", " ".repeat(init.name().len()), cb));
            continue;
        }

        let spaces = " ".repeat(init.name().len());
        out.push(format!("\t{}({},\n", init.name(), id));
        out.push(format!("\t{} {}, i, {}, j", spaces, res, res_inst));

        if init.is_multi() {
            out.push(",\n".to_string());
            out.push(format!("\t{} {}, false", spaces, names::res_max(obj, field)));
        }

        if init.has_data() {
            let member = format!("{}{}", data, names::member(field));
            out.push(",\n".to_string());
            out.push(format!("\t{} &{},\n", spaces, member));
            out.push(format!("\t{} sizeof({})", spaces, member));
        }

        out.push(");\n".to_string());
    }

    out.push(format!("\n\t{}.resources = {};\n", inst, res));
    out.push(format!("\t{}.resource_count = i;\n", inst));
    out.push(format!("\n\tLOG_DBG(\"Create {} instance: %d\", obj_inst_id);\n\n", obj.name));
    out.push(format!("\treturn &{};\n", inst));
    out.push("}\n\n".to_string());

    Ok(out)
}

pub fn init_function(ctx: &RenderContext<'_>) -> Fragments {
    let obj = ctx.object;
    let var = names::obj_var(obj);
    let auto_create = !needs_instance_count(obj);

    let mut out = vec![
        format!("static int {}(const struct device *dev)\n", names::init_fn(obj)),
        "{\n".to_string(),
    ];

    if auto_create {
        out.push("\tstruct lwm2m_engine_obj_inst *obj_inst;\n".to_string());
        out.push("\tint ret;\n\n".to_string());
    }

    out.push(format!("\t{}.obj_id = {};\n", var, names::obj_id_def(obj)));
    out.push(format!("\t{}.fields = fields;\n", var));
    out.push(format!("\t{}.field_count = ARRAY_SIZE(fields);\n", var));
    if auto_create {
        out.push(format!("\t{}.max_instance_count = 1;\n", var));
    } else {
        out.push(format!("\t{}.max_instance_count = {};\n", var, MAX_INSTANCE_COUNT));
    }
    out.push(format!("\t{}.create_cb = {};\n", var, names::create_fn(obj)));
    out.push(format!("\tlwm2m_register_obj(&{});\n\n", var));

    if auto_create {
        out.push("\t/* auto create the only instance */\n".to_string());
        out.push("\tobj_inst = NULL;\n".to_string());
        out.push(format!(
            "\tret = lwm2m_create_obj_inst({}, 0, &obj_inst);\n",
            names::obj_id_def(obj)
        ));
        out.push("\tif (ret < 0) {\n".to_string());
        out.push("\t\tLOG_DBG(\"Create LWM2M instance 0 error: %d\", ret);\n".to_string());
        out.push("\t}\n\n".to_string());
        out.push("\treturn ret;\n".to_string());
    } else {
        out.push("\treturn 0;\n".to_string());
    }
    out.push("}\n\n".to_string());

    out.push(format!(
        "SYS_INIT({}, APPLICATION, CONFIG_KERNEL_INIT_PRIORITY_DEFAULT);\n",
        names::init_fn(obj)
    ));

    Ok(out)
}
