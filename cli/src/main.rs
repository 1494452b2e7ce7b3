use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use lwm2m_stubgen::{generate_from_path, model_to_json, InstanceConfig, SchemaError, StubError};

#[derive(Parser)]
#[command(name = "lwm2m-stubgen")]
#[command(about = "Generate a Zephyr LwM2M object stub from an OMA object definition XML file", long_about = None)]
#[command(after_help = "Example: lwm2m-stubgen 3.xml")]
struct Cli {
    /// Object definition XML file, e.g. `3.xml`
    input: Option<PathBuf>,

    /// Directory for `lwm2m_obj_<name>_stub.c` (defaults to the current directory)
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Fallback for MAX_INSTANCE_COUNT of a multi-instance object
    #[arg(long, value_name = "COUNT")]
    instances: Option<u32>,

    /// Fallback for a multi-instance resource's <OBJ>_<RES>_MAX, as `<resource id>=<count>`
    #[arg(long = "resource-instances", value_name = "ID=COUNT")]
    resource_instances: Vec<String>,

    /// Print the generated source instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Print the parsed object definition as JSON and exit
    #[arg(long)]
    dump_model: bool,
}

impl Cli {
    fn instance_config(&self) -> Result<InstanceConfig, SchemaError> {
        let mut config = InstanceConfig {
            object_instances: self.instances,
            ..Default::default()
        };
        for arg in &self.resource_instances {
            let (id, count) = InstanceConfig::parse_resource_override(arg)?;
            config.resource_instances.insert(id, count);
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = try_main(Cli::parse()) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn try_main(cli: Cli) -> Result<(), StubError> {
    let Some(input) = &cli.input else {
        // Not an error: tell the user what is expected
        println!("No argument given. The path to the XML file describing");
        println!("the LwM2M object in question is expected as argument.\n");
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = cli.instance_config()?;
    log::debug!("instance config: {:?}", config);

    let stub = generate_from_path(input, &config)?;

    if cli.dump_model {
        println!("{}", model_to_json(&stub.object)?);
        return Ok(());
    }

    if cli.stdout {
        print!("{}", stub.source);
    } else {
        let path = stub.write_to(&cli.out_dir)?;
        println!("Generated {} → {}", input.display(), path.display());
    }
    Ok(())
}
