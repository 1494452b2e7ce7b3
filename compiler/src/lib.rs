//! lwm2m-stubgen-compiler
//!
//! This crate implements:
//!  1) Normalization of an LwM2M object definition document into an
//!     `ObjectDefinition` (`parser`),
//!  2) An object verifier (duplicate resource ids, colliding identifiers, untyped data),
//!  3) The layout compiler mapping resources onto C storage and engine descriptors,
//!  4) Code generation (`compile_object_to_c` → `String`) for the Zephyr LwM2M engine,
//!  5) Error types (`StubError`, `SchemaError`) and the instance count configuration.

pub mod error;
pub mod types;
pub mod utils;
pub mod names;
pub mod config;
pub mod parser;
pub mod verifier;
pub mod layout;
pub mod compiler;
pub mod gen_c;

pub use compiler::compile_schema;
pub use compiler::load_object;
pub use config::InstanceConfig;
pub use gen_c::compile_object_to_c;
pub use names::output_file_name;
