//! graphql resolver type generator
//!
//! this crate turns a graphql schema and a map of typescript model types into
//! resolver type declarations: one `<Type>Resolvers` namespace per object type
//! with argument interfaces, resolver function types, passthrough default
//! resolvers for every model property, and an `IResolvers` aggregate.
//!
//! ## quick start
//!
//! ```no_run
//! use resolvergen::{generate, GenerateArgs, GeneratorConfig, Schema};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::new("src/generated/resolvers.ts", "../context")
//!     .with_schema("schema.graphql")
//!     .with_model("User", "src/models.ts:UserModel");
//! config.validate()?;
//!
//! let schema = Schema::from_sdl(&config.schema_source()?)?;
//! let models = config.model_map()?;
//! let code = generate(&GenerateArgs {
//!     types: &schema.types,
//!     model_map: &models,
//!     context_path: &config.context,
//! })?;
//! println!("{code}");
//! # Ok(())
//! # }
//! ```
//!
//! ## command line
//!
//! the `resolvergen` binary wraps the same steps and writes the output file,
//! formatted with prettier when it is available.

mod associations;
mod config;
mod defaults;
mod error;
mod format;
mod introspect;
mod model;
mod render;
mod schema;
mod typemap;

pub use associations::{InputTypeCatalog, TypeAssociations};
pub use config::GeneratorConfig;
pub use defaults::synthesize_defaults;
pub use error::{Error, Result};
pub use format::{format, FormatError, Prettier, SourceFormatter, Unformatted};
pub use introspect::{
    find_declaration, Declaration, DeclarationKind, Member, MemberKind, SourceIntrospector,
    TypeScriptIntrospector,
};
pub use model::{resolve_model_name, Model, ModelMap, EMPTY_SHAPE};
pub use render::{generate, generate_with, render_namespace, GenerateArgs};
pub use schema::{Field, Schema, SchemaType, TypeKind, TypeShape, BUILTIN_SCALARS};
pub use typemap::{map_field_type, scalar_type, TsScalar};
