//! resolver type rendering
//!
//! one `export namespace <Type>Resolvers` block per object type, wrapped in
//! an import header and a closing `IResolvers` interface.

use crate::associations::{InputTypeCatalog, TypeAssociations};
use crate::defaults::synthesize_defaults;
use crate::error::{Error, Result};
use crate::introspect::{SourceIntrospector, TypeScriptIntrospector};
use crate::model::{resolve_model_name, ModelMap, EMPTY_SHAPE};
use crate::schema::{Field, SchemaType};
use crate::typemap::map_field_type;
use std::collections::BTreeSet;

const INDENT: &str = "  ";

/// inputs of a generation run
#[derive(Debug, Clone, Copy)]
pub struct GenerateArgs<'a> {
    /// schema types, in definition order
    pub types: &'a [SchemaType],
    /// graphql type name to backing model
    pub model_map: &'a ModelMap,
    /// module specifier the `Context` type is imported from
    pub context_path: &'a str,
}

/// render resolver declarations with the typescript introspector
pub fn generate(args: &GenerateArgs<'_>) -> Result<String> {
    generate_with(args, &TypeScriptIntrospector)
}

/// render resolver declarations, reading models through `introspector`
pub fn generate_with(
    args: &GenerateArgs<'_>,
    introspector: &dyn SourceIntrospector,
) -> Result<String> {
    let associations = TypeAssociations::build(args.types);
    let inputs = InputTypeCatalog::build(args.types);

    let mut out = render_header(args);
    for ty in args.types.iter().filter(|ty| ty.is_object()) {
        tracing::debug!(object = %ty.name, fields = ty.fields.len(), "rendering namespace");
        out.push('\n');
        out.push_str(&render_namespace(
            ty,
            &associations,
            &inputs,
            args.model_map,
            introspector,
        )?);
    }
    out.push('\n');
    out.push_str(&render_resolvers_interface(args.types));
    Ok(out)
}

fn render_header(args: &GenerateArgs<'_>) -> String {
    let mut out = String::new();
    out.push_str("/* DO NOT EDIT! */\n");
    out.push_str("import { GraphQLResolveInfo } from 'graphql'\n");
    out.push_str(&format!("import {{ Context }} from '{}'\n", args.context_path));

    let mut seen = BTreeSet::new();
    for model in args.model_map.values() {
        let key = (
            model.model_type_name.as_str(),
            model.import_path_relative_to_output.as_str(),
        );
        if seen.insert(key) {
            out.push_str(&format!(
                "import {{ {} }} from '{}'\n",
                model.model_type_name, model.import_path_relative_to_output
            ));
        }
    }
    out
}

/// render the resolver namespace of one object type
pub fn render_namespace(
    ty: &SchemaType,
    associations: &TypeAssociations,
    inputs: &InputTypeCatalog<'_>,
    model_map: &ModelMap,
    introspector: &dyn SourceIntrospector,
) -> Result<String> {
    let mut sections = vec![synthesize_defaults(ty, model_map, introspector)?];

    if let Some(input_name) = associations.get(&ty.name) {
        let input = inputs.get(input_name).ok_or_else(|| Error::UnknownInputType {
            object: ty.name.clone(),
            input: input_name.to_string(),
        })?;
        sections.push(render_input_interface(input, model_map));
    }

    for field in ty.fields.iter().filter(|field| field.has_arguments()) {
        sections.push(render_args_interface(field, model_map));
    }

    let parent = resolve_model_name(&ty.name, model_map);
    if !ty.fields.is_empty() {
        let mut aliases = String::new();
        for field in &ty.fields {
            aliases.push_str(&format!(
                "export type {}Resolver = {}\n",
                capitalize(&field.name),
                resolver_signature(field, parent, model_map)
            ));
        }
        sections.push(aliases);
    }

    let mut type_interface = String::from("export interface Type {\n");
    for field in &ty.fields {
        type_interface.push_str(&format!(
            "{INDENT}{}: {}\n",
            field.name,
            resolver_signature(field, parent, model_map)
        ));
    }
    type_interface.push_str("}\n");
    sections.push(type_interface);

    let body = sections
        .iter()
        .map(|section| indent(section))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!("export namespace {}Resolvers {{\n{}}}\n", ty.name, body))
}

fn render_input_interface(input: &SchemaType, model_map: &ModelMap) -> String {
    let mut out = format!("export interface {} {{\n", input.name);
    for field in &input.fields {
        out.push_str(&format!(
            "{INDENT}{}: {}\n",
            field.name,
            map_field_type(&field.shape, model_map)
        ));
    }
    out.push_str("}\n");
    out
}

fn render_args_interface(field: &Field, model_map: &ModelMap) -> String {
    let mut out = format!("export interface {} {{\n", args_interface_name(field));
    for arg in &field.arguments {
        out.push_str(&format!(
            "{INDENT}{}: {}\n",
            arg.name,
            map_field_type(&arg.shape, model_map)
        ));
    }
    out.push_str("}\n");
    out
}

fn render_resolvers_interface(types: &[SchemaType]) -> String {
    let mut out = String::from("export interface IResolvers {\n");
    for ty in types.iter().filter(|ty| ty.is_object()) {
        out.push_str(&format!("{INDENT}{0}: {0}Resolvers.Type\n", ty.name));
    }
    out.push_str("}\n");
    out
}

/// `(parent, args, ctx, info) => T | Promise<T>` for a field
fn resolver_signature(field: &Field, parent: &str, model_map: &ModelMap) -> String {
    let args = if field.has_arguments() {
        args_interface_name(field)
    } else {
        EMPTY_SHAPE.to_string()
    };
    let result = map_field_type(&field.shape, model_map);
    format!(
        "(parent: {parent}, args: {args}, ctx: Context, info: GraphQLResolveInfo) => {result} | Promise<{result}>"
    )
}

fn args_interface_name(field: &Field) -> String {
    format!("Args{}", capitalize(&field.name))
}

/// upper-case the first character only
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn indent(block: &str) -> String {
    let mut out = String::new();
    for line in block.lines() {
        if !line.is_empty() {
            out.push_str(INDENT);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::{Declaration, DeclarationKind, Member, MemberKind};
    use crate::model::Model;
    use crate::schema::{TypeKind, TypeShape};
    use std::path::Path;

    /// serves fixed declarations for any source text
    struct Fixed(Vec<Declaration>);

    impl SourceIntrospector for Fixed {
        fn declarations(&self, _path: &Path, _source: &str) -> Result<Vec<Declaration>> {
            Ok(self.0.clone())
        }
    }

    fn scalar(name: &str) -> TypeShape {
        TypeShape::new(name, TypeKind::Scalar)
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("friends"), "Friends");
        assert_eq!(capitalize("createdAt"), "CreatedAt");
        assert_eq!(capitalize("ID"), "ID");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_indent_keeps_blank_lines_bare() {
        assert_eq!(indent("a {\n\n  b\n}\n"), "  a {\n\n    b\n  }\n");
    }

    #[test]
    fn test_query_namespace_without_model() {
        let query = SchemaType::new("Query", TypeKind::Object)
            .with_field(Field::new("hello", scalar("String").required()));
        let out = render_namespace(
            &query,
            &TypeAssociations::default(),
            &InputTypeCatalog::default(),
            &ModelMap::new(),
            &Fixed(vec![]),
        )
        .unwrap();

        assert_eq!(
            out,
            "export namespace QueryResolvers {\n\
             \x20 export const defaultResolvers = {}\n\
             \n\
             \x20 export type HelloResolver = (parent: {}, args: {}, ctx: Context, info: GraphQLResolveInfo) => string | Promise<string>\n\
             \n\
             \x20 export interface Type {\n\
             \x20   hello: (parent: {}, args: {}, ctx: Context, info: GraphQLResolveInfo) => string | Promise<string>\n\
             \x20 }\n\
             }\n"
        );
    }

    #[test]
    fn test_args_interface_only_for_fields_with_arguments() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut models = ModelMap::new();
        models.insert(
            "User".to_string(),
            Model::new("UserModel", file.path(), "./models"),
        );
        let user = SchemaType::new("User", TypeKind::Object)
            .with_field(Field::new("id", scalar("ID").required()))
            .with_field(
                Field::new("friends", TypeShape::new("User", TypeKind::Object).list())
                    .with_argument("limit", scalar("Int").required()),
            );

        let introspector = Fixed(vec![Declaration {
            name: "UserModel".to_string(),
            kind: DeclarationKind::Interface,
            members: vec![Member {
                name: "id".to_string(),
                kind: MemberKind::Property,
            }],
        }]);

        let out = render_namespace(
            &user,
            &TypeAssociations::default(),
            &InputTypeCatalog::default(),
            &models,
            &introspector,
        )
        .unwrap();

        assert!(out.contains("  export interface ArgsFriends {\n    limit: number\n  }\n"));
        assert!(!out.contains("ArgsId"));
        assert!(out.contains(
            "export type IdResolver = (parent: UserModel, args: {}, ctx: Context, info: GraphQLResolveInfo) => string | Promise<string>"
        ));
        assert!(out.contains(
            "friends: (parent: UserModel, args: ArgsFriends, ctx: Context, info: GraphQLResolveInfo) => UserModel[] | null | Promise<UserModel[] | null>"
        ));
        assert!(out.contains("id: parent => parent.id,"));
    }

    #[test]
    fn test_associated_input_interface() {
        let types = vec![
            SchemaType::new("Query", TypeKind::Object).with_field(
                Field::new("users", TypeShape::new("User", TypeKind::Object).list().required())
                    .with_argument("filter", TypeShape::new("UserFilter", TypeKind::Input)),
            ),
            SchemaType::new("UserFilter", TypeKind::Input)
                .with_field(Field::new("name", scalar("String")))
                .with_field(Field::new("minAge", scalar("Int").required())),
        ];
        let associations = TypeAssociations::build(&types);
        let inputs = InputTypeCatalog::build(&types);

        let out = render_namespace(
            &types[0],
            &associations,
            &inputs,
            &ModelMap::new(),
            &Fixed(vec![]),
        )
        .unwrap();

        let input_at = out
            .find("export interface UserFilter {\n    name: string | null\n    minAge: number\n  }")
            .unwrap();
        let args_at = out.find("export interface ArgsUsers {").unwrap();
        assert!(input_at < args_at);
        assert!(out.contains("    filter: UserFilter | null\n"));
    }

    #[test]
    fn test_unknown_associated_input_is_error() {
        let types = vec![SchemaType::new("Query", TypeKind::Object).with_field(
            Field::new("users", scalar("String"))
                .with_argument("filter", TypeShape::new("Missing", TypeKind::Input)),
        )];
        let associations = TypeAssociations::build(&types);
        let err = render_namespace(
            &types[0],
            &associations,
            &InputTypeCatalog::build(&types),
            &ModelMap::new(),
            &Fixed(vec![]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownInputType { .. }));
    }

    #[test]
    fn test_generate_only_object_namespaces() {
        let types = vec![
            SchemaType::new("Query", TypeKind::Object)
                .with_field(Field::new("role", TypeShape::new("Role", TypeKind::Enum))),
            SchemaType::new("Role", TypeKind::Enum),
            SchemaType::new("DateTime", TypeKind::Scalar),
            SchemaType::new("Mutation", TypeKind::Object)
                .with_field(Field::new("ping", scalar("Boolean").required())),
        ];
        let models = ModelMap::new();
        let out = generate_with(
            &GenerateArgs {
                types: &types,
                model_map: &models,
                context_path: "./context",
            },
            &Fixed(vec![]),
        )
        .unwrap();

        assert!(out.starts_with(
            "/* DO NOT EDIT! */\nimport { GraphQLResolveInfo } from 'graphql'\nimport { Context } from './context'\n"
        ));
        assert!(out.contains("export namespace QueryResolvers {"));
        assert!(out.contains("export namespace MutationResolvers {"));
        assert!(!out.contains("RoleResolvers"));
        assert!(!out.contains("DateTimeResolvers"));
        assert!(out.ends_with(
            "export interface IResolvers {\n  Query: QueryResolvers.Type\n  Mutation: MutationResolvers.Type\n}\n"
        ));
        assert!(out.find("QueryResolvers {").unwrap() < out.find("MutationResolvers {").unwrap());
    }

    #[test]
    fn test_header_imports_distinct_models() {
        let mut models = ModelMap::new();
        models.insert("Post".to_string(), Model::new("PostModel", "/m/post.ts", "./models/post"));
        models.insert("User".to_string(), Model::new("UserModel", "/m/user.ts", "./models/user"));
        models.insert("Viewer".to_string(), Model::new("UserModel", "/m/user.ts", "./models/user"));
        let types: Vec<SchemaType> = Vec::new();

        let header = render_header(&GenerateArgs {
            types: &types,
            model_map: &models,
            context_path: "../context",
        });
        assert_eq!(
            header,
            "/* DO NOT EDIT! */\n\
             import { GraphQLResolveInfo } from 'graphql'\n\
             import { Context } from '../context'\n\
             import { PostModel } from './models/post'\n\
             import { UserModel } from './models/user'\n"
        );
    }
}
