//! default resolver synthesis
//!
//! every property a model declares gets a passthrough resolver, so only
//! computed fields need hand-written resolvers.

use crate::error::{Error, Result};
use crate::introspect::{find_declaration, SourceIntrospector};
use crate::model::ModelMap;
use crate::schema::SchemaType;
use std::fs;

/// render the `defaultResolvers` constant for a type
///
/// types without a model get an empty map. a model whose declaration is
/// missing from its source file is a fatal configuration error.
pub fn synthesize_defaults(
    ty: &SchemaType,
    model_map: &ModelMap,
    introspector: &dyn SourceIntrospector,
) -> Result<String> {
    let Some(model) = model_map.get(&ty.name) else {
        return Ok("export const defaultResolvers = {}\n".to_string());
    };

    let path = &model.absolute_file_path;
    let source = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
    let declarations = introspector.declarations(path, &source)?;

    let declaration = find_declaration(&declarations, &model.model_type_name).ok_or_else(|| {
        Error::ModelNotFound {
            type_name: model.model_type_name.clone(),
            path: path.clone(),
        }
    })?;

    tracing::debug!(
        model = %model.model_type_name,
        members = declaration.members.len(),
        "synthesizing default resolvers"
    );

    let mut out = String::new();
    out.push_str("export const defaultResolvers = {\n");
    for property in declaration.properties() {
        out.push_str("  ");
        out.push_str(&render_passthrough(&property.name));
        out.push('\n');
    }
    out.push_str("}\n");
    Ok(out)
}

/// `name: parent => parent.name,` with bracket access for non-identifier names
fn render_passthrough(name: &str) -> String {
    if is_identifier(name) {
        format!("{name}: parent => parent.{name},")
    } else {
        let quoted = serde_json::Value::from(name).to_string();
        format!("{quoted}: parent => parent[{quoted}],")
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
        }
        _ => false,
    }
}
