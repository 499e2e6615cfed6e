//! graphql to typescript type mapping

use crate::model::{resolve_model_name, ModelMap};
use crate::schema::{TypeKind, TypeShape};
use std::fmt;

/// typescript primitive a graphql scalar maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsScalar {
    Number,
    Boolean,
    String,
}

impl fmt::Display for TsScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TsScalar::Number => "number",
            TsScalar::Boolean => "boolean",
            TsScalar::String => "string",
        };
        f.write_str(name)
    }
}

/// map a graphql scalar name to a typescript primitive
///
/// `String`, `ID`, and every custom scalar fall through to `string`.
pub fn scalar_type(name: &str) -> TsScalar {
    match name {
        "Int" | "Float" => TsScalar::Number,
        "Boolean" => TsScalar::Boolean,
        _ => TsScalar::String,
    }
}

/// typescript type expression for a field or argument shape
///
/// lists render as `T[]`, nullable positions as `T | null`, applied in that
/// order so a nullable list is `T[] | null`.
pub fn map_field_type(shape: &TypeShape, model_map: &ModelMap) -> String {
    let mut out = match shape.kind {
        TypeKind::Scalar => scalar_type(&shape.name).to_string(),
        TypeKind::Input => shape.name.clone(),
        TypeKind::Object | TypeKind::Enum | TypeKind::Union | TypeKind::Interface => {
            resolve_model_name(&shape.name, model_map).to_string()
        }
    };
    if shape.is_array {
        out.push_str("[]");
    }
    if !shape.is_required {
        out.push_str(" | null");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    fn models() -> ModelMap {
        let mut models = ModelMap::new();
        models.insert(
            "User".to_string(),
            Model::new("UserModel", "/src/models.ts", "./models"),
        );
        models
    }

    #[test]
    fn test_builtin_scalars() {
        assert_eq!(scalar_type("Int"), TsScalar::Number);
        assert_eq!(scalar_type("Float"), TsScalar::Number);
        assert_eq!(scalar_type("Boolean"), TsScalar::Boolean);
        assert_eq!(scalar_type("String"), TsScalar::String);
        assert_eq!(scalar_type("ID"), TsScalar::String);
    }

    #[test]
    fn test_custom_scalars_become_string() {
        for name in ["DateTime", "JSON", "Upload", "BigInt", ""] {
            let shape = TypeShape::new(name, TypeKind::Scalar).required();
            let first = map_field_type(&shape, &ModelMap::new());
            let second = map_field_type(&shape, &ModelMap::new());
            assert_eq!(first, "string");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_required_and_nullable_scalars() {
        let id = TypeShape::new("ID", TypeKind::Scalar).required();
        assert_eq!(map_field_type(&id, &models()), "string");

        let name = TypeShape::new("String", TypeKind::Scalar);
        assert_eq!(map_field_type(&name, &models()), "string | null");
    }

    #[test]
    fn test_array_suffix_before_nullable_suffix() {
        let friends = TypeShape::new("User", TypeKind::Object).list();
        assert_eq!(map_field_type(&friends, &models()), "UserModel[] | null");

        let tags = TypeShape::new("String", TypeKind::Scalar).list().required();
        assert_eq!(map_field_type(&tags, &models()), "string[]");

        let counts = TypeShape::new("Int", TypeKind::Scalar).list();
        let rendered = map_field_type(&counts, &models());
        assert!(rendered.ends_with("[] | null"));
        assert!(!rendered.contains("| null)[]"));
    }

    #[test]
    fn test_input_types_pass_through() {
        let filter = TypeShape::new("UserFilter", TypeKind::Input);
        assert_eq!(map_field_type(&filter, &models()), "UserFilter | null");

        let filters = TypeShape::new("UserFilter", TypeKind::Input).list().required();
        assert_eq!(map_field_type(&filters, &models()), "UserFilter[]");
    }

    #[test]
    fn test_unmapped_types_use_empty_shape() {
        let post = TypeShape::new("Post", TypeKind::Object).required();
        assert_eq!(map_field_type(&post, &models()), "{}");

        let role = TypeShape::new("Role", TypeKind::Enum);
        assert_eq!(map_field_type(&role, &models()), "{} | null");

        let result = TypeShape::new("SearchResult", TypeKind::Union).list().required();
        assert_eq!(map_field_type(&result, &models()), "{}[]");
    }
}
