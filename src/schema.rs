//! schema model
//!
//! the normalized graphql type graph the generator works on, plus a loader
//! that builds it from sdl.

use crate::error::{Error, Result};
use graphql_parser::schema::{
    parse_schema, Definition, Field as SdlField, InputValue, Type, TypeDefinition, TypeExtension,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// graphql built-in scalar names
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// kind of a named graphql type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Object,
    Input,
    Scalar,
    Enum,
    Union,
    Interface,
}

/// reference to a named type as it appears on a field or argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeShape {
    /// referenced type name, without list or non-null wrappers
    pub name: String,
    /// kind of the referenced type
    pub kind: TypeKind,
    /// true if wrapped in a list
    pub is_array: bool,
    /// true if the outermost position is non-null
    pub is_required: bool,
}

impl TypeShape {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_array: false,
            is_required: false,
        }
    }

    /// mark the shape as a list
    pub fn list(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// mark the shape as non-null
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn is_scalar(&self) -> bool {
        self.kind == TypeKind::Scalar
    }

    pub fn is_input(&self) -> bool {
        self.kind == TypeKind::Input
    }

    pub fn is_object(&self) -> bool {
        self.kind == TypeKind::Object
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_union(&self) -> bool {
        self.kind == TypeKind::Union
    }
}

/// a field of an object or input type; arguments share the same shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub shape: TypeShape,
    pub arguments: Vec<Field>,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            arguments: Vec::new(),
        }
    }

    /// append an argument
    pub fn with_argument(mut self, name: impl Into<String>, shape: TypeShape) -> Self {
        self.arguments.push(Field::new(name, shape));
        self
    }

    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }
}

/// a named type of the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaType {
    pub name: String,
    pub kind: TypeKind,
    pub fields: Vec<Field>,
}

impl SchemaType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
        }
    }

    /// append a field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn is_object(&self) -> bool {
        self.kind == TypeKind::Object
    }

    pub fn is_input(&self) -> bool {
        self.kind == TypeKind::Input
    }
}

/// ordered list of schema types, in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub types: Vec<SchemaType>,
}

impl Schema {
    pub fn new(types: Vec<SchemaType>) -> Self {
        Self { types }
    }

    /// parse sdl into a schema model
    ///
    /// type references are resolved against the document's own definitions.
    /// names that are neither built-in nor declared are treated as scalars.
    pub fn from_sdl(sdl: &str) -> Result<Self> {
        let document =
            parse_schema::<String>(sdl).map_err(|err| Error::Schema(err.to_string()))?;

        let mut kinds: BTreeMap<String, TypeKind> = BTreeMap::new();
        for def in &document.definitions {
            if let Definition::TypeDefinition(ty) = def {
                let (name, kind) = match ty {
                    TypeDefinition::Scalar(scalar) => (&scalar.name, TypeKind::Scalar),
                    TypeDefinition::Object(obj) => (&obj.name, TypeKind::Object),
                    TypeDefinition::Interface(iface) => (&iface.name, TypeKind::Interface),
                    TypeDefinition::Union(union_ty) => (&union_ty.name, TypeKind::Union),
                    TypeDefinition::Enum(enum_ty) => (&enum_ty.name, TypeKind::Enum),
                    TypeDefinition::InputObject(input) => (&input.name, TypeKind::Input),
                };
                kinds.insert(name.clone(), kind);
            }
        }

        let mut types: Vec<SchemaType> = Vec::new();
        let mut extensions: Vec<(String, Vec<Field>)> = Vec::new();

        for def in &document.definitions {
            match def {
                Definition::TypeDefinition(ty) => types.push(convert_type(ty, &kinds)),
                Definition::TypeExtension(TypeExtension::Object(ext)) => {
                    let fields = ext
                        .fields
                        .iter()
                        .map(|field| convert_field(field, &kinds))
                        .collect();
                    extensions.push((ext.name.clone(), fields));
                }
                _ => {}
            }
        }

        for (name, fields) in extensions {
            match types.iter_mut().find(|ty| ty.name == name) {
                Some(ty) => ty.fields.extend(fields),
                None => {
                    return Err(Error::Schema(format!("cannot extend undefined type {name}")))
                }
            }
        }

        Ok(Self { types })
    }

    /// read and parse an sdl file
    pub fn from_path(path: &Path) -> Result<Self> {
        let sdl = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Self::from_sdl(&sdl)
    }

    /// object types, in definition order
    pub fn object_types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.iter().filter(|ty| ty.is_object())
    }

    /// input types, in definition order
    pub fn input_types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.iter().filter(|ty| ty.is_input())
    }

    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.iter().find(|ty| ty.name == name)
    }
}

fn convert_type(ty: &TypeDefinition<String>, kinds: &BTreeMap<String, TypeKind>) -> SchemaType {
    match ty {
        TypeDefinition::Object(obj) => SchemaType {
            name: obj.name.clone(),
            kind: TypeKind::Object,
            fields: obj.fields.iter().map(|f| convert_field(f, kinds)).collect(),
        },
        TypeDefinition::Interface(iface) => SchemaType {
            name: iface.name.clone(),
            kind: TypeKind::Interface,
            fields: iface.fields.iter().map(|f| convert_field(f, kinds)).collect(),
        },
        TypeDefinition::InputObject(input) => SchemaType {
            name: input.name.clone(),
            kind: TypeKind::Input,
            fields: input
                .fields
                .iter()
                .map(|value| convert_input_value(value, kinds))
                .collect(),
        },
        TypeDefinition::Scalar(scalar) => SchemaType::new(scalar.name.clone(), TypeKind::Scalar),
        TypeDefinition::Enum(enum_ty) => SchemaType::new(enum_ty.name.clone(), TypeKind::Enum),
        TypeDefinition::Union(union_ty) => {
            SchemaType::new(union_ty.name.clone(), TypeKind::Union)
        }
    }
}

fn convert_field(field: &SdlField<String>, kinds: &BTreeMap<String, TypeKind>) -> Field {
    Field {
        name: field.name.clone(),
        shape: shape_of(&field.field_type, kinds),
        arguments: field
            .arguments
            .iter()
            .map(|arg| convert_input_value(arg, kinds))
            .collect(),
    }
}

fn convert_input_value(value: &InputValue<String>, kinds: &BTreeMap<String, TypeKind>) -> Field {
    Field::new(value.name.clone(), shape_of(&value.value_type, kinds))
}

fn shape_of(ty: &Type<String>, kinds: &BTreeMap<String, TypeKind>) -> TypeShape {
    let name = base_type_name(ty);
    let kind = if BUILTIN_SCALARS.contains(&name.as_str()) {
        TypeKind::Scalar
    } else {
        kinds.get(&name).copied().unwrap_or(TypeKind::Scalar)
    };
    TypeShape {
        name,
        kind,
        is_array: is_list(ty),
        is_required: matches!(ty, Type::NonNullType(_)),
    }
}

fn base_type_name(ty: &Type<String>) -> String {
    match ty {
        Type::NamedType(name) => name.clone(),
        Type::NonNullType(inner) => base_type_name(inner),
        Type::ListType(inner) => base_type_name(inner),
    }
}

fn is_list(ty: &Type<String>) -> bool {
    match ty {
        Type::NamedType(_) => false,
        Type::NonNullType(inner) => is_list(inner),
        Type::ListType(_) => true,
    }
}
