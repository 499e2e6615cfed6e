//! typescript model introspection
//!
//! model sources are parsed with swc; only the top-level `interface`, `class`,
//! and object-literal `type` declarations are listed, with their direct members.
//! nothing is type-checked or resolved.

use crate::error::{Error, Result};
use std::path::Path;
use swc_common::{FileName, SourceMap};
use swc_ecma_ast::{
    Class, ClassMember, Decl, DefaultDecl, ExportDecl, Expr, Lit, Module, ModuleDecl, ModuleItem,
    PropName, Stmt, TsInterfaceDecl, TsType, TsTypeAliasDecl, TsTypeElement,
};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// kind of a top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Interface,
    TypeAlias,
    Class,
}

/// kind of a declaration member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// plain property signature or field
    Property,
    /// method, accessor, constructor, index or call signature
    Other,
}

/// direct member of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// member name; empty for index, call, and construct signatures
    pub name: String,
    pub kind: MemberKind,
}

impl Member {
    fn property(name: String) -> Self {
        Self {
            name,
            kind: MemberKind::Property,
        }
    }

    fn other(name: String) -> Self {
        Self {
            name,
            kind: MemberKind::Other,
        }
    }

    pub fn is_property(&self) -> bool {
        self.kind == MemberKind::Property
    }
}

/// named top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// direct members in source order; empty for non-literal type aliases
    pub members: Vec<Member>,
}

impl Declaration {
    /// direct property members, in source order
    pub fn properties(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|member| member.is_property())
    }
}

/// parses model sources into named declarations
pub trait SourceIntrospector {
    /// top-level declarations of `source`, in source order
    ///
    /// `path` names the file the source was read from; it picks the dialect
    /// and is reported in parse errors.
    fn declarations(&self, path: &Path, source: &str) -> Result<Vec<Declaration>>;
}

/// first top-level declaration named `name`
pub fn find_declaration<'a>(
    declarations: &'a [Declaration],
    name: &str,
) -> Option<&'a Declaration> {
    declarations.iter().find(|decl| decl.name == name)
}

/// default introspector for typescript model files
///
/// `.tsx` files are parsed with jsx enabled, `.d.ts` files as declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptIntrospector;

impl SourceIntrospector for TypeScriptIntrospector {
    fn declarations(&self, path: &Path, source: &str) -> Result<Vec<Declaration>> {
        let module = parse_module(path, source)?;
        Ok(module.body.iter().filter_map(top_level).collect())
    }
}

fn parse_module(path: &Path, source: &str) -> Result<Module> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let syntax = Syntax::Typescript(TsSyntax {
        tsx: file_name.ends_with(".tsx"),
        decorators: true,
        dts: file_name.ends_with(".d.ts"),
        ..Default::default()
    });

    let cm: SourceMap = Default::default();
    let fm = cm.new_source_file(FileName::Real(path.to_path_buf()).into(), source.to_string());
    let mut parser = Parser::new(syntax, StringInput::from(&*fm), None);

    parser.parse_module().map_err(|err| Error::ModelParse {
        path: path.to_path_buf(),
        message: err.kind().msg().into_owned(),
    })
}

fn top_level(item: &ModuleItem) -> Option<Declaration> {
    match item {
        ModuleItem::Stmt(Stmt::Decl(decl))
        | ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl { decl, .. })) => {
            declaration(decl)
        }
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => match &export.decl {
            DefaultDecl::Class(class) => class
                .ident
                .as_ref()
                .map(|ident| class_declaration(ident.sym.to_string(), &class.class)),
            DefaultDecl::TsInterfaceDecl(interface) => Some(interface_declaration(interface)),
            _ => None,
        },
        _ => None,
    }
}

fn declaration(decl: &Decl) -> Option<Declaration> {
    match decl {
        Decl::TsInterface(interface) => Some(interface_declaration(interface)),
        Decl::TsTypeAlias(alias) => Some(alias_declaration(alias)),
        Decl::Class(class) => Some(class_declaration(class.ident.sym.to_string(), &class.class)),
        _ => None,
    }
}

fn interface_declaration(interface: &TsInterfaceDecl) -> Declaration {
    Declaration {
        name: interface.id.sym.to_string(),
        kind: DeclarationKind::Interface,
        members: interface.body.body.iter().map(type_element).collect(),
    }
}

fn alias_declaration(alias: &TsTypeAliasDecl) -> Declaration {
    let members = match &*alias.type_ann {
        TsType::TsTypeLit(literal) => literal.members.iter().map(type_element).collect(),
        _ => Vec::new(),
    };
    Declaration {
        name: alias.id.sym.to_string(),
        kind: DeclarationKind::TypeAlias,
        members,
    }
}

fn class_declaration(name: String, class: &Class) -> Declaration {
    Declaration {
        name,
        kind: DeclarationKind::Class,
        members: class.body.iter().filter_map(class_member).collect(),
    }
}

fn type_element(element: &TsTypeElement) -> Member {
    match element {
        TsTypeElement::TsPropertySignature(prop) if !prop.computed => match key_name(&prop.key) {
            Some(name) => Member::property(name),
            None => Member::other(String::new()),
        },
        TsTypeElement::TsPropertySignature(_) => Member::other(String::new()),
        TsTypeElement::TsMethodSignature(method) => {
            Member::other(key_name(&method.key).unwrap_or_default())
        }
        TsTypeElement::TsGetterSignature(getter) => {
            Member::other(key_name(&getter.key).unwrap_or_default())
        }
        TsTypeElement::TsSetterSignature(setter) => {
            Member::other(key_name(&setter.key).unwrap_or_default())
        }
        _ => Member::other(String::new()),
    }
}

fn class_member(member: &ClassMember) -> Option<Member> {
    let member = match member {
        ClassMember::ClassProp(prop) => match prop_name(&prop.key) {
            Some(name) => Member::property(name),
            None => Member::other(String::new()),
        },
        ClassMember::Constructor(_) => Member::other("constructor".to_string()),
        ClassMember::Method(method) => Member::other(prop_name(&method.key).unwrap_or_default()),
        ClassMember::Empty(_) | ClassMember::StaticBlock(_) => return None,
        _ => Member::other(String::new()),
    };
    Some(member)
}

/// static name of a signature key; `None` for computed keys
fn key_name(key: &Expr) -> Option<String> {
    match key {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string_lossy().into_owned()),
        Expr::Lit(Lit::Num(n)) => Some(n.value.to_string()),
        _ => None,
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string_lossy().into_owned()),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}
