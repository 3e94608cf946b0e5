//! Syntax nodes for the declaration subset the generator consumes.
//!
//! These are the nodes a host front end hands to the engine, one candidate
//! declaration at a time. They carry only what generation needs: names,
//! modifiers, attribute lists, member shapes, and locations.

use crate::location::Location;

/// One parsed source file: `using` directives plus top-level declarations.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Source file name (diagnostics only).
    pub file: String,
    /// Dotted names from `using` directives, in source order.
    pub usings: Vec<String>,
    pub declarations: Vec<Declaration>,
}

/// A top-level or namespace-scoped declaration.
#[derive(Debug, Clone)]
pub enum Declaration {
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
}

/// `namespace A.B { ... }`
#[derive(Debug, Clone)]
pub struct NamespaceDecl {
    pub name: String,
    pub declarations: Vec<Declaration>,
    pub location: Location,
}

/// Declaration modifiers the generator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Internal,
    Protected,
    Private,
    Partial,
    Static,
    Abstract,
    Readonly,
}

impl Modifier {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Modifier::Public),
            "internal" => Some(Modifier::Internal),
            "protected" => Some(Modifier::Protected),
            "private" => Some(Modifier::Private),
            "partial" => Some(Modifier::Partial),
            "static" => Some(Modifier::Static),
            "abstract" => Some(Modifier::Abstract),
            "readonly" => Some(Modifier::Readonly),
            _ => None,
        }
    }
}

/// An attribute use, e.g. `[Ignore(Read)]`.
///
/// Arguments are kept as raw text; the engine only inspects them for the
/// read/write sub-flags of *Ignore*.
#[derive(Debug, Clone)]
pub struct AttributeSyntax {
    pub name: String,
    pub arguments: Option<String>,
    pub location: Location,
}

/// A type reference as written in source, e.g. `List<int?>[]`.
#[derive(Debug, Clone)]
pub struct TypeSyntax {
    /// Dotted base name without generic arguments.
    pub name: String,
    pub args: Vec<TypeSyntax>,
    /// `T?`
    pub nullable: bool,
    /// Array suffix count: 1 for `T[]`, 2 for `T[][]`. Applied after
    /// `nullable`, so `int?[]` is an array of nullables.
    pub array_dims: u8,
    pub location: Location,
}

impl TypeSyntax {
    pub fn named(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            nullable: false,
            array_dims: 0,
            location,
        }
    }
}

/// A `class`, `struct`, or `interface` declaration.
///
/// The three share a shape; [`ClassDecl::kind_word`] records which keyword
/// introduced the declaration.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    /// `"class"`, `"struct"`, or `"interface"`.
    pub kind_word: String,
    pub attributes: Vec<AttributeSyntax>,
    pub modifiers: Vec<Modifier>,
    pub name: String,
    /// Generic parameter names, e.g. `["TKey", "TValue"]`.
    pub generic_params: Vec<String>,
    /// Base types and interfaces, in source order.
    pub base_types: Vec<TypeSyntax>,
    /// Raw `where ...` constraint clauses, verbatim, echoed into output.
    pub constraints: Option<String>,
    pub members: Vec<MemberSyntax>,
    pub location: Location,
}

impl ClassDecl {
    pub fn is_class(&self) -> bool {
        self.kind_word == "class"
    }

    pub fn has_modifier(&self, m: Modifier) -> bool {
        self.modifiers.contains(&m)
    }
}

/// An `enum` declaration. Variant values are irrelevant to the wire format
/// (enums are always packed as their int32 value), so only names are kept.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub attributes: Vec<AttributeSyntax>,
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub variants: Vec<String>,
    pub location: Location,
}

/// A member of a class-like declaration.
#[derive(Debug, Clone)]
pub enum MemberSyntax {
    Property(PropertySyntax),
    Method(MethodSyntax),
    Ctor(CtorSyntax),
}

/// A property, indexer, or field-style shorthand declaration.
///
/// `int X;` is recorded as a read-write property, so shorthand fragments and
/// full declarations both flow through the same node.
#[derive(Debug, Clone)]
pub struct PropertySyntax {
    pub attributes: Vec<AttributeSyntax>,
    pub modifiers: Vec<Modifier>,
    pub ty: TypeSyntax,
    pub name: String,
    pub has_getter: bool,
    pub has_setter: bool,
    pub is_indexer: bool,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct ParamSyntax {
    pub ty: TypeSyntax,
    pub name: String,
}

/// A method signature; bodies are skipped by the front end.
#[derive(Debug, Clone)]
pub struct MethodSyntax {
    pub modifiers: Vec<Modifier>,
    pub return_ty: Option<TypeSyntax>,
    pub name: String,
    pub params: Vec<ParamSyntax>,
    pub location: Location,
}

/// A constructor signature.
#[derive(Debug, Clone)]
pub struct CtorSyntax {
    pub modifiers: Vec<Modifier>,
    pub params: Vec<ParamSyntax>,
    pub location: Location,
}
