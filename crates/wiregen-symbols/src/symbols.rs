//! The symbol model: the semantic view of types and members.
//!
//! Symbols live in the [`SemanticModel`](crate::SemanticModel) arena and
//! reference each other by [`TypeId`], so mutually recursive user types are
//! representable without interior mutability.

use crate::location::Location;

/// Index of a type symbol in the semantic model's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    /// One of the writer-native primitive types, including the
    /// reference-typed `string` and the object-shaped catch-all.
    Primitive,
    /// A generic type parameter, e.g. the `T` of `List<T>`.
    TypeParameter,
    Array,
}

/// Member accessibility as declared in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    Private,
}

/// An attribute attached to a type or member, recognized by simple name.
#[derive(Debug, Clone)]
pub struct AttributeSymbol {
    pub name: String,
    pub arguments: Option<String>,
    pub location: Location,
}

impl AttributeSymbol {
    /// Compare by the attribute class's short name, accepting both the bare
    /// spelling and the `...Attribute` suffix form. Two unrelated attributes
    /// sharing a short name collide; that is accepted for compatibility with
    /// user types declared in separate assemblies.
    pub fn matches(&self, simple_name: &str) -> bool {
        let name = self.name.rsplit('.').next().unwrap_or(&self.name);
        let trimmed = name.strip_suffix("Attribute").unwrap_or(name);
        trimmed == simple_name
    }
}

#[derive(Debug, Clone)]
pub struct PropertySymbol {
    pub name: String,
    pub ty: TypeId,
    pub accessibility: Accessibility,
    pub has_getter: bool,
    pub has_setter: bool,
    pub is_indexer: bool,
    pub is_static: bool,
    pub attributes: Vec<AttributeSymbol>,
    pub location: Location,
}

impl PropertySymbol {
    pub fn has_attribute(&self, simple_name: &str) -> bool {
        self.attributes.iter().any(|a| a.matches(simple_name))
    }

    pub fn attribute(&self, simple_name: &str) -> Option<&AttributeSymbol> {
        self.attributes.iter().find(|a| a.matches(simple_name))
    }
}

#[derive(Debug, Clone)]
pub struct MethodSymbol {
    pub name: String,
    pub params: Vec<TypeId>,
    pub is_static: bool,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct ConstructorSymbol {
    pub params: Vec<TypeId>,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub enum MemberSymbol {
    Property(PropertySymbol),
    Method(MethodSymbol),
    Constructor(ConstructorSymbol),
}

impl MemberSymbol {
    /// The member's name for name-only de-duplication. Constructors have no
    /// usable name and are never aggregated from bases.
    pub fn name(&self) -> Option<&str> {
        match self {
            MemberSymbol::Property(p) => Some(&p.name),
            MemberSymbol::Method(m) => Some(&m.name),
            MemberSymbol::Constructor(_) => None,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            MemberSymbol::Property(p) => p.is_static,
            MemberSymbol::Method(m) => m.is_static,
            MemberSymbol::Constructor(_) => false,
        }
    }
}

/// A type in the semantic model.
///
/// Generic definitions carry their parameter symbols in `type_params`;
/// instantiated types additionally carry `type_args` and point back at their
/// `definition`.
#[derive(Debug, Clone)]
pub struct TypeSymbol {
    /// Simple name without arity or generic arguments.
    pub name: String,
    /// Dotted containing namespace; empty for type parameters.
    pub namespace: String,
    pub kind: TypeKind,
    /// Generic parameter symbols of the definition (kind `TypeParameter`).
    pub type_params: Vec<TypeId>,
    /// Concrete arguments; empty on open definitions.
    pub type_args: Vec<TypeId>,
    /// The open definition this instantiation was produced from.
    pub definition: Option<TypeId>,
    pub base: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub members: Vec<MemberSymbol>,
    pub attributes: Vec<AttributeSymbol>,
    /// Element type for `Array` kind.
    pub element: Option<TypeId>,
    /// Whether values of this type are reference-shaped on the wire (classes,
    /// interfaces, arrays, `string`, `object`) as opposed to value-shaped
    /// (structs, enums, numeric primitives).
    pub is_reference: bool,
    pub location: Location,
}

impl TypeSymbol {
    /// A bare shell for building symbols field by field.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind,
            type_params: Vec::new(),
            type_args: Vec::new(),
            definition: None,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            attributes: Vec::new(),
            element: None,
            is_reference: matches!(kind, TypeKind::Class | TypeKind::Interface | TypeKind::Array),
            location: Location::none(),
        }
    }

    /// Generic arity of the definition.
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    pub fn has_attribute(&self, simple_name: &str) -> bool {
        self.attributes.iter().any(|a| a.matches(simple_name))
    }

    /// Own (non-inherited) properties, in declaration order.
    pub fn own_properties(&self) -> impl Iterator<Item = &PropertySymbol> {
        self.members.iter().filter_map(|m| match m {
            MemberSymbol::Property(p) => Some(p),
            _ => None,
        })
    }

    /// Whether the type declares its own instance method with this name.
    pub fn has_own_method(&self, name: &str) -> bool {
        self.members.iter().any(|m| match m {
            MemberSymbol::Method(method) => !method.is_static && method.name == name,
            _ => false,
        })
    }

    /// Whether a parameterless constructor is declared.
    pub fn has_parameterless_ctor(&self) -> bool {
        self.members.iter().any(|m| match m {
            MemberSymbol::Constructor(c) => c.params.is_empty(),
            _ => false,
        })
    }
}
