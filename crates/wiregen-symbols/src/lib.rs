//! wiregen-symbols - Syntax nodes and the symbol model for wiregen
//!
//! This crate provides the data the code generator operates on:
//! - [`SourceUnit`] and friends: the syntax nodes a host front end produces
//! - [`TypeSymbol`] / [`MemberSymbol`]: the semantic view of a type
//! - [`SemanticModel`]: the type universe, seeded with the built-in
//!   framework types and extended by binding user declarations
//! - [`Location`]: source positions carried through to diagnostics

mod location;
mod semantic;
mod symbols;
mod syntax;

pub use location::Location;
pub use semantic::{BindError, SemanticModel, TypeScope};
pub use symbols::{
    Accessibility, AttributeSymbol, ConstructorSymbol, MemberSymbol, MethodSymbol, PropertySymbol,
    TypeId, TypeKind, TypeSymbol,
};
pub use syntax::{
    AttributeSyntax, ClassDecl, CtorSyntax, Declaration, EnumDecl, MemberSyntax, MethodSyntax,
    Modifier, NamespaceDecl, ParamSyntax, PropertySyntax, SourceUnit, TypeSyntax,
};

/// Qualified names of well-known framework types, as used for strategy
/// registry keys and dispatch decisions.
pub mod well_known {
    pub const OBJECT: &str = "System.Object";
    pub const STRING: &str = "System.String";
    pub const NULLABLE: &str = "System.Nullable`1";
    pub const DATE_TIME: &str = "System.DateTime";
    pub const TIME_SPAN: &str = "System.TimeSpan";
    pub const KEY_VALUE_PAIR: &str = "System.Collections.Generic.KeyValuePair`2";
    pub const ENUMERABLE: &str = "System.Collections.Generic.IEnumerable`1";
    pub const BINARY_WRITER: &str = "System.IO.BinaryWriter";
    pub const BINARY_READER: &str = "System.IO.BinaryReader";

    /// `System.Tuple` with the given arity, e.g. ``System.Tuple`3``.
    pub fn tuple(arity: usize) -> String {
        format!("System.Tuple`{arity}")
    }
}
