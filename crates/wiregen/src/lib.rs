//! # wiregen
//!
//! Build-time code generator for a typed request/response event framework.
//! Given user types marked serializable, it emits a sibling partial class
//! with paired binary `Pack(BinaryWriter)` / `Unpack(BinaryReader)` methods,
//! and precise located diagnostics for every shape it cannot serialize.
//!
//! ## Quick Start
//!
//! ```
//! use wiregen::prelude::*;
//!
//! let source = r#"
//!     namespace Demo {
//!         [Serializable]
//!         partial class Ping {
//!             int Seq;
//!             string Note;
//!         }
//!     }
//! "#;
//!
//! let unit = parse_source("ping.cs", source).unwrap();
//! let mut model = SemanticModel::new();
//! model.bind_unit(&unit).unwrap();
//!
//! let mut engine = Engine::new();
//! engine.visit_unit(&unit, &model);
//! let generated = engine.compile(&model);
//!
//! assert_eq!(generated.len(), 1);
//! assert!(generated[0].source.contains("writer.Write(Seq);"));
//! assert!(engine.diagnostics().is_empty());
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`wiregen_symbols`] - Syntax nodes, the symbol model, and the semantic
//!   type universe
//! - [`wiregen_codegen`] - The engine: emitters, strategies, diagnostics
//! - [`wiregen_parser`] - The declaration front end

pub use wiregen_codegen::{
    filter_properties, CodeWriter, Diagnostic, DiagnosticId, Emitter, Engine, GeneratedUnit,
    PropertyPlan, Scope, Severity, Strategy, StrategyRegistry, StrategySite, WorkItem,
};
pub use wiregen_parser::{parse_source, ParseError};
pub use wiregen_symbols::{
    well_known, Accessibility, AttributeSymbol, BindError, ClassDecl, Declaration, Location,
    MemberSymbol, MethodSymbol, PropertySymbol, SemanticModel, SourceUnit, TypeId, TypeKind,
    TypeSymbol,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        parse_source, Diagnostic, DiagnosticId, Engine, GeneratedUnit, SemanticModel, Severity,
        StrategyRegistry,
    };
}
