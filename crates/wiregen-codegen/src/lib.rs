//! wiregen-codegen - The code-generation engine
//!
//! A pure function from *(visited candidate declarations, semantic model)* to
//! *(generated compilation units, diagnostics)*:
//! - [`Engine`] orchestrates the per-candidate pipeline
//! - [`CodeWriter`] / [`Scope`] keep emitted blocks balanced on every path
//! - [`StrategyRegistry`] maps well-known composites to pack/unpack emitters
//! - [`filter_properties`] selects the members that participate
//! - [`Diagnostic`] reports every shape the engine cannot serialize, and is
//!   also compiled into a throwing statement at its site

mod diagnostics;
mod emit;
mod engine;
mod filter;
mod naming;
mod read_emit;
mod strategies;
mod write_emit;
mod writer;

pub use diagnostics::{Diagnostic, DiagnosticId, Severity};
pub use emit::Emitter;
pub use engine::{Engine, GeneratedUnit, WorkItem};
pub use filter::{filter_properties, PropertyPlan};
pub use naming::local_prefix;
pub use strategies::{Strategy, StrategyFn, StrategyRegistry, StrategySite};
pub use writer::{CodeWriter, Scope};
