//! The orchestrator: collects work items from visited declarations and
//! compiles each into a generated compilation unit.

use wiregen_symbols::{well_known, ClassDecl, Location, Modifier, SemanticModel, SourceUnit, TypeId};
use wiregen_symbols::Declaration;

use crate::diagnostics::Diagnostic;
use crate::emit::Emitter;
use crate::filter::filter_properties;
use crate::strategies::StrategyRegistry;

/// Imports every generated unit carries, before the originating unit's own.
const BASE_USINGS: &[&str] = &["System", "System.IO", "System.Linq"];

/// One candidate captured during the visit pass and consumed by compile.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub type_id: TypeId,
    pub name: String,
    pub generic_params: Vec<String>,
    pub constraints: Option<String>,
    pub namespace: String,
    pub usings: Vec<String>,
    pub location: Location,
}

/// A finished generated compilation unit.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    pub type_name: String,
    /// Suggested file name, e.g. `Packet.g.cs`.
    pub hint_name: String,
    pub source: String,
}

/// The code-generation engine for one compilation pass.
///
/// The host drives it: [`Engine::visit_unit`] (or `visit_class` per node)
/// accumulates work items and precondition diagnostics, then
/// [`Engine::compile`] produces the generated units. State is only mutated
/// on the driver's thread; drivers with concurrent visit callbacks must
/// instantiate one engine per worker.
pub struct Engine {
    strategies: StrategyRegistry,
    work: Vec<WorkItem>,
    diagnostics: Vec<Diagnostic>,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_strategies(StrategyRegistry::with_defaults())
    }

    pub fn with_strategies(strategies: StrategyRegistry) -> Self {
        Self {
            strategies,
            work: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Walk a unit and visit every class declaration with its ancestry.
    pub fn visit_unit(&mut self, unit: &SourceUnit, model: &SemanticModel) {
        self.visit_declarations(&unit.declarations, None, &unit.usings, model);
    }

    fn visit_declarations(
        &mut self,
        declarations: &[Declaration],
        namespace: Option<&str>,
        usings: &[String],
        model: &SemanticModel,
    ) {
        for declaration in declarations {
            match declaration {
                Declaration::Namespace(ns) => {
                    let nested = match namespace {
                        Some(outer) => format!("{outer}.{}", ns.name),
                        None => ns.name.clone(),
                    };
                    self.visit_declarations(&ns.declarations, Some(nested.as_str()), usings, model);
                }
                Declaration::Class(decl) => self.visit_class(decl, namespace, usings, model),
                Declaration::Enum(_) => {}
            }
        }
    }

    /// The per-declaration visit callback.
    ///
    /// Creates a work item when the declaration is a serializable partial
    /// class inside a namespace; records a `SerializationMarking` diagnostic
    /// (and drops the whole candidate) when the partial modifier is missing.
    pub fn visit_class(
        &mut self,
        decl: &ClassDecl,
        namespace: Option<&str>,
        usings: &[String],
        model: &SemanticModel,
    ) {
        if !decl.is_class() {
            return;
        }
        let Some(type_id) = model.resolve_declared(namespace.unwrap_or(""), decl) else {
            return;
        };
        if !model.is_marked_serializable(type_id) {
            return;
        }
        if !decl.has_modifier(Modifier::Partial) {
            // One actionable error, no partial output for this candidate.
            self.diagnostics.push(Diagnostic::serialization_marking(
                &decl.name,
                decl.location.clone(),
            ));
            return;
        }
        let Some(namespace) = namespace else {
            return;
        };

        tracing::debug!(type_name = %decl.name, namespace, "collected candidate");
        self.work.push(WorkItem {
            type_id,
            name: decl.name.clone(),
            generic_params: decl.generic_params.clone(),
            constraints: decl.constraints.clone(),
            namespace: namespace.to_string(),
            usings: usings.to_vec(),
            location: decl.location.clone(),
        });
    }

    /// Compile every collected work item. Work items are consumed;
    /// diagnostics keep accumulating across calls.
    pub fn compile(&mut self, model: &SemanticModel) -> Vec<GeneratedUnit> {
        let work = std::mem::take(&mut self.work);
        work.iter()
            .map(|item| self.compile_item(item, model))
            .collect()
    }

    fn compile_item(&mut self, item: &WorkItem, model: &SemanticModel) -> GeneratedUnit {
        let sym = model.type_(item.type_id);
        let should_override = sym
            .base
            .map(|b| model.is_marked_serializable(b))
            .unwrap_or(false);
        let plans = filter_properties(model, item.type_id);
        tracing::debug!(
            type_name = %item.name,
            properties = plans.len(),
            should_override,
            "emitting unit"
        );

        let mut em = Emitter::new(model, &self.strategies, &mut self.diagnostics);

        for using in merged_usings(&item.usings) {
            em.out.line(&format!("using {using};"));
        }
        em.out.blank();
        em.out.begin(&format!("namespace {}", item.namespace));

        let generics = if item.generic_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", item.generic_params.join(", "))
        };
        let constraints = item
            .constraints
            .as_deref()
            .map(|c| format!(" {c}"))
            .unwrap_or_default();
        em.out
            .begin(&format!("partial class {}{generics}{constraints}", item.name));

        if !sym.has_parameterless_ctor() {
            em.out.begin(&format!("public {}()", item.name));
            em.out.end();
        }
        if !model.has_ctor(item.type_id, &[well_known::BINARY_READER]) {
            em.out
                .begin(&format!("public {}(System.IO.BinaryReader reader)", item.name));
            em.out.line("Unpack(reader);");
            em.out.end();
        }

        let marker = if should_override { "new " } else { "" };
        if !sym.has_own_method("Pack") {
            em.out
                .begin(&format!("public {marker}void Pack(System.IO.BinaryWriter writer)"));
            for plan in plans.iter().filter(|p| !p.skip_write) {
                em.emit_pack(
                    &plan.property,
                    plan.property.ty,
                    &plan.property.name,
                    &plan.property.location,
                    false,
                );
            }
            em.out.end();
        }
        if !sym.has_own_method("Unpack") {
            em.out.begin(&format!(
                "public {marker}void Unpack(System.IO.BinaryReader reader)"
            ));
            for plan in plans.iter().filter(|p| !p.skip_read) {
                em.emit_unpack(
                    &plan.property,
                    plan.property.ty,
                    &plan.property.name,
                    &plan.property.location,
                    false,
                );
            }
            em.out.end();
        }

        em.out.end();
        em.out.end();

        let hint_name = if item.generic_params.is_empty() {
            format!("{}.g.cs", item.name)
        } else {
            format!("{}_{}.g.cs", item.name, item.generic_params.len())
        };
        GeneratedUnit {
            type_name: item.name.clone(),
            hint_name,
            source: em.finish(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// The base using set followed by the originating unit's usings, first
/// occurrence wins.
fn merged_usings(extra: &[String]) -> Vec<String> {
    let mut out: Vec<String> = BASE_USINGS.iter().map(|s| s.to_string()).collect();
    for using in extra {
        if !out.iter().any(|u| u == using) {
            out.push(using.clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "engine/engine_tests.rs"]
mod engine_tests;
