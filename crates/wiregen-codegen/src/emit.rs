//! Shared emission state for the write and read emitters.

use wiregen_symbols::{MemberSymbol, SemanticModel, TypeId};

use crate::diagnostics::Diagnostic;
use crate::strategies::StrategyRegistry;
use crate::writer::{CodeWriter, Scope};

/// Emission context for one compilation unit: the semantic model, the
/// strategy registry, the output buffer, and the diagnostics sink.
pub struct Emitter<'a> {
    pub model: &'a SemanticModel,
    pub(crate) strategies: &'a StrategyRegistry,
    pub out: CodeWriter,
    pub(crate) diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> Emitter<'a> {
    pub fn new(
        model: &'a SemanticModel,
        strategies: &'a StrategyRegistry,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            model,
            strategies,
            out: CodeWriter::new(),
            diagnostics,
        }
    }

    pub fn finish(self) -> String {
        self.out.finish()
    }

    /// Record a diagnostic and emit its throwing statement at the current
    /// site, so the problem surfaces again if the branch is ever executed.
    pub(crate) fn flag(&mut self, diagnostic: Diagnostic) {
        self.out.line(&diagnostic.throw_statement());
        tracing::warn!(id = diagnostic.id.as_str(), "recorded diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Pack side: write the presence tag for a reference-typed slot and open
    /// the guarded block on `scope`.
    pub(crate) fn write_presence_tag(&mut self, scope: &mut Scope, expr: &str) {
        self.out.line(&format!("writer.Write({expr} != null);"));
        self.out.open_scoped(scope, &format!("if ({expr} != null)"));
    }

    /// Unpack side: read the presence tag and open the guarded block; the
    /// slot keeps its default when the tag is false.
    pub(crate) fn read_presence_tag(&mut self, scope: &mut Scope) {
        self.out.open_scoped(scope, "if (reader.ReadBoolean())");
    }

    /// Pick the count accessor for a sequence: scan enumerated members in
    /// order, later recognized accessors overriding earlier picks; with no
    /// member match the Linq `Count()` extension is used (hence the
    /// `System.Linq` base using).
    pub(crate) fn count_accessor(&self, ty: TypeId) -> &'static str {
        let mut pick = "Count()";
        for member in self.model.enumerate_members(ty) {
            match member {
                MemberSymbol::Property(p) if p.name == "Count" => pick = "Count",
                MemberSymbol::Property(p) if p.name == "Length" => pick = "Length",
                MemberSymbol::Method(m) if m.name == "Count" && m.params.is_empty() => {
                    pick = "Count()"
                }
                _ => {}
            }
        }
        pick
    }

    /// Render `new T[len]`, folding array element types into jagged-array
    /// syntax (`new System.Int32[len][]` rather than `new System.Int32[][len]`).
    pub(crate) fn new_array_expr(&self, element: TypeId, len: &str) -> String {
        let mut base = element;
        let mut suffix = String::new();
        while let Some(inner) = self.model.type_(base).element {
            suffix.push_str("[]");
            base = inner;
        }
        format!("new {}[{}]{}", self.model.display_name(base), len, suffix)
    }
}

/// Width-specific reader method for a primitive, by qualified name. `object`
/// is absent: it has no width and is rejected during dispatch.
pub(crate) fn primitive_reader(qualified: &str) -> Option<&'static str> {
    Some(match qualified {
        "System.Boolean" => "ReadBoolean",
        "System.Byte" => "ReadByte",
        "System.SByte" => "ReadSByte",
        "System.Int16" => "ReadInt16",
        "System.UInt16" => "ReadUInt16",
        "System.Int32" => "ReadInt32",
        "System.UInt32" => "ReadUInt32",
        "System.Int64" => "ReadInt64",
        "System.UInt64" => "ReadUInt64",
        "System.Single" => "ReadSingle",
        "System.Double" => "ReadDouble",
        "System.Char" => "ReadChar",
        "System.String" => "ReadString",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn primitive_reader___maps_predefined_names_to_widths() {
        assert_eq!(primitive_reader("System.Int32"), Some("ReadInt32"));
        assert_eq!(primitive_reader("System.String"), Some("ReadString"));
        assert_eq!(primitive_reader("System.Boolean"), Some("ReadBoolean"));
        assert_eq!(primitive_reader("System.Object"), None);
    }
}
