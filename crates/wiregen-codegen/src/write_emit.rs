//! The write emitter: recursive strategy dispatch for pack code.
//!
//! Dispatch order per slot: nullable wrapper, registered strategy, primitive,
//! enum, sequence/composite, array. Reference-typed slots not already inside
//! a guard are wrapped in a presence tag plus conditional block; value types
//! are written bare.

use wiregen_symbols::{well_known, Location, PropertySymbol, TypeId, TypeKind};

use crate::diagnostics::Diagnostic;
use crate::emit::Emitter;
use crate::naming::local_prefix;
use crate::strategies::StrategySite;
use crate::writer::Scope;

impl Emitter<'_> {
    /// Emit pack statements for one slot.
    ///
    /// `ty` is the type currently being emitted for, which differs from the
    /// property's declared type when recursing into wrappers and elements.
    /// `expr` is the readable expression for the value; `guarded` is set
    /// when an enclosing nullable or presence conditional already guards
    /// this slot.
    pub fn emit_pack(
        &mut self,
        property: &PropertySymbol,
        ty: TypeId,
        expr: &str,
        location: &Location,
        guarded: bool,
    ) {
        let model = self.model;

        // Nullable wrapper: a has-value tag, then the inner value.
        if let Some(inner) = model.nullable_inner(ty) {
            self.out.line(&format!("writer.Write({expr}.HasValue);"));
            let mut scope = Scope::new();
            self.out
                .open_scoped(&mut scope, &format!("if ({expr}.HasValue)"));
            self.emit_pack(property, inner, &format!("{expr}.Value"), location, true);
            self.out.close_scope(scope);
            return;
        }

        let sym = model.type_(ty);
        let key = model.qualified_name(ty);

        // Registered strategy.
        if let Some(strategy) = self.strategies.get(&key) {
            let pack = strategy.pack;
            let mut scope = Scope::new();
            if sym.is_reference && !guarded {
                self.write_presence_tag(&mut scope, expr);
            }
            let prefix = local_prefix(expr);
            pack(
                self,
                &StrategySite {
                    property,
                    ty,
                    expr,
                    prefix: &prefix,
                    location,
                },
            );
            self.out.close_scope(scope);
            return;
        }

        // Primitive: width-specific write. Reference-typed primitives first
        // guard against default content, which has no wire form on a
        // non-nullable slot.
        if model.is_primitive(ty) {
            if key == well_known::OBJECT {
                self.flag(Diagnostic::missing_packing_method(
                    &property.name,
                    &key,
                    location.clone(),
                ));
                return;
            }
            if sym.is_reference {
                let display = model.display_name(ty);
                self.out.begin(&format!("if ({expr} == default({display}))"));
                self.out.line(&format!(
                    "throw new System.InvalidOperationException(\"{expr} is null; declare the property as nullable to serialize absent values\");"
                ));
                self.out.end();
                let mut scope = Scope::new();
                if !guarded {
                    self.write_presence_tag(&mut scope, expr);
                }
                self.out.line(&format!("writer.Write({expr});"));
                self.out.close_scope(scope);
            } else {
                self.out.line(&format!("writer.Write({expr});"));
            }
            return;
        }

        // Enum: 32-bit signed integer after cast.
        if sym.kind == TypeKind::Enum {
            self.out.line(&format!("writer.Write((int){expr});"));
            return;
        }

        // Array: length prefix, then elements; byte and char arrays go out
        // as one buffered write.
        if sym.kind == TypeKind::Array {
            let element = sym.element.expect("array type has an element");
            let mut scope = Scope::new();
            if !guarded {
                self.write_presence_tag(&mut scope, expr);
            }
            self.out.line(&format!("writer.Write({expr}.Length);"));
            let element_key = model.qualified_name(element);
            if element_key == "System.Byte" || element_key == "System.Char" {
                self.out.line(&format!("writer.Write({expr});"));
            } else {
                let idx = format!("{}Idx", local_prefix(expr));
                self.out.begin(&format!(
                    "for (int {idx} = 0; {idx} < {expr}.Length; {idx}++)"
                ));
                self.emit_pack(property, element, &format!("{expr}[{idx}]"), location, false);
                self.out.end();
            }
            self.out.close_scope(scope);
            return;
        }

        // Classes, structs, interfaces, type parameters.
        let mut scope = Scope::new();
        if sym.is_reference && !guarded {
            self.write_presence_tag(&mut scope, expr);
        }
        if let Some(element) = model.enumerable_element(ty) {
            let prefix = local_prefix(expr);
            let count = self.count_accessor(ty);
            self.out.line(&format!("writer.Write({expr}.{count});"));
            let entry = format!("{prefix}Entry");
            self.out
                .begin(&format!("foreach (var {entry} in {expr})"));
            self.emit_pack(property, element, &entry, location, false);
            self.out.end();
        } else if sym.kind == TypeKind::Interface {
            self.flag(Diagnostic::interface_properties(
                &property.name,
                &model.display_name(ty),
                location.clone(),
            ));
        } else if model.has_method(ty, "Pack", Some(&[well_known::BINARY_WRITER]))
            || model.is_marked_serializable(ty)
        {
            self.out.line(&format!("{expr}.Pack(writer);"));
        } else {
            self.flag(Diagnostic::missing_packing_method(
                &property.name,
                &model.display_name(ty),
                location.clone(),
            ));
        }
        self.out.close_scope(scope);
    }
}
