//! The read emitter: recursive strategy dispatch for unpack code.
//!
//! Symmetric to the write emitter, with construction responsibility: each
//! slot assigns into `expr`, and sequences are rebuilt through an ordered
//! cascade of insertion recognizers.

use wiregen_symbols::{well_known, Location, PropertySymbol, TypeId, TypeKind};

use crate::diagnostics::Diagnostic;
use crate::emit::{primitive_reader, Emitter};
use crate::naming::local_prefix;
use crate::strategies::{declare_default, StrategySite};
use crate::writer::Scope;

/// How a sequence is rebuilt on read, in recognition order.
enum Insertion {
    /// `Add(T)` on a default-constructed instance.
    AddElement,
    /// `Add(K, V)` fed from a deconstructible element's accessors.
    AddPair(&'static str, &'static str),
    /// Constructor taking `IEnumerable<T>`, fed a local array.
    FromEnumerableCtor,
    /// The declared type is exactly the enumerable interface; assign an array.
    AssignArray,
}

impl Emitter<'_> {
    /// Emit unpack statements for one slot, assigning into `expr`.
    pub fn emit_unpack(
        &mut self,
        property: &PropertySymbol,
        ty: TypeId,
        expr: &str,
        location: &Location,
        guarded: bool,
    ) {
        let model = self.model;

        // Nullable: the slot keeps its default when the tag is false.
        if let Some(inner) = model.nullable_inner(ty) {
            let mut scope = Scope::new();
            self.read_presence_tag(&mut scope);
            self.emit_unpack(property, inner, expr, location, true);
            self.out.close_scope(scope);
            return;
        }

        let sym = model.type_(ty);
        let key = model.qualified_name(ty);

        if let Some(strategy) = self.strategies.get(&key) {
            let unpack = strategy.unpack;
            let mut scope = Scope::new();
            if sym.is_reference && !guarded {
                self.read_presence_tag(&mut scope);
            }
            let prefix = local_prefix(expr);
            unpack(
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

        if model.is_primitive(ty) {
            if key == well_known::OBJECT {
                self.flag(Diagnostic::missing_packing_method(
                    &property.name,
                    &key,
                    location.clone(),
                ));
                return;
            }
            let read = primitive_reader(&key).expect("non-object primitives have a reader");
            if sym.is_reference && !guarded {
                let mut scope = Scope::new();
                self.read_presence_tag(&mut scope);
                self.out.line(&format!("{expr} = reader.{read}();"));
                self.out.close_scope(scope);
            } else {
                self.out.line(&format!("{expr} = reader.{read}();"));
            }
            return;
        }

        if sym.kind == TypeKind::Enum {
            let display = model.display_name(ty);
            self.out
                .line(&format!("{expr} = ({display})reader.ReadInt32();"));
            return;
        }

        if sym.kind == TypeKind::Array {
            let element = sym.element.expect("array type has an element");
            let mut scope = Scope::new();
            if !guarded {
                self.read_presence_tag(&mut scope);
            }
            let prefix = local_prefix(expr);
            let len = format!("{prefix}Length");
            self.out.line(&format!("int {len} = reader.ReadInt32();"));
            let element_key = model.qualified_name(element);
            if element_key == "System.Byte" {
                self.out.line(&format!("{expr} = reader.ReadBytes({len});"));
            } else if element_key == "System.Char" {
                self.out.line(&format!("{expr} = reader.ReadChars({len});"));
            } else {
                let allocation = self.new_array_expr(element, &len);
                self.out.line(&format!("{expr} = {allocation};"));
                let idx = format!("{prefix}Idx");
                self.out
                    .begin(&format!("for (int {idx} = 0; {idx} < {len}; {idx}++)"));
                self.emit_unpack(property, element, &format!("{expr}[{idx}]"), location, false);
                self.out.end();
            }
            self.out.close_scope(scope);
            return;
        }

        // Classes, structs, interfaces, type parameters.
        let mut scope = Scope::new();
        if sym.is_reference && !guarded {
            self.read_presence_tag(&mut scope);
        }
        if let Some(element) = model.enumerable_element(ty) {
            self.emit_sequence_read(property, ty, element, expr, location);
        } else if sym.kind == TypeKind::Interface {
            self.flag(Diagnostic::interface_properties(
                &property.name,
                &model.display_name(ty),
                location.clone(),
            ));
        } else if model.has_method(ty, "Pack", Some(&[well_known::BINARY_WRITER]))
            || model.is_marked_serializable(ty)
        {
            // The generated sibling piece gives serializable types a
            // reader constructor.
            self.out
                .line(&format!("{expr} = new {}(reader);", model.display_name(ty)));
        } else {
            self.flag(Diagnostic::missing_packing_method(
                &property.name,
                &model.display_name(ty),
                location.clone(),
            ));
        }
        self.out.close_scope(scope);
    }

    /// Rebuild a sequence: read the count, then apply the first insertion
    /// recognizer that matches.
    fn emit_sequence_read(
        &mut self,
        property: &PropertySymbol,
        ty: TypeId,
        element: TypeId,
        expr: &str,
        location: &Location,
    ) {
        let model = self.model;
        let Some(insertion) = self.recognize_insertion(ty, element) else {
            self.flag(Diagnostic::enumerable_properties(
                &property.name,
                &model.display_name(ty),
                location.clone(),
            ));
            return;
        };

        let prefix = local_prefix(expr);
        let count = format!("{prefix}Count");
        let idx = format!("{prefix}Idx");
        let temp = format!("{prefix}Temp");
        let transient = format!("{prefix}Transient");
        self.out.line(&format!("int {count} = reader.ReadInt32();"));

        match insertion {
            Insertion::AddElement | Insertion::AddPair(_, _) => {
                let display = model.display_name(ty);
                self.out.line(&format!("{display} {temp} = new {display}();"));
                self.out
                    .begin(&format!("for (int {idx} = 0; {idx} < {count}; {idx}++)"));
                declare_default(self, element, &transient);
                self.emit_unpack(property, element, &transient, location, false);
                match insertion {
                    Insertion::AddPair(first, second) => self.out.line(&format!(
                        "{temp}.Add({transient}.{first}, {transient}.{second});"
                    )),
                    _ => self.out.line(&format!("{temp}.Add({transient});")),
                }
                self.out.end();
                self.out.line(&format!("{expr} = {temp};"));
            }
            Insertion::FromEnumerableCtor | Insertion::AssignArray => {
                let allocation = self.new_array_expr(element, &count);
                self.out.line(&format!(
                    "{}[] {temp} = {allocation};",
                    model.display_name(element)
                ));
                self.out
                    .begin(&format!("for (int {idx} = 0; {idx} < {count}; {idx}++)"));
                self.emit_unpack(
                    property,
                    element,
                    &format!("{temp}[{idx}]"),
                    location,
                    false,
                );
                self.out.end();
                match insertion {
                    Insertion::FromEnumerableCtor => self.out.line(&format!(
                        "{expr} = new {}({temp});",
                        model.display_name(ty)
                    )),
                    _ => self.out.line(&format!("{expr} = {temp};")),
                }
            }
        }
    }

    /// The duck-typed insertion cascade: each recognizer either returns a
    /// plan or passes to the next.
    fn recognize_insertion(&self, ty: TypeId, element: TypeId) -> Option<Insertion> {
        let model = self.model;
        let element_qualified = model.qualified_name(element);
        if model.has_method(ty, "Add", Some(&[element_qualified.as_str()])) {
            return Some(Insertion::AddElement);
        }
        if let Some(accessors) = deconstruction_accessors(&element_qualified) {
            let args = &model.type_(element).type_args;
            if args.len() == 2 {
                let first = model.qualified_name(args[0]);
                let second = model.qualified_name(args[1]);
                if model.has_method(ty, "Add", Some(&[first.as_str(), second.as_str()])) {
                    return Some(Insertion::AddPair(accessors.0, accessors.1));
                }
            }
        }
        if model.has_enumerable_ctor(ty, element) {
            return Some(Insertion::FromEnumerableCtor);
        }
        if model.exact_enumerable_element(ty).is_some() {
            return Some(Insertion::AssignArray);
        }
        None
    }
}

/// Accessor pair for deconstruction element types: key/value pairs and
/// 2-tuples.
fn deconstruction_accessors(qualified: &str) -> Option<(&'static str, &'static str)> {
    if qualified == well_known::KEY_VALUE_PAIR {
        Some(("Key", "Value"))
    } else if qualified == well_known::tuple(2) {
        Some(("Item1", "Item2"))
    } else {
        None
    }
}
