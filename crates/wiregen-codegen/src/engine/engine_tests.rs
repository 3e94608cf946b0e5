#![allow(non_snake_case)]

use wiregen_symbols::SemanticModel;

use super::*;
use crate::diagnostics::DiagnosticId;

fn generate(source: &str) -> (Vec<GeneratedUnit>, Vec<Diagnostic>) {
    let unit = wiregen_parser::parse_source("test.cs", source).unwrap();
    let mut model = SemanticModel::new();
    model.bind_unit(&unit).unwrap();
    let mut engine = Engine::new();
    engine.visit_unit(&unit, &model);
    let units = engine.compile(&model);
    let diagnostics = engine.take_diagnostics();
    (units, diagnostics)
}

#[test]
fn Engine___visit_unit___only_serializable_partial_classes_become_units() {
    let (units, diags) = generate(
        "namespace N { \
           [Serializable] partial class Yes { int X; } \
           partial class NoAttribute { int X; } \
           [Serializable] partial struct NotAClass { } \
         }",
    );

    assert!(diags.is_empty());
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].type_name, "Yes");
    assert_eq!(units[0].hint_name, "Yes.g.cs");
}

#[test]
fn Engine___visit_unit___missing_partial_is_one_diagnostic_and_no_output() {
    let (units, diags) = generate("namespace N { [Serializable] class G { int X; } }");

    assert!(units.is_empty());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].id, DiagnosticId::SerializationMarking);
    assert_eq!(diags[0].args, vec!["G"]);
}

#[test]
fn Engine___visit_unit___candidates_outside_a_namespace_are_dropped() {
    let (units, diags) = generate("[Serializable] partial class Orphan { int X; }");

    assert!(units.is_empty());
    assert!(diags.is_empty());
}

#[test]
fn Engine___compile___unit_shape_has_usings_namespace_and_partial_class() {
    let (units, _) = generate(
        "using System.Collections.Generic;\nnamespace Demo { [Serializable] partial class A { int X; } }",
    );
    let source = &units[0].source;

    assert!(source.contains("using System;"));
    assert!(source.contains("using System.IO;"));
    assert!(source.contains("using System.Linq;"));
    assert!(source.contains("using System.Collections.Generic;"));
    assert!(source.contains("namespace Demo {"));
    assert!(source.contains("partial class A {"));
    assert!(source.contains("public void Pack(System.IO.BinaryWriter writer) {"));
    assert!(source.contains("public void Unpack(System.IO.BinaryReader reader) {"));
    assert_eq!(source.matches('{').count(), source.matches('}').count());
}

#[test]
fn Engine___compile___default_and_reader_constructors_are_emitted() {
    let (units, _) = generate("namespace Demo { [Serializable] partial class A { int X; } }");
    let source = &units[0].source;

    assert!(source.contains("public A() {"));
    assert!(source.contains("public A(System.IO.BinaryReader reader) {"));
    assert!(source.contains("Unpack(reader);"));
}

#[test]
fn Engine___compile___existing_parameterless_ctor_is_not_duplicated() {
    let (units, _) = generate(
        "namespace Demo { [Serializable] partial class A { public A() { } int X; } }",
    );
    let source = &units[0].source;

    assert_eq!(source.matches("public A() {").count(), 0);
}

#[test]
fn Engine___compile___hand_authored_pack_is_respected() {
    let (units, _) = generate(
        "namespace Demo { [Serializable] partial class A { public void Pack(System.IO.BinaryWriter writer) { } int X; } }",
    );
    let source = &units[0].source;

    assert!(!source.contains("void Pack("));
    assert!(source.contains("public void Unpack(System.IO.BinaryReader reader) {"));
}

#[test]
fn Engine___compile___serializable_base_hides_methods_and_packs_own_members_only() {
    let (units, diags) = generate(
        "namespace Demo { \
           [Serializable] partial class B { int? N; } \
           [Serializable] partial class H : B { int Z; } \
         }",
    );

    assert!(diags.is_empty());
    assert_eq!(units.len(), 2);
    let h = units.iter().find(|u| u.type_name == "H").unwrap();
    assert!(h.source.contains("public new void Pack(System.IO.BinaryWriter writer) {"));
    assert!(h.source.contains("public new void Unpack(System.IO.BinaryReader reader) {"));
    assert!(h.source.contains("writer.Write(Z);"));
    assert!(!h.source.contains("N.HasValue"), "H packs only its own members");
}

#[test]
fn Engine___compile___unserializable_base_members_are_inlined_after_own() {
    let (units, _) = generate(
        "namespace Demo { \
           class Plain { int FromBase; } \
           [Serializable] partial class D : Plain { int Own; } \
         }",
    );
    let source = &units[0].source;

    let own = source.find("writer.Write(Own);").unwrap();
    let inherited = source.find("writer.Write(FromBase);").unwrap();
    assert!(own < inherited);
    assert!(!source.contains(" new void Pack"));
}

#[test]
fn Engine___compile___generic_candidates_echo_parameters_and_constraints() {
    let (units, _) = generate(
        "namespace Demo { [Serializable] partial class Box<T> where T : new() { int X; } }",
    );

    assert_eq!(units[0].hint_name, "Box_1.g.cs");
    assert!(units[0].source.contains("partial class Box<T> where T : new() {"));
}

#[test]
fn Engine___compile___forced_readonly_is_packed_but_not_unpacked() {
    let (units, _) = generate(
        "namespace Demo { [Serializable] partial class A { [Force] int R { get; } } }",
    );
    let source = &units[0].source;

    assert!(source.contains("writer.Write(R);"));
    assert!(!source.contains("R = reader.ReadInt32();"));
}

#[test]
fn Engine___compile___diagnostics_accumulate_but_generation_continues() {
    let (units, diags) = generate(
        "namespace Demo { \
           [Serializable] partial class Bad { System.IDisposable X; } \
           [Serializable] partial class Good { int X; } \
         }",
    );

    assert_eq!(units.len(), 2);
    // Pack and unpack each record the interface problem.
    assert!(diags.iter().all(|d| d.id == DiagnosticId::InterfaceProperties));
    assert_eq!(diags.len(), 2);
    let good = units.iter().find(|u| u.type_name == "Good").unwrap();
    assert!(good.source.contains("writer.Write(X);"));
}

#[test]
fn Engine___compile___is_deterministic() {
    let source = "namespace Demo { [Serializable] partial class A { int X; List<string> L; System.DateTime T; } }";

    let (a, _) = generate(source);
    let (b, _) = generate(source);

    assert_eq!(a[0].source, b[0].source);
}

#[test]
fn Engine___compile___consumes_work_items() {
    let unit = wiregen_parser::parse_source(
        "test.cs",
        "namespace Demo { [Serializable] partial class A { int X; } }",
    )
    .unwrap();
    let mut model = SemanticModel::new();
    model.bind_unit(&unit).unwrap();
    let mut engine = Engine::new();
    engine.visit_unit(&unit, &model);

    assert_eq!(engine.compile(&model).len(), 1);
    assert_eq!(engine.compile(&model).len(), 0);
}
