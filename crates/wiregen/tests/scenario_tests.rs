//! End-to-end scenarios: source fragment in, emitted statements and
//! diagnostics out.

#![allow(non_snake_case)]

use wiregen::{Diagnostic, DiagnosticId, Engine, GeneratedUnit, SemanticModel};

fn generate(source: &str) -> (Vec<GeneratedUnit>, Vec<Diagnostic>) {
    let unit = wiregen::parse_source("scenario.cs", source).unwrap();
    let mut model = SemanticModel::new();
    model.bind_unit(&unit).unwrap();
    let mut engine = Engine::new();
    engine.visit_unit(&unit, &model);
    let units = engine.compile(&model);
    let diagnostics = engine.take_diagnostics();
    (units, diagnostics)
}

fn only_unit(source: &str) -> GeneratedUnit {
    let (mut units, diags) = generate(source);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
    assert_eq!(units.len(), 1);
    units.remove(0)
}

/// Order of emitted statements within the generated source.
fn ordered(source: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match source[from..].find(needle) {
            Some(i) => from += i + needle.len(),
            None => panic!("`{needle}` missing or out of order in:\n{source}"),
        }
    }
}

#[test]
fn scenario_1___int_then_string___int_bare_then_tagged_string() {
    let unit = only_unit(
        "namespace Demo { [Serializable] partial class A { int X; string Y; } }",
    );

    ordered(
        &unit.source,
        &[
            "public void Pack(System.IO.BinaryWriter writer) {",
            "writer.Write(X);",
            "if (Y == default(System.String)) {",
            "throw new System.InvalidOperationException(",
            "writer.Write(Y != null);",
            "if (Y != null) {",
            "writer.Write(Y);",
            "public void Unpack(System.IO.BinaryReader reader) {",
            "X = reader.ReadInt32();",
            "if (reader.ReadBoolean()) {",
            "Y = reader.ReadString();",
        ],
    );
}

#[test]
fn scenario_2___nullable_int___single_tag_then_guarded_value() {
    let unit = only_unit("namespace Demo { [Serializable] partial class B { int? N; } }");

    ordered(
        &unit.source,
        &[
            "writer.Write(N.HasValue);",
            "if (N.HasValue) {",
            "writer.Write(N.Value);",
        ],
    );
    // Exactly one tag per nullable slot.
    assert_eq!(unit.source.matches("N.HasValue").count(), 2); // write + guard
    ordered(
        &unit.source,
        &["Unpack", "if (reader.ReadBoolean()) {", "N = reader.ReadInt32();"],
    );
}

#[test]
fn scenario_3___list_of_int___tag_count_then_elements() {
    let unit = only_unit("namespace Demo { [Serializable] partial class C { List<int> L; } }");

    ordered(
        &unit.source,
        &[
            "writer.Write(L != null);",
            "if (L != null) {",
            "writer.Write(L.Count);",
            "foreach (var lEntry in L) {",
            "writer.Write(lEntry);",
        ],
    );
    ordered(
        &unit.source,
        &[
            "int lCount = reader.ReadInt32();",
            "lTemp.Add(lTransient);",
            "L = lTemp;",
        ],
    );
}

#[test]
fn scenario_4___enum___int32_cast_both_ways() {
    let unit = only_unit(
        "namespace Demo { enum Color { Red, Green } [Serializable] partial class D { Color C; } }",
    );

    assert!(unit.source.contains("writer.Write((int)C);"));
    assert!(unit.source.contains("C = (Demo.Color)reader.ReadInt32();"));
}

#[test]
fn scenario_5___byte_array___one_buffered_blob() {
    let unit = only_unit("namespace Demo { [Serializable] partial class E { byte[] B; } }");

    ordered(
        &unit.source,
        &[
            "writer.Write(B != null);",
            "writer.Write(B.Length);",
            "writer.Write(B);",
        ],
    );
    assert!(unit.source.contains("B = reader.ReadBytes(bLength);"));
    assert!(
        !unit.source.contains("B[bIdx]"),
        "byte arrays are one buffered write, not a loop"
    );
}

#[test]
fn scenario_6___interface_property___diagnostic_and_runtime_throw() {
    let (units, diags) = generate(
        "namespace Demo { [Serializable] partial class F { System.IDisposable X; } }",
    );

    // Generation continues: the unit still exists, with a throwing site.
    assert_eq!(units.len(), 1);
    assert!(units[0].source.contains("throw new System.InvalidOperationException("));
    assert!(diags.iter().all(|d| d.id == DiagnosticId::InterfaceProperties));
    assert_eq!(diags.len(), 2, "one per direction");
    assert_eq!(diags[0].args[0], "X");
}

#[test]
fn scenario_7___serializable_without_partial___one_error_no_output() {
    let (units, diags) = generate("namespace Demo { [Serializable] class G { int X; } }");

    assert!(units.is_empty());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].id, DiagnosticId::SerializationMarking);
    assert_eq!(diags[0].id.as_str(), "SerializationMarking");
}

#[test]
fn scenario_8___serializable_base___subtype_hides_and_packs_own_members_only() {
    let (units, diags) = generate(
        "namespace Demo { \
           [Serializable] partial class B { int? N; } \
           [Serializable] partial class H : B { int Z; } \
         }",
    );

    assert!(diags.is_empty());
    let h = units.iter().find(|u| u.type_name == "H").unwrap();
    assert!(h.source.contains("public new void Pack(System.IO.BinaryWriter writer) {"));
    assert!(h.source.contains("writer.Write(Z);"));
    assert!(!h.source.contains("N"), "H leaves B's members to B:\n{}", h.source);
}

#[test]
fn stable_order___swapping_declarations_changes_the_emission() {
    let forward = only_unit("namespace Demo { [Serializable] partial class A { int X; int Y; } }");
    let swapped = only_unit("namespace Demo { [Serializable] partial class A { int Y; int X; } }");

    assert_ne!(forward.source, swapped.source);
    ordered(&forward.source, &["writer.Write(X);", "writer.Write(Y);"]);
    ordered(&swapped.source, &["writer.Write(Y);", "writer.Write(X);"]);
}

#[test]
fn stable_order___whitespace_and_comments_do_not_change_the_emission() {
    let plain = only_unit("namespace Demo { [Serializable] partial class A { int X; int Y; } }");
    let noisy = only_unit(
        "namespace Demo {\n  // a comment\n  [Serializable]\n  partial class A {\n    int X;\n\n    int Y; /* trailing */\n  }\n}",
    );

    assert_eq!(plain.source, noisy.source);
}

#[test]
fn diagnostics___are_deterministic_for_a_fixed_input() {
    let source = "namespace Demo { \
        [Serializable] partial class F { System.IDisposable X; object O; } \
        [Serializable] class G { int X; } \
    }";

    let (_, first) = generate(source);
    let (_, second) = generate(source);

    let ids = |diags: &[Diagnostic]| diags.iter().map(|d| d.id).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(
        ids(&first),
        vec![
            DiagnosticId::SerializationMarking,
            DiagnosticId::InterfaceProperties,
            DiagnosticId::MissingPackingMethod,
            DiagnosticId::InterfaceProperties,
            DiagnosticId::MissingPackingMethod,
        ]
    );
}

#[test]
fn readonly_with_force___packed_but_left_default_on_unpack() {
    let unit = only_unit(
        "namespace Demo { [Serializable] partial class A { [Force] int R { get; } int X; } }",
    );

    assert!(unit.source.contains("writer.Write(R);"));
    assert!(!unit.source.contains("R = reader."));
    assert!(unit.source.contains("X = reader.ReadInt32();"));
}

#[test]
fn composite___nested_serializable_type_round_trips_through_its_own_methods() {
    let (units, diags) = generate(
        "namespace Demo { \
           [Serializable] partial class Inner { int A; } \
           [Serializable] partial class Outer { Inner I; } \
         }",
    );

    assert!(diags.is_empty());
    let outer = units.iter().find(|u| u.type_name == "Outer").unwrap();
    ordered(
        &outer.source,
        &["writer.Write(I != null);", "I.Pack(writer);"],
    );
    ordered(
        &outer.source,
        &["if (reader.ReadBoolean()) {", "I = new Demo.Inner(reader);"],
    );
}

#[test]
fn dictionary___packs_pairs_and_rebuilds_through_add() {
    let unit = only_unit(
        "namespace Demo { [Serializable] partial class M { Dictionary<string, int> Map; } }",
    );

    ordered(
        &unit.source,
        &[
            "writer.Write(Map != null);",
            "writer.Write(Map.Count);",
            "foreach (var mapEntry in Map) {",
            "writer.Write(mapEntry.Key != null);",
            "writer.Write(mapEntry.Key);",
            "writer.Write(mapEntry.Value);",
        ],
    );
    assert!(unit.source.contains("mapTemp.Add(mapTransient.Key, mapTransient.Value);"));
}
