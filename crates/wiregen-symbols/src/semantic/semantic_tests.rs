#![allow(non_snake_case)]

use super::*;
use crate::syntax::{AttributeSyntax, NamespaceDecl, PropertySyntax};

fn ty(name: &str) -> TypeSyntax {
    TypeSyntax::named(name, Location::none())
}

fn generic(name: &str, args: Vec<TypeSyntax>) -> TypeSyntax {
    let mut t = TypeSyntax::named(name, Location::none());
    t.args = args;
    t
}

#[test]
fn SemanticModel___new___seeds_the_builtin_universe() {
    let model = SemanticModel::new();

    for name in [
        "System.Int32",
        "System.String",
        "System.Object",
        "System.DateTime",
        "System.TimeSpan",
        "System.Nullable`1",
        "System.Tuple`1",
        "System.Tuple`7",
        "System.Collections.Generic.IEnumerable`1",
        "System.Collections.Generic.KeyValuePair`2",
        "System.Collections.Generic.List`1",
        "System.Collections.Generic.Dictionary`2",
        "System.IO.BinaryWriter",
        "System.IO.BinaryReader",
    ] {
        assert!(model.lookup(name).is_some(), "missing builtin {name}");
    }
}

#[test]
fn SemanticModel___resolve_type___keyword_aliases_map_to_system_types() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let int = model.resolve_type(&ty("int"), &scope).unwrap();
    let string = model.resolve_type(&ty("string"), &scope).unwrap();

    assert_eq!(model.qualified_name(int), "System.Int32");
    assert_eq!(model.qualified_name(string), "System.String");
    assert!(!model.type_(int).is_reference);
    assert!(model.type_(string).is_reference);
}

#[test]
fn SemanticModel___qualified_name___includes_backtick_arity() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let list = model
        .resolve_type(&generic("List", vec![ty("int")]), &scope)
        .unwrap();

    assert_eq!(
        model.qualified_name(list),
        "System.Collections.Generic.List`1"
    );
}

#[test]
fn SemanticModel___display_name___renders_arguments_recursively() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let nested = model
        .resolve_type(
            &generic("Dictionary", vec![ty("string"), generic("List", vec![ty("int")])]),
            &scope,
        )
        .unwrap();

    assert_eq!(
        model.display_name(nested),
        "System.Collections.Generic.Dictionary<System.String, System.Collections.Generic.List<System.Int32>>"
    );
}

#[test]
fn SemanticModel___resolve_type___nullable_and_array_modifiers() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let mut syntax = ty("int");
    syntax.nullable = true;
    syntax.array_dims = 1;
    let id = model.resolve_type(&syntax, &scope).unwrap();

    assert_eq!(model.type_(id).kind, TypeKind::Array);
    let element = model.type_(id).element.unwrap();
    assert_eq!(model.qualified_name(element), "System.Nullable`1");
    assert_eq!(
        model.nullable_inner(element).map(|t| model.qualified_name(t)),
        Some("System.Int32".to_string())
    );
}

#[test]
fn SemanticModel___instantiate___is_interned() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let a = model
        .resolve_type(&generic("List", vec![ty("int")]), &scope)
        .unwrap();
    let b = model
        .resolve_type(&generic("List", vec![ty("int")]), &scope)
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn SemanticModel___instantiate___substitutes_member_signatures() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let list_int = model
        .resolve_type(&generic("List", vec![ty("int")]), &scope)
        .unwrap();

    assert!(model.has_method(list_int, "Add", Some(&["System.Int32"])));
    assert!(!model.has_method(list_int, "Add", Some(&["System.String"])));
    let int = model.lookup("System.Int32").unwrap();
    assert!(model.has_enumerable_ctor(list_int, int));
}

#[test]
fn SemanticModel___enumerable_element___found_through_interfaces() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let list_int = model
        .resolve_type(&generic("List", vec![ty("int")]), &scope)
        .unwrap();
    let dict = model
        .resolve_type(&generic("Dictionary", vec![ty("string"), ty("int")]), &scope)
        .unwrap();

    let list_elem = model.enumerable_element(list_int).unwrap();
    assert_eq!(model.qualified_name(list_elem), "System.Int32");

    let dict_elem = model.enumerable_element(dict).unwrap();
    assert_eq!(
        model.qualified_name(dict_elem),
        "System.Collections.Generic.KeyValuePair`2"
    );
    // The pair element is the concrete instantiation, not the open form.
    let pair = model.type_(dict_elem);
    assert_eq!(model.qualified_name(pair.type_args[0]), "System.String");
    assert_eq!(model.qualified_name(pair.type_args[1]), "System.Int32");
}

#[test]
fn SemanticModel___enumerable_element___exact_interface_counts() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let seq = model
        .resolve_type(&generic("IEnumerable", vec![ty("byte")]), &scope)
        .unwrap();

    assert_eq!(
        model.exact_enumerable_element(seq).map(|t| model.qualified_name(t)),
        Some("System.Byte".to_string())
    );
}

#[test]
fn SemanticModel___bind_unit___binds_classes_and_enums() {
    let mut model = SemanticModel::new();
    let unit = SourceUnit {
        file: "demo.cs".to_string(),
        usings: vec!["System".to_string()],
        declarations: vec![Declaration::Namespace(NamespaceDecl {
            name: "Demo".to_string(),
            declarations: vec![
                Declaration::Enum(EnumDecl {
                    attributes: vec![],
                    modifiers: vec![],
                    name: "Color".to_string(),
                    variants: vec!["Red".to_string(), "Green".to_string()],
                    location: Location::none(),
                }),
                Declaration::Class(ClassDecl {
                    kind_word: "class".to_string(),
                    attributes: vec![AttributeSyntax {
                        name: "Serializable".to_string(),
                        arguments: None,
                        location: Location::none(),
                    }],
                    modifiers: vec![Modifier::Public, Modifier::Partial],
                    name: "Packet".to_string(),
                    generic_params: vec![],
                    base_types: vec![],
                    constraints: None,
                    members: vec![MemberSyntax::Property(PropertySyntax {
                        attributes: vec![],
                        modifiers: vec![],
                        ty: TypeSyntax::named("Color", Location::none()),
                        name: "Paint".to_string(),
                        has_getter: true,
                        has_setter: true,
                        is_indexer: false,
                        location: Location::none(),
                    })],
                    location: Location::none(),
                }),
            ],
            location: Location::none(),
        })],
    };

    let ids = model.bind_unit(&unit).unwrap();

    assert_eq!(ids.len(), 1);
    let packet = ids[0];
    assert_eq!(model.qualified_name(packet), "Demo.Packet");
    assert!(model.is_marked_serializable(packet));
    let prop = model.type_(packet).own_properties().next().unwrap();
    assert_eq!(model.type_(prop.ty).kind, TypeKind::Enum);
}

#[test]
fn SemanticModel___bind_unit___duplicate_declaration_is_an_error() {
    let mut model = SemanticModel::new();
    let class = ClassDecl {
        kind_word: "class".to_string(),
        attributes: vec![],
        modifiers: vec![],
        name: "Twice".to_string(),
        generic_params: vec![],
        base_types: vec![],
        constraints: None,
        members: vec![],
        location: Location::none(),
    };
    let unit = SourceUnit {
        file: "dup.cs".to_string(),
        usings: vec![],
        declarations: vec![
            Declaration::Class(class.clone()),
            Declaration::Class(class),
        ],
    };

    let err = model.bind_unit(&unit).unwrap_err();

    assert!(matches!(err, BindError::DuplicateType { .. }));
}

#[test]
fn SemanticModel___resolve_type___unknown_name_is_an_error() {
    let mut model = SemanticModel::new();
    let scope = TypeScope::new("");

    let err = model.resolve_type(&ty("Nonexistent"), &scope).unwrap_err();

    assert!(matches!(err, BindError::UnknownType { .. }));
}

#[test]
fn SemanticModel___enumerate_members___dedupes_by_name_and_skips_statics() {
    let mut model = SemanticModel::new();
    let unit = SourceUnit {
        file: "inherit.cs".to_string(),
        usings: vec![],
        declarations: vec![Declaration::Namespace(NamespaceDecl {
            name: "Demo".to_string(),
            declarations: vec![
                Declaration::Class(ClassDecl {
                    kind_word: "class".to_string(),
                    attributes: vec![],
                    modifiers: vec![],
                    name: "Base".to_string(),
                    generic_params: vec![],
                    base_types: vec![],
                    constraints: None,
                    members: vec![
                        MemberSyntax::Property(PropertySyntax {
                            attributes: vec![],
                            modifiers: vec![],
                            ty: TypeSyntax::named("int", Location::none()),
                            name: "Shared".to_string(),
                            has_getter: true,
                            has_setter: true,
                            is_indexer: false,
                            location: Location::none(),
                        }),
                        MemberSyntax::Property(PropertySyntax {
                            attributes: vec![],
                            modifiers: vec![],
                            ty: TypeSyntax::named("int", Location::none()),
                            name: "FromBase".to_string(),
                            has_getter: true,
                            has_setter: true,
                            is_indexer: false,
                            location: Location::none(),
                        }),
                        MemberSyntax::Property(PropertySyntax {
                            attributes: vec![],
                            modifiers: vec![Modifier::Static],
                            ty: TypeSyntax::named("int", Location::none()),
                            name: "Counter".to_string(),
                            has_getter: true,
                            has_setter: true,
                            is_indexer: false,
                            location: Location::none(),
                        }),
                    ],
                    location: Location::none(),
                }),
                Declaration::Class(ClassDecl {
                    kind_word: "class".to_string(),
                    attributes: vec![],
                    modifiers: vec![],
                    name: "Derived".to_string(),
                    generic_params: vec![],
                    base_types: vec![TypeSyntax::named("Base", Location::none())],
                    constraints: None,
                    members: vec![MemberSyntax::Property(PropertySyntax {
                        attributes: vec![],
                        modifiers: vec![],
                        ty: TypeSyntax::named("string", Location::none()),
                        name: "Shared".to_string(),
                        has_getter: true,
                        has_setter: true,
                        is_indexer: false,
                        location: Location::none(),
                    })],
                    location: Location::none(),
                }),
            ],
            location: Location::none(),
        })],
    };

    let ids = model.bind_unit(&unit).unwrap();
    let derived = ids[1];

    let names: Vec<&str> = model
        .enumerate_members(derived)
        .iter()
        .filter_map(|m| m.name())
        .collect();

    // Own `Shared` first, then the base's `FromBase`; the base `Shared` is
    // hidden by name, the static `Counter` excluded.
    assert_eq!(names, vec!["Shared", "FromBase"]);
}
