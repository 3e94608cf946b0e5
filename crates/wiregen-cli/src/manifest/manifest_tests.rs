#![allow(non_snake_case)]

use super::*;

#[test]
fn Manifest___from_str___parses_a_full_manifest() {
    let manifest = Manifest::from_str(
        r#"
        [generator]
        sources = ["messages.cs", "events.cs"]
        output = "gen"
        namespace_allow = ["Demo.Net"]
        "#,
    )
    .unwrap();

    assert_eq!(manifest.generator.sources, vec!["messages.cs", "events.cs"]);
    assert_eq!(manifest.generator.output.as_deref(), Some("gen"));
    assert_eq!(manifest.generator.namespace_allow, vec!["Demo.Net"]);
}

#[test]
fn Manifest___from_str___defaults_optional_fields() {
    let manifest = Manifest::from_str("[generator]\nsources = [\"a.cs\"]\n").unwrap();

    assert!(manifest.generator.output.is_none());
    assert!(manifest.generator.namespace_allow.is_empty());
}

#[test]
fn Manifest___from_str___rejects_empty_sources() {
    let err = Manifest::from_str("[generator]\nsources = []\n").unwrap_err();

    assert!(err.to_string().contains("no sources"));
}

#[test]
fn Manifest___from_str___rejects_empty_output() {
    let err =
        Manifest::from_str("[generator]\nsources = [\"a.cs\"]\noutput = \"\"\n").unwrap_err();

    assert!(err.to_string().contains("Output directory"));
}

#[test]
fn Manifest___from_str___rejects_missing_section() {
    assert!(Manifest::from_str("sources = [\"a.cs\"]").is_err());
}

#[test]
fn Manifest___roundtrips_through_toml() {
    let manifest = Manifest {
        generator: GeneratorSection {
            sources: vec!["a.cs".to_string()],
            output: Some("out".to_string()),
            namespace_allow: vec![],
        },
    };

    let text = toml::to_string(&manifest).unwrap();
    let back = Manifest::from_str(&text).unwrap();

    assert_eq!(back.generator.sources, manifest.generator.sources);
    assert_eq!(back.generator.output, manifest.generator.output);
}
