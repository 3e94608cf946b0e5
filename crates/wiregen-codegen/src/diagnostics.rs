//! Structured diagnostics.
//!
//! A diagnostic is recorded for the host *and* compiled into a throwing
//! statement at its site, so a shape problem is visible at generation time
//! and again if the dead branch is ever executed.

use serde::Serialize;
use wiregen_symbols::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Stable diagnostic identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticId {
    SerializationMarking,
    InterfaceProperties,
    MissingPackingMethod,
    EnumerableProperties,
}

impl DiagnosticId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticId::SerializationMarking => "SerializationMarking",
            DiagnosticId::InterfaceProperties => "InterfaceProperties",
            DiagnosticId::MissingPackingMethod => "MissingPackingMethod",
            DiagnosticId::EnumerableProperties => "EnumerableProperties",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticId::SerializationMarking => "Serializable type is not partial",
            DiagnosticId::InterfaceProperties => "Interface-typed property cannot be serialized",
            DiagnosticId::MissingPackingMethod => "No packing method for composite type",
            DiagnosticId::EnumerableProperties => "Enumerable type has no insertion path",
        }
    }

    /// Positional message template; `{0}`, `{1}`, … index into the
    /// diagnostic's format arguments.
    pub fn message_format(&self) -> &'static str {
        match self {
            DiagnosticId::SerializationMarking => {
                "the type {0} is marked serializable but is not declared partial; add the partial modifier so the serialization piece can be generated"
            }
            DiagnosticId::InterfaceProperties => {
                "the property {0} is typed by the interface {1}; interfaces other than the enumerable interface have no serialized form"
            }
            DiagnosticId::MissingPackingMethod => {
                "the type {1} of property {0} has no Pack method and is not marked serializable"
            }
            DiagnosticId::EnumerableProperties => {
                "the enumerable type {1} of property {0} has no Add method, enumerable constructor, or array form to rebuild it"
            }
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

/// A located problem report.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub id: DiagnosticId,
    pub title: &'static str,
    pub message_format: &'static str,
    pub severity: Severity,
    /// Primary location first, context locations after.
    pub locations: Vec<Location>,
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(id: DiagnosticId, primary: Location, args: Vec<String>) -> Self {
        Self {
            id,
            title: id.title(),
            message_format: id.message_format(),
            severity: id.severity(),
            locations: vec![primary],
            args,
        }
    }

    pub fn with_context(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn serialization_marking(type_name: &str, location: Location) -> Self {
        Self::new(
            DiagnosticId::SerializationMarking,
            location,
            vec![type_name.to_string()],
        )
    }

    pub fn interface_properties(property: &str, type_display: &str, location: Location) -> Self {
        Self::new(
            DiagnosticId::InterfaceProperties,
            location,
            vec![property.to_string(), type_display.to_string()],
        )
    }

    pub fn missing_packing_method(property: &str, type_display: &str, location: Location) -> Self {
        Self::new(
            DiagnosticId::MissingPackingMethod,
            location,
            vec![property.to_string(), type_display.to_string()],
        )
    }

    pub fn enumerable_properties(property: &str, type_display: &str, location: Location) -> Self {
        Self::new(
            DiagnosticId::EnumerableProperties,
            location,
            vec![property.to_string(), type_display.to_string()],
        )
    }

    /// The message with positional arguments substituted.
    pub fn message(&self) -> String {
        let mut out = self.message_format.to_string();
        for (i, arg) in self.args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), arg);
        }
        out
    }

    /// The statement emitted at the problem site in generated code.
    pub fn throw_statement(&self) -> String {
        format!(
            "throw new System.InvalidOperationException(\"{}\");",
            escape_literal(&self.message())
        )
    }
}

/// Escape a message for embedding in a generated string literal.
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn Diagnostic___message___substitutes_positional_args() {
        let diag = Diagnostic::missing_packing_method(
            "Payload",
            "Demo.Widget",
            Location::new("demo.cs", 3, 5),
        );

        assert_eq!(
            diag.message(),
            "the type Demo.Widget of property Payload has no Pack method and is not marked serializable"
        );
    }

    #[test]
    fn Diagnostic___throw_statement___is_a_single_statement_with_the_message() {
        let diag = Diagnostic::interface_properties(
            "X",
            "System.IDisposable",
            Location::new("demo.cs", 1, 1),
        );

        let stmt = diag.throw_statement();

        assert!(stmt.starts_with("throw new System.InvalidOperationException(\""));
        assert!(stmt.ends_with("\");"));
        assert!(stmt.contains("System.IDisposable"));
    }

    #[test]
    fn Diagnostic___with_context___keeps_primary_location_first() {
        let primary = Location::new("a.cs", 1, 1);
        let context = Location::new("b.cs", 2, 2);

        let diag =
            Diagnostic::serialization_marking("G", primary.clone()).with_context(context.clone());

        assert_eq!(diag.locations, vec![primary, context]);
    }

    #[test]
    fn DiagnosticId___as_str___ids_are_stable() {
        assert_eq!(DiagnosticId::SerializationMarking.as_str(), "SerializationMarking");
        assert_eq!(DiagnosticId::InterfaceProperties.as_str(), "InterfaceProperties");
        assert_eq!(DiagnosticId::MissingPackingMethod.as_str(), "MissingPackingMethod");
        assert_eq!(DiagnosticId::EnumerableProperties.as_str(), "EnumerableProperties");
    }

    #[test]
    fn escape_literal___escapes_quotes_and_backslashes() {
        assert_eq!(escape_literal(r#"a "b" \c"#), r#"a \"b\" \\c"#);
    }
}
