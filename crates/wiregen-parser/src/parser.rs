//! Recursive-descent parser for the declaration subset.
//!
//! Only what generation needs is modeled: usings, namespaces, attributes,
//! class-like declarations with properties / method signatures /
//! constructors, and enums. Method and accessor bodies are skipped over
//! balanced braces.

use wiregen_symbols::{
    AttributeSyntax, ClassDecl, CtorSyntax, Declaration, EnumDecl, Location, MemberSyntax,
    MethodSyntax, Modifier, NamespaceDecl, ParamSyntax, PropertySyntax, SourceUnit, TypeSyntax,
};

use crate::error::ParseError;
use crate::lexer::{tokenize, Token, TokenKind};

/// Parse one source text into a unit. `file` is carried into locations.
pub fn parse_source(file: &str, source: &str) -> Result<SourceUnit, ParseError> {
    let tokens = tokenize(source);
    let mut parser = Parser {
        file: file.to_string(),
        tokens,
        pos: 0,
    };
    let unit = parser.parse_unit()?;
    tracing::debug!(file, declarations = unit.declarations.len(), "parsed unit");
    Ok(unit)
}

struct Parser {
    file: String,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn at(&self, text: &str) -> bool {
        self.peek().is_some_and(|t| t.text == text)
    }

    fn at_ident(&self) -> bool {
        self.peek().is_some_and(|t| t.kind == TokenKind::Ident)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, text: &str) -> bool {
        if self.at(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, text: &str) -> Result<Token, ParseError> {
        if self.at(text) {
            Ok(self.bump().expect("peeked token exists"))
        } else {
            Err(self.error_here(&format!("expected `{text}`")))
        }
    }

    fn expect_ident(&mut self) -> Result<Token, ParseError> {
        if self.at_ident() {
            Ok(self.bump().expect("peeked token exists"))
        } else {
            Err(self.error_here("expected an identifier"))
        }
    }

    fn location(&self) -> Location {
        match self.peek() {
            Some(t) => Location::new(&self.file, t.line, t.column),
            None => {
                let last = self.tokens.last();
                Location::new(
                    &self.file,
                    last.map(|t| t.line).unwrap_or(1),
                    last.map(|t| t.column).unwrap_or(1),
                )
            }
        }
    }

    fn error_here(&self, message: &str) -> ParseError {
        let location = self.location();
        let found = self
            .peek()
            .map(|t| format!("`{}`", t.text))
            .unwrap_or_else(|| "end of input".to_string());
        ParseError {
            file: location.file,
            line: location.line,
            column: location.column,
            message: format!("{message}, found {found}"),
        }
    }

    // ------------------------------------------------------------------
    // Grammar
    // ------------------------------------------------------------------

    fn parse_unit(&mut self) -> Result<SourceUnit, ParseError> {
        let mut usings = Vec::new();
        while self.at("using") {
            self.bump();
            usings.push(self.parse_dotted_name()?);
            self.expect(";")?;
        }
        let mut declarations = Vec::new();
        while self.peek().is_some() {
            declarations.push(self.parse_declaration()?);
        }
        Ok(SourceUnit {
            file: self.file.clone(),
            usings,
            declarations,
        })
    }

    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        if self.at("namespace") {
            return self.parse_namespace();
        }
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_modifiers();
        if self.at("class") || self.at("struct") || self.at("interface") {
            Ok(Declaration::Class(self.parse_class(attributes, modifiers)?))
        } else if self.at("enum") {
            Ok(Declaration::Enum(self.parse_enum(attributes, modifiers)?))
        } else {
            Err(self.error_here("expected a type declaration"))
        }
    }

    fn parse_namespace(&mut self) -> Result<Declaration, ParseError> {
        let location = self.location();
        self.expect("namespace")?;
        let name = self.parse_dotted_name()?;
        let mut declarations = Vec::new();
        if self.eat(";") {
            // File-scoped form: the rest of the unit belongs to it.
            while self.peek().is_some() {
                declarations.push(self.parse_declaration()?);
            }
        } else {
            self.expect("{")?;
            while !self.at("}") {
                if self.peek().is_none() {
                    return Err(self.error_here("unterminated namespace body"));
                }
                declarations.push(self.parse_declaration()?);
            }
            self.expect("}")?;
        }
        Ok(Declaration::Namespace(NamespaceDecl {
            name,
            declarations,
            location,
        }))
    }

    fn parse_attributes(&mut self) -> Result<Vec<AttributeSyntax>, ParseError> {
        let mut attributes = Vec::new();
        while self.at("[") {
            self.bump();
            loop {
                let location = self.location();
                let name = self.parse_dotted_name()?;
                let arguments = if self.at("(") {
                    Some(self.capture_balanced("(", ")")?)
                } else {
                    None
                };
                attributes.push(AttributeSyntax {
                    name,
                    arguments,
                    location,
                });
                if !self.eat(",") {
                    break;
                }
            }
            self.expect("]")?;
        }
        Ok(attributes)
    }

    fn parse_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        while let Some(token) = self.peek() {
            match Modifier::from_keyword(&token.text) {
                Some(modifier) => {
                    modifiers.push(modifier);
                    self.pos += 1;
                }
                None => break,
            }
        }
        modifiers
    }

    fn parse_class(
        &mut self,
        attributes: Vec<AttributeSyntax>,
        modifiers: Vec<Modifier>,
    ) -> Result<ClassDecl, ParseError> {
        let location = self.location();
        let kind_word = self.bump().expect("class keyword").text;
        let name = self.expect_ident()?.text;

        let mut generic_params = Vec::new();
        if self.eat("<") {
            loop {
                generic_params.push(self.expect_ident()?.text);
                if !self.eat(",") {
                    break;
                }
            }
            self.expect(">")?;
        }

        let mut base_types = Vec::new();
        if self.eat(":") {
            loop {
                base_types.push(self.parse_type()?);
                if !self.eat(",") {
                    break;
                }
            }
        }

        let constraints = if self.at("where") {
            Some(self.capture_until_brace()?)
        } else {
            None
        };

        self.expect("{")?;
        let mut members = Vec::new();
        while !self.at("}") {
            if self.peek().is_none() {
                return Err(self.error_here("unterminated type body"));
            }
            members.push(self.parse_member(&name)?);
        }
        self.expect("}")?;

        Ok(ClassDecl {
            kind_word,
            attributes,
            modifiers,
            name,
            generic_params,
            base_types,
            constraints,
            members,
            location,
        })
    }

    fn parse_enum(
        &mut self,
        attributes: Vec<AttributeSyntax>,
        modifiers: Vec<Modifier>,
    ) -> Result<EnumDecl, ParseError> {
        let location = self.location();
        self.expect("enum")?;
        let name = self.expect_ident()?.text;
        self.expect("{")?;
        let mut variants = Vec::new();
        while !self.at("}") {
            variants.push(self.expect_ident()?.text);
            if self.eat("=") {
                // Variant values do not affect the wire format.
                while !self.at(",") && !self.at("}") {
                    if self.bump().is_none() {
                        return Err(self.error_here("unterminated enum body"));
                    }
                }
            }
            if !self.eat(",") {
                break;
            }
        }
        self.expect("}")?;
        Ok(EnumDecl {
            attributes,
            modifiers,
            name,
            variants,
            location,
        })
    }

    fn parse_member(&mut self, class_name: &str) -> Result<MemberSyntax, ParseError> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_modifiers();
        let location = self.location();

        // Constructor: the class name followed by a parameter list.
        if self.at(class_name) && self.peek_at(1).is_some_and(|t| t.text == "(") {
            self.bump();
            let params = self.parse_params()?;
            // Skip a `: base(...)` / `: this(...)` initializer.
            if self.eat(":") {
                self.expect_ident()?;
                self.capture_balanced("(", ")")?;
            }
            self.skip_body_or_semi()?;
            return Ok(MemberSyntax::Ctor(CtorSyntax {
                modifiers,
                params,
                location,
            }));
        }

        let ty = self.parse_type()?;

        // Indexer: `Type this[...] { get; set; }`
        if self.at("this") {
            self.bump();
            self.capture_balanced("[", "]")?;
            let (has_getter, has_setter) = self.parse_accessors()?;
            return Ok(MemberSyntax::Property(PropertySyntax {
                attributes,
                modifiers,
                ty,
                name: "Item".to_string(),
                has_getter,
                has_setter,
                is_indexer: true,
                location,
            }));
        }

        let name = self.expect_ident()?.text;

        if self.at("(") {
            let params = self.parse_params()?;
            self.skip_body_or_semi()?;
            return Ok(MemberSyntax::Method(MethodSyntax {
                modifiers,
                return_ty: Some(ty),
                name,
                params,
                location,
            }));
        }

        if self.at("{") {
            let (has_getter, has_setter) = self.parse_accessors()?;
            // Property initializer: `{ get; set; } = value;`
            if self.eat("=") {
                while !self.eat(";") {
                    if self.bump().is_none() {
                        return Err(self.error_here("unterminated property initializer"));
                    }
                }
            }
            return Ok(MemberSyntax::Property(PropertySyntax {
                attributes,
                modifiers,
                ty,
                name,
                has_getter,
                has_setter,
                is_indexer: false,
                location,
            }));
        }

        // Field-style shorthand, with or without initializer; recorded as a
        // read-write property.
        if self.at("=") {
            while !self.eat(";") {
                if self.bump().is_none() {
                    return Err(self.error_here("unterminated field initializer"));
                }
            }
        } else {
            self.expect(";")?;
        }
        Ok(MemberSyntax::Property(PropertySyntax {
            attributes,
            modifiers,
            ty,
            name,
            has_getter: true,
            has_setter: true,
            is_indexer: false,
            location,
        }))
    }

    /// `{ get; private set; }`, bodies allowed. Returns (getter, setter).
    fn parse_accessors(&mut self) -> Result<(bool, bool), ParseError> {
        self.expect("{")?;
        let mut has_getter = false;
        let mut has_setter = false;
        while !self.at("}") {
            let _accessor_modifiers = self.parse_modifiers();
            let word = self.expect_ident()?;
            match word.text.as_str() {
                "get" => has_getter = true,
                "set" => has_setter = true,
                other => {
                    return Err(ParseError {
                        file: self.file.clone(),
                        line: word.line,
                        column: word.column,
                        message: format!("expected `get` or `set`, found `{other}`"),
                    })
                }
            }
            if self.at("{") {
                self.capture_balanced("{", "}")?;
            } else {
                self.expect(";")?;
            }
        }
        self.expect("}")?;
        Ok((has_getter, has_setter))
    }

    fn parse_params(&mut self) -> Result<Vec<ParamSyntax>, ParseError> {
        self.expect("(")?;
        let mut params = Vec::new();
        if !self.at(")") {
            loop {
                let ty = self.parse_type()?;
                let name = self.expect_ident()?.text;
                if self.eat("=") {
                    // Default value; irrelevant to signatures.
                    while !self.at(",") && !self.at(")") {
                        if self.bump().is_none() {
                            return Err(self.error_here("unterminated parameter default"));
                        }
                    }
                }
                params.push(ParamSyntax { ty, name });
                if !self.eat(",") {
                    break;
                }
            }
        }
        self.expect(")")?;
        Ok(params)
    }

    fn parse_type(&mut self) -> Result<TypeSyntax, ParseError> {
        let location = self.location();
        let name = self.parse_dotted_name()?;
        let mut syntax = TypeSyntax::named(name, location);
        if self.eat("<") {
            loop {
                syntax.args.push(self.parse_type()?);
                if !self.eat(",") {
                    break;
                }
            }
            self.expect(">")?;
        }
        if self.eat("?") {
            syntax.nullable = true;
        }
        while self.at("[") && self.peek_at(1).is_some_and(|t| t.text == "]") {
            self.bump();
            self.bump();
            syntax.array_dims += 1;
        }
        Ok(syntax)
    }

    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_ident()?.text;
        while self.at(".") {
            self.bump();
            name.push('.');
            name.push_str(&self.expect_ident()?.text);
        }
        Ok(name)
    }

    /// Skip `{ ... }` over balanced braces, or a single `;`.
    fn skip_body_or_semi(&mut self) -> Result<(), ParseError> {
        if self.at("{") {
            self.capture_balanced("{", "}")?;
            Ok(())
        } else {
            self.expect(";").map(|_| ())
        }
    }

    /// Consume a balanced `open ... close` region and return the interior
    /// text, tokens joined with minimal spacing.
    fn capture_balanced(&mut self, open: &str, close: &str) -> Result<String, ParseError> {
        self.expect(open)?;
        let mut depth = 1usize;
        let mut parts: Vec<String> = Vec::new();
        loop {
            let Some(token) = self.bump() else {
                return Err(self.error_here(&format!("unterminated `{open}`")));
            };
            if token.text == open {
                depth += 1;
            } else if token.text == close {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            parts.push(token.text);
        }
        Ok(join_tokens(&parts))
    }

    /// Capture raw text (e.g. `where` clauses) up to, but not including, the
    /// next top-level `{`.
    fn capture_until_brace(&mut self) -> Result<String, ParseError> {
        let mut parts: Vec<String> = Vec::new();
        while !self.at("{") {
            let Some(token) = self.bump() else {
                return Err(self.error_here("expected `{` after constraints"));
            };
            parts.push(token.text);
        }
        Ok(join_tokens(&parts))
    }
}

/// Join token texts with spaces, omitting them around tight punctuation so
/// captured text reads naturally (`where T : new()`).
fn join_tokens(parts: &[String]) -> String {
    let mut out = String::new();
    for part in parts {
        let tight_before = matches!(part.as_str(), "," | ")" | ">" | "]" | "." | ";" | "(");
        if !out.is_empty() && !tight_before && !out.ends_with(['(', '.', '<', '[']) {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}
