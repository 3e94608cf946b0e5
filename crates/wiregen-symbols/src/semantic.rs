//! The semantic model: type universe, generic instantiation, and the binder
//! that turns syntax declarations into symbols.
//!
//! The model is seeded with the built-in framework types the generator
//! understands (primitives, `Nullable`, the default-strategy composites, the
//! collection types with their insertion members) and extended by
//! [`SemanticModel::bind_unit`] for each parsed source unit.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::location::Location;
use crate::symbols::{
    Accessibility, AttributeSymbol, ConstructorSymbol, MemberSymbol, MethodSymbol, PropertySymbol,
    TypeId, TypeKind, TypeSymbol,
};
use crate::syntax::{
    ClassDecl, Declaration, EnumDecl, MemberSyntax, Modifier, SourceUnit, TypeSyntax,
};
use crate::well_known;

/// Errors from binding declarations into the model.
///
/// These are host-analyzer failures (unknown names, duplicates), not
/// generator diagnostics: the engine only ever sees fully resolved symbols.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("{location}: unknown type name `{name}`")]
    UnknownType { name: String, location: Location },

    #[error("{location}: type name `{name}` is ambiguous; qualify it with a namespace")]
    AmbiguousType { name: String, location: Location },

    #[error("{location}: `{name}` expects {expected} generic argument(s), got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
        location: Location,
    },

    #[error("{location}: duplicate declaration of `{name}`")]
    DuplicateType { name: String, location: Location },
}

/// Name-resolution scope: the enclosing namespace plus any generic parameters
/// of the declaration being bound.
pub struct TypeScope<'a> {
    pub namespace: &'a str,
    params: Vec<(String, TypeId)>,
}

impl<'a> TypeScope<'a> {
    pub fn new(namespace: &'a str) -> Self {
        Self {
            namespace,
            params: Vec::new(),
        }
    }

    pub fn with_params(namespace: &'a str, params: Vec<(String, TypeId)>) -> Self {
        Self { namespace, params }
    }

    fn param(&self, name: &str) -> Option<TypeId> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }
}

/// The type universe for one generation pass.
pub struct SemanticModel {
    types: Vec<TypeSymbol>,
    by_qualified: HashMap<String, TypeId>,
    by_simple: HashMap<String, Vec<TypeId>>,
    aliases: HashMap<&'static str, TypeId>,
    instantiations: HashMap<(TypeId, Vec<TypeId>), TypeId>,
    arrays: HashMap<TypeId, TypeId>,
}

impl SemanticModel {
    /// A model pre-seeded with the built-in type universe.
    pub fn new() -> Self {
        let mut model = Self {
            types: Vec::new(),
            by_qualified: HashMap::new(),
            by_simple: HashMap::new(),
            aliases: HashMap::new(),
            instantiations: HashMap::new(),
            arrays: HashMap::new(),
        };
        model.seed_builtins();
        model
    }

    pub fn type_(&self, id: TypeId) -> &TypeSymbol {
        &self.types[id.0 as usize]
    }

    /// Look up a definition by its qualified generic name, e.g.
    /// ``System.Collections.Generic.List`1``.
    pub fn lookup(&self, qualified: &str) -> Option<TypeId> {
        self.by_qualified.get(qualified).copied()
    }

    /// Resolve the symbol a class declaration binds to, if any.
    pub fn resolve_declared(&self, namespace: &str, decl: &ClassDecl) -> Option<TypeId> {
        self.lookup(&Self::declared_key(namespace, &decl.name, decl.generic_params.len()))
    }

    fn declared_key(namespace: &str, name: &str, arity: usize) -> String {
        let mut key = String::new();
        if !namespace.is_empty() {
            key.push_str(namespace);
            key.push('.');
        }
        key.push_str(name);
        if arity > 0 {
            key.push('`');
            key.push_str(&arity.to_string());
        }
        key
    }

    // ------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------

    /// Qualified generic name: namespace, name, and backtick arity.
    /// This is the strategy-registry key format.
    pub fn qualified_name(&self, id: TypeId) -> String {
        let sym = self.type_(id);
        match sym.kind {
            TypeKind::Array => {
                let element = sym.element.expect("array symbol has an element");
                format!("{}[]", self.qualified_name(element))
            }
            TypeKind::TypeParameter => sym.name.clone(),
            _ => Self::declared_key(&sym.namespace, &sym.name, sym.type_params.len()),
        }
    }

    /// Identifier with concrete generic arguments in angle brackets, fully
    /// qualified and recursively formatted. Used directly in generated source.
    pub fn display_name(&self, id: TypeId) -> String {
        let sym = self.type_(id);
        match sym.kind {
            TypeKind::Array => {
                let element = sym.element.expect("array symbol has an element");
                format!("{}[]", self.display_name(element))
            }
            TypeKind::TypeParameter => sym.name.clone(),
            _ => {
                let mut out = String::new();
                if !sym.namespace.is_empty() {
                    out.push_str(&sym.namespace);
                    out.push('.');
                }
                out.push_str(&sym.name);
                if !sym.type_args.is_empty() {
                    let args: Vec<String> = sym
                        .type_args
                        .iter()
                        .map(|&a| self.display_name(a))
                        .collect();
                    out.push('<');
                    out.push_str(&args.join(", "));
                    out.push('>');
                } else if !sym.type_params.is_empty() {
                    let params: Vec<String> = sym
                        .type_params
                        .iter()
                        .map(|&p| self.type_(p).name.clone())
                        .collect();
                    out.push('<');
                    out.push_str(&params.join(", "));
                    out.push('>');
                }
                out
            }
        }
    }

    // ------------------------------------------------------------------
    // Member enumeration and predicates
    // ------------------------------------------------------------------

    /// Members of the type plus members of the direct base type and all
    /// implemented interfaces whose names do not already appear in the
    /// primary set. Static members are excluded. De-duplication is by name
    /// only, which can hide a differently-shaped base overload; that
    /// coarseness is part of the contract.
    pub fn enumerate_members(&self, id: TypeId) -> Vec<&MemberSymbol> {
        let sym = self.type_(id);
        let mut out: Vec<&MemberSymbol> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for member in &sym.members {
            if member.is_static() {
                continue;
            }
            if let Some(name) = member.name() {
                seen.insert(name);
            }
            out.push(member);
        }

        let mut sources: Vec<TypeId> = Vec::new();
        sources.extend(sym.base);
        sources.extend(sym.interfaces.iter().copied());
        for source in sources {
            for member in &self.type_(source).members {
                if member.is_static() {
                    continue;
                }
                let Some(name) = member.name() else {
                    continue;
                };
                if seen.insert(name) {
                    out.push(member);
                }
            }
        }
        out
    }

    /// True iff any enumerated instance method matches by name and, when
    /// `params` is given, by each parameter's qualified name in order.
    pub fn has_method(&self, id: TypeId, name: &str, params: Option<&[&str]>) -> bool {
        self.enumerate_members(id).iter().any(|member| {
            let MemberSymbol::Method(method) = member else {
                return false;
            };
            if method.name != name {
                return false;
            }
            match params {
                None => true,
                Some(want) => {
                    method.params.len() == want.len()
                        && method
                            .params
                            .iter()
                            .zip(want.iter())
                            .all(|(&p, w)| self.qualified_name(p) == *w)
                }
            }
        })
    }

    /// True iff the type declares a constructor whose parameters match the
    /// given qualified names in order.
    pub fn has_ctor(&self, id: TypeId, params: &[&str]) -> bool {
        self.type_(id).members.iter().any(|member| {
            let MemberSymbol::Constructor(ctor) = member else {
                return false;
            };
            ctor.params.len() == params.len()
                && ctor
                    .params
                    .iter()
                    .zip(params.iter())
                    .all(|(&p, w)| self.qualified_name(p) == *w)
        })
    }

    pub fn is_primitive(&self, id: TypeId) -> bool {
        self.type_(id).kind == TypeKind::Primitive
    }

    pub fn is_marked_serializable(&self, id: TypeId) -> bool {
        self.type_(id).has_attribute("Serializable")
    }

    /// `Some(inner)` when the type is `Nullable<T>`.
    pub fn nullable_inner(&self, id: TypeId) -> Option<TypeId> {
        let sym = self.type_(id);
        (sym.type_args.len() == 1 && self.qualified_name(id) == well_known::NULLABLE)
            .then(|| sym.type_args[0])
    }

    /// The `T` of the canonical lazy sequence interface, either because the
    /// type *is* `IEnumerable<T>` or because it implements it.
    pub fn enumerable_element(&self, id: TypeId) -> Option<TypeId> {
        if let Some(element) = self.exact_enumerable_element(id) {
            return Some(element);
        }
        self.type_(id)
            .interfaces
            .iter()
            .find_map(|&i| self.exact_enumerable_element(i))
    }

    /// `Some(T)` only when the type is exactly `IEnumerable<T>` itself.
    pub fn exact_enumerable_element(&self, id: TypeId) -> Option<TypeId> {
        let sym = self.type_(id);
        (sym.type_args.len() == 1 && self.qualified_name(id) == well_known::ENUMERABLE)
            .then(|| sym.type_args[0])
    }

    /// True iff the type declares a constructor taking `IEnumerable<element>`.
    pub fn has_enumerable_ctor(&self, id: TypeId, element: TypeId) -> bool {
        self.type_(id).members.iter().any(|member| {
            let MemberSymbol::Constructor(ctor) = member else {
                return false;
            };
            ctor.params.len() == 1 && self.exact_enumerable_element(ctor.params[0]) == Some(element)
        })
    }

    // ------------------------------------------------------------------
    // Construction: instantiation, arrays, nullables
    // ------------------------------------------------------------------

    fn add(&mut self, sym: TypeSymbol) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(sym);
        id
    }

    fn register(&mut self, id: TypeId) {
        let sym = self.type_(id);
        let key = Self::declared_key(&sym.namespace, &sym.name, sym.type_params.len());
        let simple = Self::declared_key("", &sym.name, sym.type_params.len());
        self.by_qualified.insert(key, id);
        self.by_simple.entry(simple).or_default().push(id);
    }

    fn add_param(&mut self, name: &str) -> TypeId {
        self.add(TypeSymbol::new(name, "", TypeKind::TypeParameter))
    }

    /// Instantiate a generic definition with concrete arguments, interning
    /// the result. Bases, interfaces, and member signatures are substituted
    /// eagerly, so predicates on instantiated types need no extra context.
    pub fn instantiate(&mut self, definition: TypeId, args: Vec<TypeId>) -> TypeId {
        debug_assert_eq!(self.type_(definition).type_params.len(), args.len());
        if let Some(&id) = self.instantiations.get(&(definition, args.clone())) {
            return id;
        }

        let def = self.type_(definition).clone();
        let mut shell = TypeSymbol::new(def.name.clone(), def.namespace.clone(), def.kind);
        shell.type_params = def.type_params.clone();
        shell.type_args = args.clone();
        shell.definition = Some(definition);
        shell.attributes = def.attributes.clone();
        shell.is_reference = def.is_reference;
        shell.location = def.location.clone();
        let id = self.add(shell);
        self.instantiations.insert((definition, args.clone()), id);

        let map: HashMap<TypeId, TypeId> = def
            .type_params
            .iter()
            .copied()
            .zip(args.iter().copied())
            .collect();

        let base = def.base.map(|b| self.substitute(b, &map));
        let interfaces: Vec<TypeId> = def
            .interfaces
            .iter()
            .map(|&i| self.substitute(i, &map))
            .collect();
        let members: Vec<MemberSymbol> = def
            .members
            .iter()
            .map(|m| self.substitute_member(m, &map))
            .collect();

        let sym = &mut self.types[id.0 as usize];
        sym.base = base;
        sym.interfaces = interfaces;
        sym.members = members;
        id
    }

    fn substitute(&mut self, id: TypeId, map: &HashMap<TypeId, TypeId>) -> TypeId {
        if let Some(&mapped) = map.get(&id) {
            return mapped;
        }
        let sym = self.type_(id);
        match sym.kind {
            TypeKind::Array => {
                let element = sym.element.expect("array symbol has an element");
                let substituted = self.substitute(element, map);
                if substituted == element {
                    id
                } else {
                    self.array_of(substituted)
                }
            }
            _ if !sym.type_args.is_empty() => {
                let definition = sym.definition.expect("instantiated type has a definition");
                let args = sym.type_args.clone();
                let substituted: Vec<TypeId> =
                    args.iter().map(|&a| self.substitute(a, map)).collect();
                if substituted == args {
                    id
                } else {
                    self.instantiate(definition, substituted)
                }
            }
            _ => id,
        }
    }

    fn substitute_member(&mut self, member: &MemberSymbol, map: &HashMap<TypeId, TypeId>) -> MemberSymbol {
        match member {
            MemberSymbol::Property(p) => {
                let mut p = p.clone();
                p.ty = self.substitute(p.ty, map);
                MemberSymbol::Property(p)
            }
            MemberSymbol::Method(m) => {
                let mut m = m.clone();
                m.params = m.params.iter().map(|&p| self.substitute(p, map)).collect();
                MemberSymbol::Method(m)
            }
            MemberSymbol::Constructor(c) => {
                let mut c = c.clone();
                c.params = c.params.iter().map(|&p| self.substitute(p, map)).collect();
                MemberSymbol::Constructor(c)
            }
        }
    }

    /// The array type over `element`, interned.
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.arrays.get(&element) {
            return id;
        }
        let name = format!("{}[]", self.type_(element).name);
        let mut sym = TypeSymbol::new(name, "", TypeKind::Array);
        sym.element = Some(element);
        let id = self.add(sym);
        self.arrays.insert(element, id);
        id
    }

    /// `Nullable<inner>`, interned.
    pub fn nullable_of(&mut self, inner: TypeId) -> TypeId {
        let def = self
            .lookup(well_known::NULLABLE)
            .expect("Nullable`1 is seeded");
        self.instantiate(def, vec![inner])
    }

    // ------------------------------------------------------------------
    // Binding
    // ------------------------------------------------------------------

    /// Bind all declarations of a unit into the model. Returns the ids of
    /// the class-like types declared, in source order.
    pub fn bind_unit(&mut self, unit: &SourceUnit) -> Result<Vec<TypeId>, BindError> {
        let mut classes: Vec<(String, &ClassDecl)> = Vec::new();
        let mut enums: Vec<(String, &EnumDecl)> = Vec::new();
        collect_declarations(&unit.declarations, "", &mut classes, &mut enums);

        // First pass: shells, so members can reference any declared type.
        let mut class_ids = Vec::with_capacity(classes.len());
        for (namespace, decl) in &classes {
            let key = Self::declared_key(namespace, &decl.name, decl.generic_params.len());
            if self.by_qualified.contains_key(&key) {
                return Err(BindError::DuplicateType {
                    name: key,
                    location: decl.location.clone(),
                });
            }
            let kind = match decl.kind_word.as_str() {
                "struct" => TypeKind::Struct,
                "interface" => TypeKind::Interface,
                _ => TypeKind::Class,
            };
            let mut sym = TypeSymbol::new(decl.name.clone(), namespace.clone(), kind);
            sym.type_params = decl
                .generic_params
                .iter()
                .map(|p| self.add_param(p))
                .collect();
            sym.attributes = decl
                .attributes
                .iter()
                .map(|a| AttributeSymbol {
                    name: a.name.clone(),
                    arguments: a.arguments.clone(),
                    location: a.location.clone(),
                })
                .collect();
            sym.location = decl.location.clone();
            let id = self.add(sym);
            self.register(id);
            class_ids.push(id);
        }
        for (namespace, decl) in &enums {
            let key = Self::declared_key(namespace, &decl.name, 0);
            if self.by_qualified.contains_key(&key) {
                return Err(BindError::DuplicateType {
                    name: key,
                    location: decl.location.clone(),
                });
            }
            let mut sym = TypeSymbol::new(decl.name.clone(), namespace.clone(), TypeKind::Enum);
            sym.attributes = decl
                .attributes
                .iter()
                .map(|a| AttributeSymbol {
                    name: a.name.clone(),
                    arguments: a.arguments.clone(),
                    location: a.location.clone(),
                })
                .collect();
            sym.location = decl.location.clone();
            let id = self.add(sym);
            self.register(id);
        }

        // Second pass: bases and members.
        for (&id, (namespace, decl)) in class_ids.iter().zip(classes.iter()) {
            self.bind_class_body(id, namespace, decl)?;
        }
        Ok(class_ids)
    }

    fn bind_class_body(
        &mut self,
        id: TypeId,
        namespace: &str,
        decl: &ClassDecl,
    ) -> Result<(), BindError> {
        let params: Vec<(String, TypeId)> = decl
            .generic_params
            .iter()
            .cloned()
            .zip(self.type_(id).type_params.iter().copied())
            .collect();
        let scope = TypeScope::with_params(namespace, params);

        let mut base = None;
        let mut interfaces = Vec::new();
        for base_syntax in &decl.base_types {
            let resolved = self.resolve_type(base_syntax, &scope)?;
            if self.type_(resolved).kind == TypeKind::Interface {
                interfaces.push(resolved);
            } else if base.is_none() {
                base = Some(resolved);
            }
        }

        let mut members = Vec::with_capacity(decl.members.len());
        for member in &decl.members {
            members.push(self.bind_member(member, &scope)?);
        }

        let sym = &mut self.types[id.0 as usize];
        sym.base = base;
        sym.interfaces = interfaces;
        sym.members = members;
        Ok(())
    }

    fn bind_member(
        &mut self,
        member: &MemberSyntax,
        scope: &TypeScope<'_>,
    ) -> Result<MemberSymbol, BindError> {
        Ok(match member {
            MemberSyntax::Property(p) => {
                let ty = self.resolve_type(&p.ty, scope)?;
                MemberSymbol::Property(PropertySymbol {
                    name: p.name.clone(),
                    ty,
                    accessibility: accessibility_of(&p.modifiers),
                    has_getter: p.has_getter,
                    has_setter: p.has_setter,
                    is_indexer: p.is_indexer,
                    is_static: p.modifiers.contains(&Modifier::Static),
                    attributes: p
                        .attributes
                        .iter()
                        .map(|a| AttributeSymbol {
                            name: a.name.clone(),
                            arguments: a.arguments.clone(),
                            location: a.location.clone(),
                        })
                        .collect(),
                    location: p.location.clone(),
                })
            }
            MemberSyntax::Method(m) => {
                let mut params = Vec::with_capacity(m.params.len());
                for param in &m.params {
                    params.push(self.resolve_type(&param.ty, scope)?);
                }
                MemberSymbol::Method(MethodSymbol {
                    name: m.name.clone(),
                    params,
                    is_static: m.modifiers.contains(&Modifier::Static),
                    location: m.location.clone(),
                })
            }
            MemberSyntax::Ctor(c) => {
                let mut params = Vec::with_capacity(c.params.len());
                for param in &c.params {
                    params.push(self.resolve_type(&param.ty, scope)?);
                }
                MemberSymbol::Constructor(ConstructorSymbol {
                    params,
                    location: c.location.clone(),
                })
            }
        })
    }

    /// Resolve a type reference against the scope: generic parameters first,
    /// then keyword aliases, then an exact qualified name, then the current
    /// namespace, then a unique simple-name match across all known types.
    pub fn resolve_type(
        &mut self,
        syntax: &TypeSyntax,
        scope: &TypeScope<'_>,
    ) -> Result<TypeId, BindError> {
        let arity = syntax.args.len();
        let base = self.resolve_base_name(&syntax.name, arity, scope, &syntax.location)?;

        let expected = self.type_(base).type_params.len();
        if expected != arity {
            return Err(BindError::ArityMismatch {
                name: syntax.name.clone(),
                expected,
                actual: arity,
                location: syntax.location.clone(),
            });
        }

        let mut id = if arity > 0 {
            let mut args = Vec::with_capacity(arity);
            for arg in &syntax.args {
                args.push(self.resolve_type(arg, scope)?);
            }
            self.instantiate(base, args)
        } else {
            base
        };
        if syntax.nullable {
            id = self.nullable_of(id);
        }
        for _ in 0..syntax.array_dims {
            id = self.array_of(id);
        }
        Ok(id)
    }

    fn resolve_base_name(
        &self,
        name: &str,
        arity: usize,
        scope: &TypeScope<'_>,
        location: &Location,
    ) -> Result<TypeId, BindError> {
        if arity == 0 && !name.contains('.') {
            if let Some(id) = scope.param(name) {
                return Ok(id);
            }
            if let Some(&id) = self.aliases.get(name) {
                return Ok(id);
            }
        }
        if name.contains('.') {
            let key = Self::declared_key("", name, arity);
            return self.by_qualified.get(&key).copied().ok_or_else(|| {
                BindError::UnknownType {
                    name: name.to_string(),
                    location: location.clone(),
                }
            });
        }
        let in_namespace = Self::declared_key(scope.namespace, name, arity);
        if let Some(&id) = self.by_qualified.get(&in_namespace) {
            return Ok(id);
        }
        let simple = Self::declared_key("", name, arity);
        match self.by_simple.get(&simple).map(Vec::as_slice) {
            Some([id]) => Ok(*id),
            Some([_, ..]) => Err(BindError::AmbiguousType {
                name: name.to_string(),
                location: location.clone(),
            }),
            _ => Err(BindError::UnknownType {
                name: name.to_string(),
                location: location.clone(),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Built-in universe
    // ------------------------------------------------------------------

    fn seed_builtins(&mut self) {
        const VALUE_PRIMITIVES: &[(&str, &str)] = &[
            ("bool", "Boolean"),
            ("byte", "Byte"),
            ("sbyte", "SByte"),
            ("short", "Int16"),
            ("ushort", "UInt16"),
            ("int", "Int32"),
            ("uint", "UInt32"),
            ("long", "Int64"),
            ("ulong", "UInt64"),
            ("float", "Single"),
            ("double", "Double"),
            ("char", "Char"),
        ];
        for &(keyword, name) in VALUE_PRIMITIVES {
            let id = self.add(TypeSymbol::new(name, "System", TypeKind::Primitive));
            self.register(id);
            self.aliases.insert(keyword, id);
        }
        for &(keyword, name) in &[("string", "String"), ("object", "Object")] {
            let mut sym = TypeSymbol::new(name, "System", TypeKind::Primitive);
            sym.is_reference = true;
            let id = self.add(sym);
            self.register(id);
            self.aliases.insert(keyword, id);
        }

        let int32 = self.lookup("System.Int32").expect("Int32 is seeded");
        let int64 = self.lookup("System.Int64").expect("Int64 is seeded");

        for (name, namespace, kind) in [
            ("DateTime", "System", TypeKind::Struct),
            ("TimeSpan", "System", TypeKind::Struct),
            ("IDisposable", "System", TypeKind::Interface),
            ("BinaryWriter", "System.IO", TypeKind::Class),
            ("BinaryReader", "System.IO", TypeKind::Class),
        ] {
            let id = self.add(TypeSymbol::new(name, namespace, kind));
            self.register(id);
        }
        // DateTime/TimeSpan reconstruct from ticks.
        for name in ["System.DateTime", "System.TimeSpan"] {
            let id = self.lookup(name).expect("seeded");
            self.types[id.0 as usize].members = vec![
                builtin_prop("Ticks", int64),
                MemberSymbol::Constructor(ConstructorSymbol {
                    params: vec![int64],
                    location: Location::none(),
                }),
            ];
        }

        // IEnumerable<T>
        let enumerable_def = {
            let t = self.add_param("T");
            let mut sym = TypeSymbol::new("IEnumerable", "System.Collections.Generic", TypeKind::Interface);
            sym.type_params = vec![t];
            let id = self.add(sym);
            self.register(id);
            id
        };

        // Nullable<T>
        {
            let t = self.add_param("T");
            let mut sym = TypeSymbol::new("Nullable", "System", TypeKind::Struct);
            sym.type_params = vec![t];
            let id = self.add(sym);
            self.register(id);
        }

        // KeyValuePair<TKey, TValue>
        {
            let k = self.add_param("TKey");
            let v = self.add_param("TValue");
            let mut sym = TypeSymbol::new("KeyValuePair", "System.Collections.Generic", TypeKind::Struct);
            sym.type_params = vec![k, v];
            sym.members = vec![
                builtin_prop("Key", k),
                builtin_prop("Value", v),
                MemberSymbol::Constructor(ConstructorSymbol {
                    params: vec![k, v],
                    location: Location::none(),
                }),
            ];
            let id = self.add(sym);
            self.register(id);
        }

        // Tuple`1 .. Tuple`7
        for arity in 1..=7usize {
            let params: Vec<TypeId> = (1..=arity)
                .map(|i| self.add_param(&format!("T{i}")))
                .collect();
            let mut sym = TypeSymbol::new("Tuple", "System", TypeKind::Class);
            sym.type_params = params.clone();
            sym.members = params
                .iter()
                .enumerate()
                .map(|(i, &p)| builtin_prop(&format!("Item{}", i + 1), p))
                .collect();
            sym.members.push(MemberSymbol::Constructor(ConstructorSymbol {
                params,
                location: Location::none(),
            }));
            let id = self.add(sym);
            self.register(id);
        }

        // List<T>
        {
            let t = self.add_param("T");
            let enumerable_t = self.instantiate(enumerable_def, vec![t]);
            let mut sym = TypeSymbol::new("List", "System.Collections.Generic", TypeKind::Class);
            sym.type_params = vec![t];
            sym.interfaces = vec![enumerable_t];
            sym.members = vec![
                builtin_prop("Count", int32),
                builtin_method("Add", vec![t]),
                MemberSymbol::Constructor(ConstructorSymbol {
                    params: vec![],
                    location: Location::none(),
                }),
                MemberSymbol::Constructor(ConstructorSymbol {
                    params: vec![enumerable_t],
                    location: Location::none(),
                }),
            ];
            let id = self.add(sym);
            self.register(id);
        }

        // HashSet<T>
        {
            let t = self.add_param("T");
            let enumerable_t = self.instantiate(enumerable_def, vec![t]);
            let mut sym = TypeSymbol::new("HashSet", "System.Collections.Generic", TypeKind::Class);
            sym.type_params = vec![t];
            sym.interfaces = vec![enumerable_t];
            sym.members = vec![
                builtin_prop("Count", int32),
                builtin_method("Add", vec![t]),
                MemberSymbol::Constructor(ConstructorSymbol {
                    params: vec![],
                    location: Location::none(),
                }),
                MemberSymbol::Constructor(ConstructorSymbol {
                    params: vec![enumerable_t],
                    location: Location::none(),
                }),
            ];
            let id = self.add(sym);
            self.register(id);
        }

        // Dictionary<TKey, TValue>
        {
            let k = self.add_param("TKey");
            let v = self.add_param("TValue");
            let kvp_def = self
                .lookup(well_known::KEY_VALUE_PAIR)
                .expect("KeyValuePair`2 is seeded");
            let kvp = self.instantiate(kvp_def, vec![k, v]);
            let enumerable_kvp = self.instantiate(enumerable_def, vec![kvp]);
            let mut sym = TypeSymbol::new("Dictionary", "System.Collections.Generic", TypeKind::Class);
            sym.type_params = vec![k, v];
            sym.interfaces = vec![enumerable_kvp];
            sym.members = vec![
                builtin_prop("Count", int32),
                builtin_method("Add", vec![k, v]),
                MemberSymbol::Constructor(ConstructorSymbol {
                    params: vec![],
                    location: Location::none(),
                }),
            ];
            let id = self.add(sym);
            self.register(id);
        }
    }
}

impl Default for SemanticModel {
    fn default() -> Self {
        Self::new()
    }
}

fn accessibility_of(modifiers: &[Modifier]) -> Accessibility {
    for m in modifiers {
        match m {
            Modifier::Private => return Accessibility::Private,
            Modifier::Protected => return Accessibility::Protected,
            Modifier::Internal => return Accessibility::Internal,
            Modifier::Public => return Accessibility::Public,
            _ => {}
        }
    }
    // Unannotated members default to public so declaration fragments read
    // the way they serialize.
    Accessibility::Public
}

fn builtin_prop(name: &str, ty: TypeId) -> MemberSymbol {
    MemberSymbol::Property(PropertySymbol {
        name: name.to_string(),
        ty,
        accessibility: Accessibility::Public,
        has_getter: true,
        has_setter: true,
        is_indexer: false,
        is_static: false,
        attributes: Vec::new(),
        location: Location::none(),
    })
}

fn builtin_method(name: &str, params: Vec<TypeId>) -> MemberSymbol {
    MemberSymbol::Method(MethodSymbol {
        name: name.to_string(),
        params,
        is_static: false,
        location: Location::none(),
    })
}

fn collect_declarations<'a>(
    declarations: &'a [Declaration],
    namespace: &str,
    classes: &mut Vec<(String, &'a ClassDecl)>,
    enums: &mut Vec<(String, &'a EnumDecl)>,
) {
    for decl in declarations {
        match decl {
            Declaration::Namespace(ns) => {
                let nested = if namespace.is_empty() {
                    ns.name.clone()
                } else {
                    format!("{namespace}.{}", ns.name)
                };
                collect_declarations(&ns.declarations, &nested, classes, enums);
            }
            Declaration::Class(c) => classes.push((namespace.to_string(), c)),
            Declaration::Enum(e) => enums.push((namespace.to_string(), e)),
        }
    }
}

#[cfg(test)]
#[path = "semantic/semantic_tests.rs"]
mod semantic_tests;
