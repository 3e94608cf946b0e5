//! Default strategies for well-known composite types.
//!
//! A strategy is a pack/unpack emitter pair registered under the composite's
//! qualified generic name. Element types inside a strategy recurse through
//! the ordinary write/read emitters, so e.g. a `Tuple<string, List<int>>`
//! composes out of the string and sequence rules.

use std::collections::HashMap;

use wiregen_symbols::{well_known, Location, PropertySymbol, TypeId};

use crate::emit::Emitter;

/// One emission site handed to a strategy: the property being generated for
/// (diagnostics), the concrete composite type, the left-hand expression, the
/// lexical prefix for locals, and the diagnostic location.
pub struct StrategySite<'a> {
    pub property: &'a PropertySymbol,
    pub ty: TypeId,
    pub expr: &'a str,
    pub prefix: &'a str,
    pub location: &'a Location,
}

pub type StrategyFn = fn(&mut Emitter<'_>, &StrategySite<'_>);

/// A pack/unpack emitter pair for one composite family.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub pack: StrategyFn,
    pub unpack: StrategyFn,
}

/// Registry from qualified generic name to strategy.
pub struct StrategyRegistry {
    map: HashMap<String, Strategy>,
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// The default wire contract: key/value pairs, tick-based date-time and
    /// time-span, and tuples of arity 1 through 7.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(
            well_known::KEY_VALUE_PAIR,
            Strategy {
                pack: pack_key_value_pair,
                unpack: unpack_key_value_pair,
            },
        );
        registry.register(
            well_known::DATE_TIME,
            Strategy {
                pack: pack_ticks,
                unpack: unpack_date_time,
            },
        );
        registry.register(
            well_known::TIME_SPAN,
            Strategy {
                pack: pack_ticks,
                unpack: unpack_time_span,
            },
        );
        for arity in 1..=7 {
            registry.register(
                well_known::tuple(arity),
                Strategy {
                    pack: pack_tuple,
                    unpack: unpack_tuple,
                },
            );
        }
        registry
    }

    pub fn register(&mut self, key: impl Into<String>, strategy: Strategy) {
        self.map.insert(key.into(), strategy);
    }

    pub fn get(&self, key: &str) -> Option<&Strategy> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ----------------------------------------------------------------------
// KeyValuePair<K, V>: key then value.
// ----------------------------------------------------------------------

fn pack_key_value_pair(em: &mut Emitter<'_>, site: &StrategySite<'_>) {
    let (key, value) = pair_args(em, site.ty);
    em.emit_pack(
        site.property,
        key,
        &format!("{}.Key", site.expr),
        site.location,
        false,
    );
    em.emit_pack(
        site.property,
        value,
        &format!("{}.Value", site.expr),
        site.location,
        false,
    );
}

fn unpack_key_value_pair(em: &mut Emitter<'_>, site: &StrategySite<'_>) {
    let (key, value) = pair_args(em, site.ty);
    let key_temp = format!("{}KeyTemp", site.prefix);
    let value_temp = format!("{}ValueTemp", site.prefix);
    declare_default(em, key, &key_temp);
    em.emit_unpack(site.property, key, &key_temp, site.location, false);
    declare_default(em, value, &value_temp);
    em.emit_unpack(site.property, value, &value_temp, site.location, false);
    em.out.line(&format!(
        "{} = new {}({key_temp}, {value_temp});",
        site.expr,
        em.model.display_name(site.ty)
    ));
}

fn pair_args(em: &Emitter<'_>, ty: TypeId) -> (TypeId, TypeId) {
    let args = &em.model.type_(ty).type_args;
    (args[0], args[1])
}

// ----------------------------------------------------------------------
// DateTime / TimeSpan: a 64-bit tick count.
// ----------------------------------------------------------------------

fn pack_ticks(em: &mut Emitter<'_>, site: &StrategySite<'_>) {
    em.out.line(&format!("writer.Write({}.Ticks);", site.expr));
}

fn unpack_date_time(em: &mut Emitter<'_>, site: &StrategySite<'_>) {
    em.out.line(&format!(
        "{} = new System.DateTime(reader.ReadInt64());",
        site.expr
    ));
}

fn unpack_time_span(em: &mut Emitter<'_>, site: &StrategySite<'_>) {
    em.out.line(&format!(
        "{} = new System.TimeSpan(reader.ReadInt64());",
        site.expr
    ));
}

// ----------------------------------------------------------------------
// Tuple`1..7: each item in order, rebuilt through the N-ary constructor.
// ----------------------------------------------------------------------

fn pack_tuple(em: &mut Emitter<'_>, site: &StrategySite<'_>) {
    let args = em.model.type_(site.ty).type_args.clone();
    for (i, item) in args.iter().enumerate() {
        em.emit_pack(
            site.property,
            *item,
            &format!("{}.Item{}", site.expr, i + 1),
            site.location,
            false,
        );
    }
}

fn unpack_tuple(em: &mut Emitter<'_>, site: &StrategySite<'_>) {
    let args = em.model.type_(site.ty).type_args.clone();
    let mut temps = Vec::with_capacity(args.len());
    for (i, item) in args.iter().enumerate() {
        let temp = format!("{}Item{}Temp", site.prefix, i + 1);
        declare_default(em, *item, &temp);
        em.emit_unpack(site.property, *item, &temp, site.location, false);
        temps.push(temp);
    }
    em.out.line(&format!(
        "{} = new {}({});",
        site.expr,
        em.model.display_name(site.ty),
        temps.join(", ")
    ));
}

/// `T name = default(T);`
pub(crate) fn declare_default(em: &mut Emitter<'_>, ty: TypeId, name: &str) {
    let display = em.model.display_name(ty);
    em.out
        .line(&format!("{display} {name} = default({display});"));
}
