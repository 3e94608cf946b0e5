//! Property filter: which members of a candidate participate in
//! serialization, and in which directions.

use wiregen_symbols::{Accessibility, MemberSymbol, PropertySymbol, SemanticModel, TypeId};

/// One property selected for serialization.
#[derive(Debug, Clone)]
pub struct PropertyPlan {
    pub property: PropertySymbol,
    /// The *Force* attribute was present.
    pub forced: bool,
    /// Packed but not read back (read-only under *Force*, or `Ignore(Read)`).
    pub skip_read: bool,
    /// Read back but not packed (`Ignore(Write)`, or write-only under *Force*).
    pub skip_write: bool,
}

/// Select the properties of `ty` that participate in serialization, in wire
/// order: own members in declaration order, then inherited members.
/// Inherited members are included only when the base is not itself
/// serializable, since a serializable base packs its own members through its
/// own methods.
pub fn filter_properties(model: &SemanticModel, ty: TypeId) -> Vec<PropertyPlan> {
    let sym = model.type_(ty);
    let base_serializable = sym
        .base
        .map(|b| model.is_marked_serializable(b))
        .unwrap_or(false);

    let members: Vec<&MemberSymbol> = if base_serializable {
        sym.members.iter().filter(|m| !m.is_static()).collect()
    } else {
        model.enumerate_members(ty)
    };

    let mut plans = Vec::new();
    for member in members {
        let MemberSymbol::Property(property) = member else {
            continue;
        };

        let mut skip_read = false;
        let mut skip_write = false;
        if let Some(ignore) = property.attribute("Ignore") {
            match ignore_flags(ignore.arguments.as_deref()) {
                (true, true) => continue,
                (read, write) => {
                    skip_read = read;
                    skip_write = write;
                }
            }
        }

        let forced = property.has_attribute("Force");
        if !forced {
            let eligible = property.accessibility == Accessibility::Public
                && !property.is_indexer
                && property.has_getter
                && property.has_setter;
            if !eligible {
                continue;
            }
        }
        // A slot without a setter cannot be read back; one without a getter
        // cannot be packed.
        skip_read |= !property.has_setter;
        skip_write |= !property.has_getter;

        plans.push(PropertyPlan {
            property: property.clone(),
            forced,
            skip_read,
            skip_write,
        });
    }
    plans
}

/// `(skip_read, skip_write)` for an *Ignore* attribute. A bare `[Ignore]`
/// skips both directions; `[Ignore(Read)]` / `[Ignore(Write)]` skip one.
fn ignore_flags(arguments: Option<&str>) -> (bool, bool) {
    let Some(args) = arguments else {
        return (true, true);
    };
    let lowered = args.to_lowercase();
    let read = lowered.contains("read");
    let write = lowered.contains("write");
    if read || write {
        (read, write)
    } else {
        (true, true)
    }
}
