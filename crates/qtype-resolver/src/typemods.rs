//! Argument type modifiers.
//!
//! A front end has to know whether an argument is passed as a set before it
//! compiles that argument, which is before its type is known. So this pass
//! matches candidates on shape only.

use crate::call::ArgSlot;
use crate::errors::ResolutionError;
use crate::resolver::Resolver;
use crate::shape::match_shape;
use qtype_catalog::{Fixity, QualName, TypeModifier};
use tracing::trace;

impl Resolver<'_> {
    /// The modifier for each argument slot: `positional` positional slots,
    /// then `named` in call-site order.
    ///
    /// A slot that is `SetOf` in one candidate and not in another is
    /// ambiguous. `Single` mixed with `Optional` collapses to `Optional`.
    /// With no candidate at all every slot is `Single`; resolution reports
    /// the real error later.
    pub fn argument_typemods(
        &self,
        name: &str,
        fixity: Fixity,
        positional: usize,
        named: &[&str],
    ) -> Result<Vec<(ArgSlot, TypeModifier)>, ResolutionError> {
        let mut slots: Vec<(ArgSlot, TypeModifier)> = (0..positional)
            .map(ArgSlot::Positional)
            .chain(named.iter().map(|&n| ArgSlot::Named(n.to_string())))
            .map(|slot| (slot, TypeModifier::Single))
            .collect();
        let mut seen: Vec<Option<TypeModifier>> = vec![None; slots.len()];

        for signature in self.overloads(name, fixity) {
            let Some(shape) = match_shape(signature, positional, named.iter().copied()) else {
                continue;
            };
            for (arg, &param_index) in shape.slots.iter().enumerate() {
                let modifier = signature.params[param_index].qualifier.type_modifier();
                let merged = match seen[arg] {
                    None => modifier,
                    Some(prev) if prev == modifier => prev,
                    Some(prev) if prev == TypeModifier::SetOf || modifier == TypeModifier::SetOf => {
                        return Err(ResolutionError::AmbiguousTypeModifier {
                            name: QualName::new(name),
                            fixity,
                            slot: slots[arg].0.to_string(),
                        });
                    }
                    Some(_) => TypeModifier::Optional,
                };
                seen[arg] = Some(merged);
            }
        }

        for ((_, modifier), seen) in slots.iter_mut().zip(seen) {
            if let Some(seen) = seen {
                *modifier = seen;
            }
        }
        trace!(name = name, slots = ?slots, "Resolver::argument_typemods");
        Ok(slots)
    }
}

#[cfg(test)]
#[path = "../tests/typemods_tests.rs"]
mod tests;
