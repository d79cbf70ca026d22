//! Arity matching: which parameter absorbs which call-site argument.
//!
//! Types play no part here, so the same pass serves both resolution and
//! type-modifier discovery.

use crate::call::VariadicSpan;
use qtype_catalog::Signature;
use qtype_common::limits::INLINE_CALL_ARGS;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ShapeMatch {
    /// Parameter index for each argument, in `CallSite::args` order.
    pub slots: SmallVec<[usize; INLINE_CALL_ARGS]>,
    pub defaulted: SmallVec<[usize; 2]>,
    pub variadic: Option<VariadicSpan>,
}

/// Map `positional` arguments and the `named` arguments (call-site order)
/// onto `signature`'s parameters, or `None` if the parameter list cannot
/// absorb the call.
pub(crate) fn match_shape<'n>(
    signature: &Signature,
    positional: usize,
    named: impl IntoIterator<Item = &'n str>,
) -> Option<ShapeMatch> {
    let mut slots = SmallVec::new();
    let mut defaulted = SmallVec::new();

    let fixed: SmallVec<[usize; INLINE_CALL_ARGS]> = signature
        .positional()
        .filter(|(_, p)| !p.is_variadic())
        .map(|(i, _)| i)
        .collect();
    let variadic = signature.variadic().map(|(i, _)| i);

    for arg in 0..positional {
        match fixed.get(arg) {
            Some(&index) => slots.push(index),
            None => slots.push(variadic?),
        }
    }
    for &index in fixed.iter().skip(positional) {
        if !signature.params[index].has_default {
            return None;
        }
        defaulted.push(index);
    }

    let mut used = SmallVec::<[usize; 2]>::new();
    for name in named {
        let index = signature
            .params
            .iter()
            .position(|p| p.named_only && p.name == name)?;
        used.push(index);
        slots.push(index);
    }
    for (index, param) in signature.params.iter().enumerate() {
        if param.named_only && !used.contains(&index) {
            if !param.has_default {
                return None;
            }
            defaulted.push(index);
        }
    }

    let variadic = variadic.map(|param_index| VariadicSpan {
        param_index,
        first_arg: fixed.len().min(positional),
        count: positional.saturating_sub(fixed.len()),
    });

    Some(ShapeMatch {
        slots,
        defaulted,
        variadic,
    })
}

#[cfg(test)]
#[path = "../tests/shape_tests.rs"]
mod tests;
