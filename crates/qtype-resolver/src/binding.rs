//! Type variable binding.
//!
//! A `Unifier` lives for one candidate of one resolution. Type variables are
//! the generic placeholders and, in parameter and return positions, abstract
//! scalars; an abstract scalar only binds to a concrete type below it. Each
//! variable binds to exactly one type. A later occurrence may keep the binding or
//! widen it to a type the binding implicitly reaches; two incomparable
//! argument types are a conflict. No common supertype is ever invented.

use crate::call::Bindings;
use qtype_catalog::{Catalog, ContainerKind, Placeholder, Tier, TypeId, TypeKind};
use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BindFailure {
    /// The argument cannot stand in for the parameter at all.
    Infeasible,
    /// The placeholder already holds a type incomparable with `offending`.
    Conflict {
        placeholder: TypeId,
        bound: TypeId,
        offending: TypeId,
    },
}

pub(crate) struct Unifier<'a> {
    catalog: &'a Catalog,
    bindings: Bindings,
}

impl<'a> Unifier<'a> {
    pub(crate) fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            bindings: Bindings::default(),
        }
    }

    pub(crate) fn into_bindings(self) -> Bindings {
        self.bindings
    }

    /// Bind every type variable mentioned by `param` against `arg`.
    pub(crate) fn bind(&mut self, param: TypeId, arg: TypeId) -> Result<(), BindFailure> {
        let catalog = self.catalog;
        let types = catalog.types();
        if !types.is_polymorphic(param) {
            return Ok(());
        }
        if types.is_polymorphic(arg) {
            return Err(BindFailure::Infeasible);
        }

        match types.kind(param) {
            TypeKind::Generic(placeholder) => {
                if !self.satisfies(placeholder, arg) {
                    return Err(BindFailure::Infeasible);
                }
                self.unify(param, arg)
            }
            TypeKind::Abstract => {
                if !types.is_subtype(arg, param) {
                    return Err(BindFailure::Infeasible);
                }
                self.unify(param, arg)
            }
            TypeKind::Container(kind) => {
                let (expected, actual) = (types.node(param), types.node(arg));
                if types.kind(arg) != TypeKind::Container(kind)
                    || expected.elements.len() != actual.elements.len()
                {
                    return Err(BindFailure::Infeasible);
                }
                for (&p, &a) in expected.elements.iter().zip(&actual.elements) {
                    self.bind(p, a)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn satisfies(&self, placeholder: Placeholder, arg: TypeId) -> bool {
        let kind = self.catalog.types().kind(arg);
        match placeholder {
            Placeholder::AnyType => true,
            Placeholder::AnyTuple => kind.container() == Some(ContainerKind::Tuple),
            Placeholder::AnyObject => kind == TypeKind::Object,
        }
    }

    fn unify(&mut self, placeholder: TypeId, arg: TypeId) -> Result<(), BindFailure> {
        let Some(bound) = self.bindings.get(placeholder) else {
            self.bindings.set(placeholder, arg);
            return Ok(());
        };
        if bound == arg {
            return Ok(());
        }

        let catalog = self.catalog;
        let types = catalog.types();
        if types.is_subtype(arg, bound) || catalog.reachable(arg, bound, Tier::Implicit) {
            return Ok(());
        }
        if types.is_subtype(bound, arg) || catalog.reachable(bound, arg, Tier::Implicit) {
            trace!(
                placeholder = %types.name(placeholder),
                from = %types.name(bound),
                to = %types.name(arg),
                "Unifier::unify widened"
            );
            self.bindings.set(placeholder, arg);
            return Ok(());
        }

        Err(BindFailure::Conflict {
            placeholder,
            bound,
            offending: arg,
        })
    }

    /// Substitute bindings into `ty`. `None` if a placeholder is unbound or
    /// the instantiated container is not registered. An unbound abstract
    /// scalar stays as declared.
    pub(crate) fn instantiate(&self, ty: TypeId) -> Option<TypeId> {
        let types = self.catalog.types();
        if !types.is_polymorphic(ty) {
            return Some(ty);
        }
        match types.kind(ty) {
            TypeKind::Generic(_) => self.bindings.get(ty),
            TypeKind::Abstract => Some(self.bindings.get(ty).unwrap_or(ty)),
            TypeKind::Container(kind) => {
                let elements = types
                    .node(ty)
                    .elements
                    .iter()
                    .map(|&element| self.instantiate(element))
                    .collect::<Option<Vec<_>>>()?;
                let instantiated = types.container(kind, &elements);
                if instantiated.is_none() {
                    trace!(
                        container = %types.name(ty),
                        elements = %types.display_list(&elements),
                        "Unifier::instantiate unregistered instantiation"
                    );
                }
                instantiated
            }
            _ => Some(ty),
        }
    }
}

#[cfg(test)]
#[path = "../tests/binding_tests.rs"]
mod tests;
