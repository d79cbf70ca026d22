//! Two-pass catalog loader.
//!
//! Pass 1 declares every type node so that later references may point
//! forward. Containers are declared once all of their element types exist.
//! Pass 2 attaches supertypes, cast edges and signatures, resolving every
//! name; a name that never resolves is `CatalogError::UnknownTypeReference`.
//! Finally the cast graph is frozen and metadata references are checked.
//!
//! Any error aborts the whole load. There is no partially built `Catalog`.

use crate::casts::CastGraph;
use crate::catalog::Catalog;
use crate::decl::{CastDecl, CatalogDecl, KindDecl, SignatureDecl, TypeDecl};
use crate::errors::CatalogError;
use crate::name::QualName;
use crate::registry::TypeRegistry;
use crate::signatures::{Parameter, Signature, SignatureId, SignatureMeta, SignatureTable};
use crate::types::{ContainerKind, Placeholder, Tier, TypeId, TypeKind};
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    decl: CatalogDecl,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_decl(decl: CatalogDecl) -> Self {
        Self { decl }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::from_decl(serde_json::from_str(json)?))
    }

    pub fn decl(&self) -> &CatalogDecl {
        &self.decl
    }

    pub fn type_decl(mut self, decl: TypeDecl) -> Self {
        self.decl.types.push(decl);
        self
    }

    fn simple_type(self, name: &str, kind: KindDecl, extends: &[&str]) -> Self {
        self.type_decl(TypeDecl {
            name: QualName::new(name),
            kind,
            extends: extends.iter().map(|&n| QualName::new(n)).collect(),
            elements: Vec::new(),
        })
    }

    pub fn abstract_type(self, name: &str, extends: &[&str]) -> Self {
        self.simple_type(name, KindDecl::Abstract, extends)
    }

    pub fn scalar(self, name: &str, extends: &[&str]) -> Self {
        self.simple_type(name, KindDecl::Concrete, extends)
    }

    pub fn object(self, name: &str, extends: &[&str]) -> Self {
        self.simple_type(name, KindDecl::Object, extends)
    }

    pub fn placeholder(self, name: &str, placeholder: Placeholder) -> Self {
        let kind = match placeholder {
            Placeholder::AnyType => KindDecl::AnyType,
            Placeholder::AnyTuple => KindDecl::AnyTuple,
            Placeholder::AnyObject => KindDecl::AnyObject,
        };
        self.simple_type(name, kind, &[])
    }

    pub fn container(self, name: &str, kind: ContainerKind, elements: &[&str]) -> Self {
        let kind = match kind {
            ContainerKind::Array => KindDecl::Array,
            ContainerKind::Tuple => KindDecl::Tuple,
            ContainerKind::Range => KindDecl::Range,
            ContainerKind::Multirange => KindDecl::Multirange,
        };
        self.type_decl(TypeDecl {
            name: QualName::new(name),
            kind,
            extends: Vec::new(),
            elements: elements.iter().map(|&n| QualName::new(n)).collect(),
        })
    }

    pub fn cast(mut self, from: &str, to: &str, tier: Tier) -> Self {
        self.decl.casts.push(CastDecl {
            from: QualName::new(from),
            to: QualName::new(to),
            tier,
        });
        self
    }

    pub fn implicit_cast(self, from: &str, to: &str) -> Self {
        self.cast(from, to, Tier::Implicit)
    }

    pub fn signature(mut self, decl: SignatureDecl) -> Self {
        self.decl.signatures.push(decl);
        self
    }

    /// Resolve all names and produce an immutable catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let CatalogDecl {
            types: type_decls,
            casts: cast_decls,
            signatures: signature_decls,
        } = self.decl;

        let mut types = TypeRegistry::new();

        // Pass 1: nodes.
        let mut containers = Vec::new();
        for decl in &type_decls {
            match TypeKind::from(decl.kind) {
                TypeKind::Container(kind) => containers.push((decl, kind)),
                kind => {
                    types.declare(decl.name.clone(), kind)?;
                }
            }
        }
        declare_containers(&mut types, containers)?;

        // Pass 2: edges and signatures.
        for decl in &type_decls {
            let child = resolve(&types, &decl.name, "type declarations")?;
            let parents = decl
                .extends
                .iter()
                .map(|name| resolve(&types, name, &format!("supertypes of '{}'", decl.name)))
                .collect::<Result<Vec<_>, _>>()?;
            types.extend(child, &parents)?;
        }

        let mut casts = CastGraph::new();
        for decl in &cast_decls {
            let context = format!("cast '{}' -> '{}'", decl.from, decl.to);
            let from = resolve(&types, &decl.from, &context)?;
            let to = resolve(&types, &decl.to, &context)?;
            casts.add_cast(&types, from, to, decl.tier)?;
        }
        casts.freeze(&types)?;

        let mut signatures = SignatureTable::new();
        for decl in signature_decls {
            signatures.insert(lower_signature(&types, decl)?)?;
        }
        signatures.validate_references()?;

        debug!(
            types = types.len(),
            casts = casts.len(),
            signatures = signatures.len(),
            "CatalogBuilder::build"
        );
        Ok(Catalog::from_parts(types, casts, signatures))
    }
}

fn resolve(types: &TypeRegistry, name: &QualName, context: &str) -> Result<TypeId, CatalogError> {
    types
        .lookup(name.as_str())
        .ok_or_else(|| CatalogError::UnknownTypeReference {
            name: name.clone(),
            context: context.to_string(),
        })
}

/// Declare containers once their elements exist; containers may nest in any
/// declaration order.
fn declare_containers(
    types: &mut TypeRegistry,
    mut pending: Vec<(&TypeDecl, ContainerKind)>,
) -> Result<(), CatalogError> {
    while !pending.is_empty() {
        let mut deferred = Vec::new();
        let mut progressed = false;

        for (decl, kind) in pending {
            let elements: Option<Vec<TypeId>> = decl
                .elements
                .iter()
                .map(|name| types.lookup(name.as_str()))
                .collect();
            match elements {
                Some(elements) => {
                    types.declare_container(decl.name.clone(), kind, elements)?;
                    progressed = true;
                }
                None => deferred.push((decl, kind)),
            }
        }

        if !progressed {
            if let Some((decl, _)) = deferred.first() {
                let missing = decl
                    .elements
                    .iter()
                    .find(|name| types.lookup(name.as_str()).is_none())
                    .unwrap_or(&decl.name);
                return Err(CatalogError::UnknownTypeReference {
                    name: missing.clone(),
                    context: format!("elements of '{}'", decl.name),
                });
            }
        }
        pending = deferred;
    }
    Ok(())
}

fn lower_signature(types: &TypeRegistry, decl: SignatureDecl) -> Result<Signature, CatalogError> {
    let context = format!("signature '{}'", decl.name);
    let params = decl
        .params
        .into_iter()
        .map(|param| {
            Ok(Parameter {
                ty: resolve(types, &param.ty, &context)?,
                name: param.name,
                qualifier: param.qualifier,
                named_only: param.named_only,
                has_default: param.has_default,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;
    let return_type = resolve(types, &decl.returns, &context)?;

    Ok(Signature {
        id: SignatureId(0),
        name: decl.name,
        fixity: decl.fixity,
        params,
        return_type,
        return_modifier: decl.return_modifier,
        meta: SignatureMeta {
            volatility: decl.volatility,
            commutator: decl.commutator,
            negator: decl.negator,
            derivative_of: decl.derivative_of,
            recursive: decl.recursive,
            fallback: decl.fallback,
            is_singleton_set_of: decl.is_singleton_set_of,
            is_abstract: decl.is_abstract,
        },
        backend: decl.backend,
    })
}

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod tests;
