use super::*;
use crate::types::Placeholder;

fn name(text: &str) -> QualName {
    QualName::new(text)
}

#[test]
fn test_simple_inheritance() {
    let mut types = TypeRegistry::new();
    let anyint = types.declare(name("std::anyint"), TypeKind::Abstract).unwrap();
    let int64 = types
        .register(name("std::int64"), TypeKind::Concrete, &[anyint])
        .unwrap();

    assert!(types.is_subtype(int64, anyint));
    assert!(!types.is_subtype(anyint, int64));
    assert_eq!(types.node(int64).supertypes.as_slice(), &[anyint]);
}

#[test]
fn test_subtype_is_reflexive() {
    let mut types = TypeRegistry::new();
    let str_ = types.declare(name("std::str"), TypeKind::Concrete).unwrap();
    assert!(types.is_subtype(str_, str_));
}

#[test]
fn test_transitive_inheritance() {
    let mut types = TypeRegistry::new();
    let anyscalar = types.declare(name("std::anyscalar"), TypeKind::Abstract).unwrap();
    let anyreal = types
        .register(name("std::anyreal"), TypeKind::Abstract, &[anyscalar])
        .unwrap();
    let anyint = types
        .register(name("std::anyint"), TypeKind::Abstract, &[anyreal])
        .unwrap();
    let int16 = types
        .register(name("std::int16"), TypeKind::Concrete, &[anyint])
        .unwrap();

    assert!(types.is_subtype(int16, anyscalar));
    assert!(types.is_subtype(int16, anyreal));
    assert!(!types.is_subtype(anyscalar, int16));
}

#[test]
fn test_edges_added_late_propagate_to_descendants() {
    // Forward references: children are declared and linked before their
    // parent gets its own supertype.
    let mut types = TypeRegistry::new();
    let int64 = types.declare(name("std::int64"), TypeKind::Concrete).unwrap();
    let anyint = types.declare(name("std::anyint"), TypeKind::Abstract).unwrap();
    let anyreal = types.declare(name("std::anyreal"), TypeKind::Abstract).unwrap();

    types.extend(int64, &[anyint]).unwrap();
    types.extend(anyint, &[anyreal]).unwrap();

    assert!(types.is_subtype(int64, anyreal));
}

#[test]
fn test_diamond_inheritance() {
    let mut types = TypeRegistry::new();
    let a = types.declare(name("a"), TypeKind::Abstract).unwrap();
    let b = types.register(name("b"), TypeKind::Abstract, &[a]).unwrap();
    let c = types.register(name("c"), TypeKind::Abstract, &[a]).unwrap();
    let d = types.register(name("d"), TypeKind::Concrete, &[b, c]).unwrap();

    assert!(types.is_subtype(d, a));
    assert!(types.is_subtype(d, b));
    assert!(types.is_subtype(d, c));
    assert_eq!(types.ancestors(d).collect::<Vec<_>>(), vec![a, b, c, d]);
}

#[test]
fn test_cycle_detection() {
    let mut types = TypeRegistry::new();
    let a = types.declare(name("a"), TypeKind::Abstract).unwrap();
    let b = types.register(name("b"), TypeKind::Abstract, &[a]).unwrap();
    let c = types.register(name("c"), TypeKind::Abstract, &[b]).unwrap();

    let err = types.extend(a, &[c]).unwrap_err();
    assert_eq!(
        err,
        CatalogError::Cycle {
            child: name("a"),
            parent: name("c"),
        }
    );
    // The rejected edge left no trace.
    assert!(!types.is_subtype(a, c));
}

#[test]
fn test_self_extension_is_a_cycle() {
    let mut types = TypeRegistry::new();
    let a = types.declare(name("a"), TypeKind::Abstract).unwrap();
    assert!(matches!(
        types.extend(a, &[a]),
        Err(CatalogError::Cycle { .. })
    ));
}

#[test]
fn test_duplicate_type_name() {
    let mut types = TypeRegistry::new();
    types.declare(name("std::str"), TypeKind::Concrete).unwrap();
    assert_eq!(
        types.declare(name("std::str"), TypeKind::Concrete),
        Err(CatalogError::DuplicateType {
            name: name("std::str")
        })
    );
}

#[test]
fn test_common_ancestors() {
    let mut types = TypeRegistry::new();
    let anyscalar = types.declare(name("std::anyscalar"), TypeKind::Abstract).unwrap();
    let anyreal = types
        .register(name("std::anyreal"), TypeKind::Abstract, &[anyscalar])
        .unwrap();
    let anyint = types
        .register(name("std::anyint"), TypeKind::Abstract, &[anyreal])
        .unwrap();
    let anyfloat = types
        .register(name("std::anyfloat"), TypeKind::Abstract, &[anyreal])
        .unwrap();
    let int64 = types
        .register(name("std::int64"), TypeKind::Concrete, &[anyint])
        .unwrap();
    let float64 = types
        .register(name("std::float64"), TypeKind::Concrete, &[anyfloat])
        .unwrap();

    assert_eq!(types.common_ancestors(int64, float64), vec![anyscalar, anyreal]);
    assert_eq!(
        types.common_ancestors(int64, anyint),
        vec![anyscalar, anyreal, anyint]
    );
}

#[test]
fn test_no_common_ancestor() {
    let mut types = TypeRegistry::new();
    let a = types.declare(name("a"), TypeKind::Concrete).unwrap();
    let b = types.declare(name("b"), TypeKind::Concrete).unwrap();
    assert!(types.common_ancestors(a, b).is_empty());
}

#[test]
fn test_containers_are_indexed_by_structure() {
    let mut types = TypeRegistry::new();
    let int64 = types.declare(name("std::int64"), TypeKind::Concrete).unwrap();
    let str_ = types.declare(name("std::str"), TypeKind::Concrete).unwrap();
    let arr = types
        .declare_container(name("array<std::int64>"), ContainerKind::Array, vec![int64])
        .unwrap();
    let tup = types
        .declare_container(
            name("tuple<std::int64, std::str>"),
            ContainerKind::Tuple,
            vec![int64, str_],
        )
        .unwrap();

    assert_eq!(types.container(ContainerKind::Array, &[int64]), Some(arr));
    assert_eq!(types.container(ContainerKind::Tuple, &[int64, str_]), Some(tup));
    assert_eq!(types.container(ContainerKind::Tuple, &[str_, int64]), None);
    assert!(types.node(arr).is_container());

    assert!(matches!(
        types.declare_container(name("int64[]"), ContainerKind::Array, vec![int64]),
        Err(CatalogError::DuplicateType { .. })
    ));
}

#[test]
fn test_polymorphic_propagates_through_containers() {
    let mut types = TypeRegistry::new();
    let anytype = types
        .declare(name("anytype"), TypeKind::Generic(Placeholder::AnyType))
        .unwrap();
    let int64 = types.declare(name("std::int64"), TypeKind::Concrete).unwrap();
    let arr_any = types
        .declare_container(name("array<anytype>"), ContainerKind::Array, vec![anytype])
        .unwrap();
    let arr_int = types
        .declare_container(name("array<std::int64>"), ContainerKind::Array, vec![int64])
        .unwrap();

    assert!(types.is_polymorphic(anytype));
    assert!(types.is_polymorphic(arr_any));
    assert!(!types.is_polymorphic(arr_int));
    assert!(!types.is_polymorphic(int64));
}

#[test]
fn test_abstract_scalars_are_polymorphic() {
    let mut types = TypeRegistry::new();
    let anyint = types.declare(name("std::anyint"), TypeKind::Abstract).unwrap();
    let int64 = types
        .register(name("std::int64"), TypeKind::Concrete, &[anyint])
        .unwrap();
    let arr_anyint = types
        .declare_container(name("array<std::anyint>"), ContainerKind::Array, vec![anyint])
        .unwrap();

    assert!(types.is_polymorphic(anyint));
    assert!(types.is_polymorphic(arr_anyint));
    assert!(!types.is_polymorphic(int64));
    assert!(types.is_subtype(int64, anyint));
}

#[test]
fn test_lookup_and_display() {
    let mut types = TypeRegistry::new();
    let a = types.declare(name("std::int16"), TypeKind::Concrete).unwrap();
    let b = types.declare(name("std::str"), TypeKind::Concrete).unwrap();
    assert_eq!(types.lookup("std::int16"), Some(a));
    assert_eq!(types.lookup("std::missing"), None);
    assert_eq!(types.display_list(&[a, b]), "'std::int16', 'std::str'");
    assert_eq!(types.len(), 2);
}
