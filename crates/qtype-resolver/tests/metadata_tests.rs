use super::*;
use crate::fixtures::{std_catalog, ty};

#[test]
fn test_volatility_is_the_maximum() {
    let catalog = std_catalog();
    let resolver = Resolver::new(&catalog);
    let int64 = ty(&catalog, "std::int64");

    let plus = resolver
        .resolve_positional("std::+", Fixity::Infix, &[int64, int64])
        .unwrap();
    assert_eq!(volatility_of(&plus, &[]), Volatility::Immutable);
    assert_eq!(
        volatility_of(&plus, &[Volatility::Immutable, Volatility::Stable]),
        Volatility::Stable
    );

    let random = resolver
        .resolve_positional("std::random", Fixity::Function, &[])
        .unwrap();
    assert_eq!(volatility_of(&random, &[]), Volatility::Volatile);

    let stable = resolver
        .resolve_positional("std::datetime_of_statement", Fixity::Function, &[])
        .unwrap();
    assert_eq!(
        volatility_of(&stable, &[Volatility::Immutable]),
        Volatility::Stable
    );
}

#[test]
fn test_metadata_links_resolve_lazily() {
    let catalog = std_catalog();
    let eq = catalog.lookup("std::=", Fixity::Infix).next().unwrap();
    let meta = metadata_of(&catalog, eq);

    let commutator = meta.commutator.unwrap();
    assert_eq!(commutator.name.as_str(), "std::=");
    assert_eq!(commutator.overloads().count(), 2);

    let negator = meta.negator.unwrap();
    assert_eq!(negator.name.as_str(), "std::!=");
    assert_eq!(negator.fixity, Fixity::Infix);
    assert_eq!(negator.overloads().count(), 1);

    assert!(meta.derivative_of.is_none());
    assert!(!meta.recursive);
}

#[test]
fn test_recursive_flag_is_surfaced() {
    let catalog = qtype_catalog::Catalog::builder()
        .scalar("std::bool", &[])
        .placeholder("anytuple", qtype_catalog::Placeholder::AnyTuple)
        .signature(
            qtype_catalog::SignatureDecl::infix("std::=", "std::bool")
                .arg("l", "anytuple")
                .arg("r", "anytuple")
                .recursive(),
        )
        .build()
        .unwrap();
    let eq = catalog.lookup("std::=", Fixity::Infix).next().unwrap();
    assert!(metadata_of(&catalog, eq).recursive);
}

#[test]
fn test_commutator_swaps_operands() {
    let catalog = std_catalog();
    let resolver = Resolver::new(&catalog);
    let int64 = ty(&catalog, "std::int64");
    let float64 = ty(&catalog, "std::float64");

    let lt = resolver
        .resolve_positional("std::<", Fixity::Infix, &[int64, float64])
        .unwrap();
    let gt = resolver.resolve_commutator(&lt).unwrap().unwrap();
    assert_eq!(gt.name.as_str(), "std::>");
    assert_eq!(
        gt.positional_types().collect::<Vec<_>>(),
        vec![float64, int64]
    );
    assert_eq!(gt.rank(), lt.rank());
}

#[test]
fn test_negator_keeps_operands() {
    let catalog = std_catalog();
    let resolver = Resolver::new(&catalog);
    let int32 = ty(&catalog, "std::int32");
    let int64 = ty(&catalog, "std::int64");

    let eq = resolver
        .resolve_positional("std::=", Fixity::Infix, &[int32, int64])
        .unwrap();
    let ne = resolver.resolve_negator(&eq).unwrap().unwrap();
    assert_eq!(ne.name.as_str(), "std::!=");
    assert_eq!(ne.positional_types().collect::<Vec<_>>(), vec![int32, int64]);

    // The negator has no str overload.
    let str_ = ty(&catalog, "std::str");
    let eq_str = resolver
        .resolve_positional("std::=", Fixity::Infix, &[str_, str_])
        .unwrap();
    assert!(matches!(
        resolver.resolve_negator(&eq_str),
        Some(Err(ResolutionError::NoMatchingOverload { .. }))
    ));
}

#[test]
fn test_missing_links_are_none() {
    let catalog = std_catalog();
    let resolver = Resolver::new(&catalog);
    let int64 = ty(&catalog, "std::int64");

    let plus = resolver
        .resolve_positional("std::+", Fixity::Infix, &[int64, int64])
        .unwrap();
    assert!(resolver.resolve_commutator(&plus).is_none());
    assert!(resolver.resolve_negator(&plus).is_none());
}
