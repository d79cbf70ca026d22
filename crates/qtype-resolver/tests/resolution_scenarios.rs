//! End-to-end resolution against a catalog loaded from JSON, including
//! concurrent resolution and snapshot replacement.

use qtype_catalog::{Catalog, CatalogBuilder, Fixity, SharedCatalog, Tier};
use qtype_resolver::{CallSite, MatchRank, ResolutionError, Resolver, volatility_of};
use rayon::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn numeric_json(with_int16: bool) -> String {
    let mut types = vec![
        json!({ "name": "anytype", "kind": "anytype" }),
        json!({ "name": "std::anyscalar", "kind": "abstract" }),
        json!({ "name": "std::anyreal", "kind": "abstract", "extends": ["std::anyscalar"] }),
        json!({ "name": "std::anyint", "kind": "abstract", "extends": ["std::anyreal"] }),
        json!({ "name": "std::int32", "kind": "concrete", "extends": ["std::anyint"] }),
        json!({ "name": "std::int64", "kind": "concrete", "extends": ["std::anyint"] }),
        json!({ "name": "std::str", "kind": "concrete", "extends": ["std::anyscalar"] }),
        json!({ "name": "std::bool", "kind": "concrete", "extends": ["std::anyscalar"] }),
        json!({ "name": "default::opaque", "kind": "concrete", "extends": ["std::anyscalar"] }),
    ];
    let mut casts = vec![
        json!({ "from": "std::int32", "to": "std::int64", "tier": "implicit" }),
        json!({ "from": "std::int64", "to": "std::str", "tier": "explicit" }),
        json!({ "from": "std::str", "to": "std::int64", "tier": "explicit" }),
    ];
    if with_int16 {
        types.push(json!({ "name": "std::int16", "kind": "concrete", "extends": ["std::anyint"] }));
        casts.push(json!({ "from": "std::int16", "to": "std::int32", "tier": "implicit" }));
    }

    json!({
        "types": types,
        "casts": casts,
        "signatures": [
            { "name": "std::+", "fixity": "infix", "returns": "std::int64",
              "params": [ { "name": "l", "type": "std::int64" },
                          { "name": "r", "type": "std::int64" } ] },
            { "name": "std::=", "fixity": "infix", "returns": "std::bool",
              "commutator": "std::=",
              "params": [ { "name": "l", "type": "std::anyscalar" },
                          { "name": "r", "type": "std::anyscalar" } ] },
            { "name": "std::=", "fixity": "infix", "returns": "std::bool",
              "commutator": "std::=",
              "params": [ { "name": "l", "type": "std::int64" },
                          { "name": "r", "type": "std::int64" } ] },
            { "name": "std::min", "returns": "anytype", "return_modifier": "optional",
              "fallback": true,
              "params": [ { "name": "vals", "type": "anytype", "qualifier": "setof" } ] },
            { "name": "std::min", "returns": "std::anyreal", "return_modifier": "optional",
              "params": [ { "name": "vals", "type": "std::anyreal", "qualifier": "setof" } ] },
            { "name": "std::random", "returns": "std::int64", "volatility": "volatile" }
        ]
    })
    .to_string()
}

fn load(with_int16: bool) -> Catalog {
    Catalog::from_json(&numeric_json(with_int16)).unwrap()
}

#[test]
fn json_catalog_resolves_like_builder_catalog() {
    qtype_common::init_tracing();
    let catalog = load(false);
    let int32 = catalog.type_id("std::int32").unwrap();
    let int64 = catalog.type_id("std::int64").unwrap();
    let resolver = Resolver::new(&catalog);

    let call = resolver
        .resolve_positional("std::+", Fixity::Infix, &[int32, int64])
        .unwrap();
    assert_eq!(
        call.rank().as_slice(),
        &[MatchRank::ImplicitCast, MatchRank::Exact]
    );

    let eq = resolver
        .resolve_positional("std::=", Fixity::Infix, &[int64, int64])
        .unwrap();
    assert_eq!(eq.rank().as_slice(), &[MatchRank::Exact, MatchRank::Exact]);

    let str_ = catalog.type_id("std::str").unwrap();
    assert!(matches!(
        resolver.resolve_positional("std::=", Fixity::Infix, &[int32, str_]),
        Err(ResolutionError::NoMatchingOverload { .. })
    ));
}

#[test]
fn json_catalog_fallback_and_volatility() {
    let catalog = load(false);
    let opaque = catalog.type_id("default::opaque").unwrap();
    let int32 = catalog.type_id("std::int32").unwrap();
    let resolver = Resolver::new(&catalog);

    let min_int = resolver
        .resolve(
            "std::min",
            Fixity::Function,
            &CallSite::new([int32]),
        )
        .unwrap();
    assert_eq!(min_int.return_type, int32);

    let min_opaque = resolver
        .resolve_positional("std::min", Fixity::Function, &[opaque])
        .unwrap();
    assert_eq!(min_opaque.return_type, opaque);

    let random = resolver
        .resolve_positional("std::random", Fixity::Function, &[])
        .unwrap();
    assert_eq!(
        volatility_of(&random, &[]),
        qtype_catalog::Volatility::Volatile
    );
}

#[test]
fn explicit_round_trip_is_not_a_cycle() {
    let catalog = load(false);
    let int64 = catalog.type_id("std::int64").unwrap();
    let str_ = catalog.type_id("std::str").unwrap();

    assert!(catalog.reachable(int64, str_, Tier::Explicit));
    assert!(catalog.reachable(str_, int64, Tier::Explicit));
    assert!(!catalog.reachable(int64, str_, Tier::Implicit));
}

#[test]
fn parallel_resolution_is_consistent() {
    let catalog = load(true);
    let int16 = catalog.type_id("std::int16").unwrap();
    let int64 = catalog.type_id("std::int64").unwrap();
    let str_ = catalog.type_id("std::str").unwrap();
    let resolver = Resolver::new(&catalog);

    let expected = resolver.resolve_positional("std::+", Fixity::Infix, &[int16, int64]);
    assert!(expected.is_ok());
    let all_same = (0..256).into_par_iter().all(|i| {
        let args = if i % 2 == 0 { [int16, int64] } else { [str_, int64] };
        let result = resolver.resolve_positional("std::+", Fixity::Infix, &args);
        if i % 2 == 0 {
            result == expected
        } else {
            matches!(result, Err(ResolutionError::NoMatchingOverload { .. }))
        }
    });
    assert!(all_same);
}

#[test]
fn in_flight_snapshot_survives_reload() {
    let shared = SharedCatalog::new(load(false));
    let before = shared.snapshot();
    assert!(before.type_id("std::int16").is_none());

    let builder = CatalogBuilder::from_json(&numeric_json(true)).unwrap();
    let previous = shared.reload(builder).unwrap();
    assert!(Arc::ptr_eq(&before, &previous));

    let after = shared.snapshot();
    let int16 = after.type_id("std::int16").unwrap();
    let int64 = after.type_id("std::int64").unwrap();
    assert!(
        Resolver::new(&after)
            .resolve_positional("std::+", Fixity::Infix, &[int16, int64])
            .is_ok()
    );
    // The old snapshot still resolves with its own lattice.
    let int32 = before.type_id("std::int32").unwrap();
    assert!(
        Resolver::new(&before)
            .resolve_positional("std::+", Fixity::Infix, &[int32, int32])
            .is_ok()
    );
}
