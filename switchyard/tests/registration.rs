//! Registration-time validation and registry lookups.

use switchyard::{
    ConfigurationError, Dispatcher, FixedContext, Predicate, RegistryBuilder, ResolveError,
    SwitchyardError,
};

mod common;
use common::{
    FooService, FooService1, FooService2, FooServiceRu, FooServiceWorld, Greeting, Pricing,
    billing, disjoint_registry,
};

#[test]
fn test_region_candidates_cannot_join_a_billing_contract() {
    let err = RegistryBuilder::new()
        .register(<dyn FooService>::candidate("one", FooService1).when(Predicate::billing(["BILLING1"])))
        .unwrap()
        .register(<dyn FooService>::candidate("ru", FooServiceRu).when(Predicate::region(["RU"])))
        .err()
        .unwrap();

    assert_eq!(
        err,
        ConfigurationError::MixedDimensions {
            contract: "com.demo.app.FooService",
            candidate: "ru",
            expected: vec!["billing".to_string()],
            found: vec!["region".to_string()],
        }
    );
}

#[test]
fn test_region_only_contract_is_accepted() {
    let registry = RegistryBuilder::new()
        .register(<dyn FooService>::candidate("ru", FooServiceRu).when(Predicate::region(["RU"])))
        .unwrap()
        .register(
            <dyn FooService>::candidate("world", FooServiceWorld).when(Predicate::region(["WORLD"])),
        )
        .unwrap()
        .build();

    let foo: Dispatcher<dyn FooService> =
        registry.dispatcher(FixedContext::single("region", "world")).unwrap();
    assert_eq!(foo.get_some().unwrap(), "a value from FooServiceWorld");
}

#[test]
fn test_duplicate_candidate_name_is_rejected() {
    let err = RegistryBuilder::new()
        .register(<dyn FooService>::candidate("one", FooService1).when(Predicate::billing(["BILLING1"])))
        .unwrap()
        .register(<dyn FooService>::candidate("one", FooService2).when(Predicate::billing(["BILLING2"])))
        .err()
        .unwrap();

    assert!(matches!(
        err,
        ConfigurationError::DuplicateCandidate {
            candidate: "one",
            ..
        }
    ));
}

#[test]
fn test_same_name_in_different_contracts_is_allowed() {
    let registry = RegistryBuilder::new()
        .register(<dyn FooService>::candidate("ru", FooServiceRu).when(Predicate::region(["RU"])))
        .unwrap()
        .register(
            <dyn Greeting>::candidate("ru", common::RegionalGreeting { salutation: "Privet" })
                .when(Predicate::region(["RU"])),
        )
        .unwrap()
        .build();

    assert_eq!(registry.len(), 2);
}

#[test]
fn test_empty_predicate_is_rejected() {
    let err = RegistryBuilder::new()
        .register(
            <dyn FooService>::candidate("never", FooService1)
                .when(Predicate::billing(Vec::<String>::new())),
        )
        .err()
        .unwrap();

    assert_eq!(
        err.to_string(),
        "candidate `never` of contract `com.demo.app.FooService` has a predicate on `billing` that accepts no values"
    );
}

#[test]
fn test_unregistered_contract_is_not_found() {
    let registry = disjoint_registry().unwrap();

    assert!(registry.contains::<dyn FooService>());
    assert!(!registry.contains::<dyn Pricing>());

    let err = registry
        .dispatcher::<dyn Pricing, _>(FixedContext::new(billing("BILLING1")))
        .unwrap_err();
    assert_eq!(err, ResolveError::NotFound { contract: "Pricing" });
    assert_eq!(err.context(), None);

    assert!(registry.candidates_for::<dyn Pricing>().is_err());
}

#[test]
fn test_candidates_keep_registration_order() {
    let registry = disjoint_registry().unwrap();

    let names: Vec<_> = registry
        .candidates_for::<dyn FooService>()
        .unwrap()
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(names, vec!["one", "two", "failing"]);
}

#[test]
fn test_errors_convert_into_the_crate_error() {
    fn build() -> Result<switchyard::Registry, SwitchyardError> {
        Ok(RegistryBuilder::new()
            .register(<dyn FooService>::candidate("one", FooService1).when(Predicate::billing(["B"])))?
            .register(<dyn FooService>::candidate("one", FooService2).when(Predicate::billing(["C"])))?
            .build())
    }

    assert!(matches!(build(), Err(SwitchyardError::Configuration(_))));
}

#[test]
fn test_builder_counts_registrations() {
    let mut builder = RegistryBuilder::new();
    assert!(builder.is_empty());

    builder
        .register_mut(<dyn FooService>::candidate("one", FooService1).when(Predicate::billing(["B1"])))
        .unwrap();
    builder
        .register_mut(<dyn FooService>::candidate("two", FooService2).when(Predicate::billing(["B2"])))
        .unwrap();

    assert_eq!(builder.len(), 2);
    let registry = builder.build();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.contracts(), vec!["com.demo.app.FooService"]);
}
