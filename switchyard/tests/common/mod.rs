#![allow(dead_code)]

use switchyard::{
    AmbiguityPolicy, BoxError, ConfigurationError, Dimension, Predicate, Registry, RegistryBuilder,
    ResolutionContext, ResolveError,
};

// ============================================================================
// Test Contracts
// ============================================================================

#[switchyard::contract(name = "com.demo.app.FooService")]
pub trait FooService {
    fn get_some(&self) -> Result<String, BoxError>;
}

#[switchyard::contract]
pub trait Greeting {
    fn greet(&self, who: &str) -> Result<String, BoxError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("unknown sku: {0}")]
    UnknownSku(String),
}

#[switchyard::contract]
pub trait Pricing {
    fn price(&self, sku: &str, quantity: u32) -> Result<u64, PricingError>;

    fn currency(&self) -> Result<&str, PricingError>;
}

// ============================================================================
// Test Implementations
// ============================================================================

macro_rules! foo_delegates {
    ($($ty:ident),+ $(,)?) => {$(
        pub struct $ty;

        impl FooService for $ty {
            fn get_some(&self) -> Result<String, BoxError> {
                Ok(format!("a value from {}", stringify!($ty)))
            }
        }
    )+};
}

foo_delegates!(
    FooServiceOld,
    FooService1,
    FooService2,
    FooServiceNew,
    FooServiceRu,
    FooServiceWorld,
);

pub struct FailingFoo;

impl FooService for FailingFoo {
    fn get_some(&self) -> Result<String, BoxError> {
        Err("upstream unavailable".into())
    }
}

pub struct RegionalGreeting {
    pub salutation: &'static str,
}

impl Greeting for RegionalGreeting {
    fn greet(&self, who: &str) -> Result<String, BoxError> {
        Ok(format!("{}, {who}", self.salutation))
    }
}

pub struct PriceList {
    pub currency: String,
    pub unit_price: u64,
}

impl Pricing for PriceList {
    fn price(&self, sku: &str, quantity: u32) -> Result<u64, PricingError> {
        if sku.is_empty() {
            return Err(PricingError::UnknownSku(sku.to_string()));
        }
        Ok(self.unit_price * u64::from(quantity))
    }

    fn currency(&self) -> Result<&str, PricingError> {
        Ok(&self.currency)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn billing(plan: &str) -> ResolutionContext {
    ResolutionContext::new().with(Dimension::BILLING, plan.to_string())
}

pub fn region(name: &str) -> ResolutionContext {
    ResolutionContext::new().with(Dimension::REGION, name.to_string())
}

/// The demo delegate set: `old` overlaps `one` and `two`.
pub fn demo_registry(policy: AmbiguityPolicy) -> Result<Registry, ConfigurationError> {
    Ok(RegistryBuilder::new()
        .with_policy(policy)
        .register(
            <dyn FooService>::candidate("old", FooServiceOld)
                .when(Predicate::billing(["BILLING1", "BILLING2"])),
        )?
        .register(<dyn FooService>::candidate("one", FooService1).when(Predicate::billing(["BILLING1"])))?
        .register(<dyn FooService>::candidate("two", FooService2).when(Predicate::billing(["BILLING2"])))?
        .register(<dyn FooService>::candidate("new", FooServiceNew).when(Predicate::billing(["BILLING3"])))?
        .build())
}

/// One candidate per billing plan, no overlap.
pub fn disjoint_registry() -> Result<Registry, ConfigurationError> {
    Ok(RegistryBuilder::new()
        .register(<dyn FooService>::candidate("one", FooService1).when(Predicate::billing(["BILLING1"])))?
        .register(<dyn FooService>::candidate("two", FooService2).when(Predicate::billing(["BILLING2"])))?
        .register(<dyn FooService>::candidate("failing", FailingFoo).when(Predicate::billing(["FAILING"])))?
        .register(
            <dyn Greeting>::candidate("ru", RegionalGreeting { salutation: "Privet" })
                .when(Predicate::region(["RU"])),
        )?
        .register(
            <dyn Greeting>::candidate("world", RegionalGreeting { salutation: "Hello" })
                .when(Predicate::region(["WORLD"])),
        )?
        .build())
}
