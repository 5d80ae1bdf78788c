//! # switchyard - Runtime Contract Resolution
//!
//! `switchyard` routes calls on a service contract to one of several
//! implementations, chosen on every call from the current runtime context
//! (active billing plan, active region, ...). Callers hold the contract; they
//! never name an implementation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use switchyard::prelude::*;
//!
//! #[switchyard::contract]
//! pub trait FooService {
//!     fn get_some(&self) -> Result<String, BoxError>;
//! }
//!
//! struct FooService1;
//! impl FooService for FooService1 { ... }
//! struct FooService2;
//! impl FooService for FooService2 { ... }
//!
//! let registry = RegistryBuilder::new()
//!     .register(<dyn FooService>::candidate("one", FooService1).when(Predicate::billing(["BILLING1"])))?
//!     .register(<dyn FooService>::candidate("two", FooService2).when(Predicate::billing(["BILLING2"])))?
//!     .build();
//!
//! let context = SharedContext::new();
//! let foo: Dispatcher<dyn FooService> = registry.dispatcher(context.clone())?;
//!
//! context.set(Dimension::BILLING, "BILLING2");
//! foo.get_some()?; // served by FooService2
//! ```
//!
//! ## Failure policy
//!
//! A call fails with [`ResolveError`] when no candidate matches the context,
//! or when several do under the default [`AmbiguityPolicy::Reject`]. There
//! is no fallback implementation and no retry.

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use switchyard_core::{
    // Resolution
    AmbiguityPolicy,
    // Error types
    BoxError,
    // Model
    Candidate,
    ConfigurationError,
    // Context
    ContextProvider,
    Contract,
    Dimension,
    Predicate,
    ResolutionContext,
    ResolveError,
    Resolver,
    SwitchyardError,
};

// Registry and dispatch
pub use switchyard_std::{
    dispatch::Dispatcher,
    registry::{Registry, RegistryBuilder},
};

/// Standard context providers.
pub mod providers {
    pub use switchyard_std::providers::{FixedContext, FnContext, SharedContext};
}

pub use providers::{FixedContext, FnContext, SharedContext};

/// Link-time candidate collection.
#[cfg(feature = "inventory")]
pub mod collected {
    pub use switchyard_std::collected::CandidateRegistration;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use switchyard_std::testing::*;
}

/// Prelude module - common imports for Switchyard.
///
/// # Usage
///
/// ```rust,ignore
/// use switchyard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AmbiguityPolicy, BoxError, Candidate, ConfigurationError, ContextProvider, Contract,
        Dimension, Dispatcher, FixedContext, FnContext, Predicate, Registry, RegistryBuilder,
        ResolutionContext, ResolveError, SharedContext,
    };
}

#[cfg(feature = "macros")]
pub use switchyard_macros::contract;

#[cfg(feature = "inventory")]
pub use inventory;
