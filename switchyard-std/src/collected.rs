//! # Link-time Candidate Collection
//!
//! Candidates can be declared next to their implementation with
//! `inventory::submit!` instead of being listed in one wiring function.
//! Each declaration is an explicit [`CandidateRegistration`]: the contract,
//! the candidate name and a function performing the registration with its
//! predicates. Nothing is inferred from the implementation type.
//!
//! # Example
//!
//! ```rust,ignore
//! struct FooService2;
//! impl FooService for FooService2 { ... }
//!
//! fn register_two(builder: &mut RegistryBuilder) -> Result<(), ConfigurationError> {
//!     builder.register_mut(
//!         <dyn FooService>::candidate("two", FooService2).when(Predicate::billing(["BILLING2"])),
//!     )
//! }
//!
//! inventory::submit! {
//!     CandidateRegistration::new("FooService", "two", register_two)
//! }
//!
//! let registry = RegistryBuilder::new().collect()?.build();
//! ```

use crate::registry::RegistryBuilder;
use switchyard_core::ConfigurationError;

/// Registration entry for a candidate in the global collection.
///
/// This struct is submitted to `inventory` for automatic collection.
pub struct CandidateRegistration {
    /// The contract name, used for ordering.
    pub contract: &'static str,
    /// The candidate name, used for ordering.
    pub candidate: &'static str,
    /// Performs the registration.
    pub install: fn(&mut RegistryBuilder) -> Result<(), ConfigurationError>,
}

impl CandidateRegistration {
    /// Create a registration entry.
    pub const fn new(
        contract: &'static str,
        candidate: &'static str,
        install: fn(&mut RegistryBuilder) -> Result<(), ConfigurationError>,
    ) -> Self {
        Self {
            contract,
            candidate,
            install,
        }
    }
}

inventory::collect!(CandidateRegistration);

impl RegistryBuilder {
    /// Apply every [`CandidateRegistration`] submitted in the program.
    ///
    /// Link order is unspecified, so registrations are applied sorted by
    /// contract name, then candidate name. That order is the registration
    /// order seen by the resolver.
    pub fn collect(mut self) -> Result<Self, ConfigurationError> {
        let mut registrations: Vec<&CandidateRegistration> =
            inventory::iter::<CandidateRegistration>.into_iter().collect();
        registrations.sort_by_key(|r| (r.contract, r.candidate));

        for registration in registrations {
            #[cfg(feature = "tracing")]
            {
                tracing::trace!(
                    contract = registration.contract,
                    candidate = registration.candidate,
                    "applying collected registration"
                );
            }
            (registration.install)(&mut self)?;
        }
        Ok(self)
    }

    /// Get the number of submitted registrations.
    pub fn collected_count() -> usize {
        inventory::iter::<CandidateRegistration>.into_iter().count()
    }
}
