//! # Dispatch Proxy
//!
//! A [`Dispatcher`] stands in for a contract. Every call takes a fresh
//! context snapshot, resolves the contract again and forwards to the winning
//! candidate. Nothing is cached between calls: the active billing plan or
//! region may change while the process runs, and a cached decision would
//! keep routing to the old candidate.
//!
//! Contract traits annotated with `#[switchyard::contract]` get an
//! implementation for `Dispatcher<dyn Trait>` whose methods resolve through
//! [`Dispatcher::resolve`] and forward to the winner, so callers use the
//! dispatcher exactly like any other implementation of the trait.

use switchyard_core::{Candidate, ContextProvider, Contract, ResolveError, Resolver};
use std::{fmt, sync::Arc};

/// The caller-facing proxy for contract `C`.
///
/// Cheap to clone; clones share the candidate list and the provider.
pub struct Dispatcher<C: Contract + ?Sized> {
    candidates: Arc<[Candidate<C>]>,
    provider: Arc<dyn ContextProvider>,
    resolver: Resolver,
}

impl<C: Contract + ?Sized> Dispatcher<C> {
    pub(crate) fn new(
        candidates: Arc<[Candidate<C>]>,
        provider: Arc<dyn ContextProvider>,
        resolver: Resolver,
    ) -> Self {
        Self {
            candidates,
            provider,
            resolver,
        }
    }

    /// Resolve the candidate for the current context.
    pub fn resolve_candidate(&self) -> Result<&Candidate<C>, ResolveError> {
        let context = self.provider.current_context();
        let resolved = self.resolver.resolve(C::NAME, &self.candidates, &context);

        #[cfg(feature = "tracing")]
        match &resolved {
            Ok(candidate) => tracing::trace!(
                contract = C::NAME,
                candidate = candidate.name(),
                %context,
                "resolved candidate"
            ),
            Err(error) => tracing::debug!(contract = C::NAME, %error, "resolution failed"),
        }

        resolved
    }

    /// Resolve the implementation for the current context.
    pub fn resolve(&self) -> Result<&C, ResolveError> {
        self.resolve_candidate().map(Candidate::implementation)
    }

    /// Run `call` against the implementation selected for the current context.
    ///
    /// The value returned by `call` is passed back unchanged.
    pub fn invoke<R>(&self, call: impl FnOnce(&C) -> R) -> Result<R, ResolveError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("dispatch", contract = C::NAME).entered();

        self.resolve().map(call)
    }

    /// Run a fallible `call` against the selected implementation.
    ///
    /// Resolution failures are converted into the call's own error type, so
    /// the caller sees one `Result` carrying either kind of failure. The
    /// implementation's result, success or error, is returned unchanged.
    pub fn try_invoke<T, E>(&self, call: impl FnOnce(&C) -> Result<T, E>) -> Result<T, E>
    where
        E: From<ResolveError>,
    {
        self.invoke(call)?
    }

    /// The candidates this dispatcher chooses from, in registration order.
    pub fn candidates(&self) -> &[Candidate<C>] {
        &self.candidates
    }
}

impl<C: Contract + ?Sized> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            candidates: Arc::clone(&self.candidates),
            provider: Arc::clone(&self.provider),
            resolver: self.resolver,
        }
    }
}

impl<C: Contract + ?Sized> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.candidates.iter().map(Candidate::name).collect();
        f.debug_struct("Dispatcher")
            .field("contract", &C::NAME)
            .field("candidates", &names)
            .field("policy", &self.resolver.policy())
            .finish_non_exhaustive()
    }
}
