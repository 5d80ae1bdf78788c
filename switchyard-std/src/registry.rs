//! Registry of contracts and their candidates.
//!
//! Registration happens once, on a single [`RegistryBuilder`]. Calling
//! [`RegistryBuilder::build`] consumes the builder and freezes the result
//! into an immutable [`Registry`] that can be shared across threads without
//! locking. There is no way to add a candidate to a built registry.

use crate::dispatch::Dispatcher;
use switchyard_core::{
    AmbiguityPolicy, Candidate, ConfigurationError, ContextProvider, Contract, ResolutionContext,
    ResolveError, Resolver,
};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

type Erased = Box<dyn Any + Send + Sync>;

/// Candidates of one contract while the builder is still open.
struct PendingEntry {
    name: &'static str,
    /// A `Vec<Candidate<C>>`.
    candidates: Erased,
    names: Vec<&'static str>,
    /// Turns the `Vec<Candidate<C>>` into an `Arc<[Candidate<C>]>`.
    freeze: fn(Erased) -> Erased,
}

impl PendingEntry {
    fn new<C: Contract + ?Sized>() -> Self {
        Self {
            name: C::NAME,
            candidates: Box::new(Vec::<Candidate<C>>::new()),
            names: Vec::new(),
            freeze: freeze::<C>,
        }
    }

    fn candidates<C: Contract + ?Sized>(&self) -> &Vec<Candidate<C>> {
        self.candidates
            .downcast_ref()
            .expect("registry entry type matches its TypeId key")
    }

    fn candidates_mut<C: Contract + ?Sized>(&mut self) -> &mut Vec<Candidate<C>> {
        self.candidates
            .downcast_mut()
            .expect("registry entry type matches its TypeId key")
    }
}

fn freeze<C: Contract + ?Sized>(candidates: Erased) -> Erased {
    match candidates.downcast::<Vec<Candidate<C>>>() {
        Ok(list) => Box::new(Arc::<[Candidate<C>]>::from(*list)),
        Err(other) => other,
    }
}

// ============================================================================
// RegistryBuilder - single-writer registration phase
// ============================================================================

/// Builder for constructing a [`Registry`].
///
/// Every registration is validated eagerly; the first invalid candidate
/// aborts with a [`ConfigurationError`].
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new()
///     .register(<dyn FooService>::candidate("one", FooService1).when(Predicate::billing(["BILLING1"])))?
///     .register(<dyn FooService>::candidate("two", FooService2).when(Predicate::billing(["BILLING2"])))?
///     .build();
/// ```
pub struct RegistryBuilder {
    entries: HashMap<TypeId, PendingEntry>,
    policy: AmbiguityPolicy,
}

impl RegistryBuilder {
    /// Create a new empty builder using [`AmbiguityPolicy::Reject`].
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            policy: AmbiguityPolicy::default(),
        }
    }

    /// Set the policy applied when several candidates match.
    pub fn with_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register a candidate.
    pub fn register<C: Contract + ?Sized>(
        mut self,
        candidate: Candidate<C>,
    ) -> Result<Self, ConfigurationError> {
        self.register_mut(candidate)?;
        Ok(self)
    }

    /// Register a candidate (mutable version).
    ///
    /// Rejects a candidate whose name is already taken within the contract,
    /// one with a predicate accepting no values, and one constraining other
    /// dimensions than the candidates registered before it.
    pub fn register_mut<C: Contract + ?Sized>(
        &mut self,
        candidate: Candidate<C>,
    ) -> Result<(), ConfigurationError> {
        if let Some(empty) = candidate.predicates().iter().find(|p| p.values().next().is_none()) {
            return Err(ConfigurationError::EmptyPredicate {
                contract: C::NAME,
                candidate: candidate.name(),
                dimension: empty.dimension().to_string(),
            });
        }

        let entry = self
            .entries
            .entry(TypeId::of::<C>())
            .or_insert_with(PendingEntry::new::<C>);

        if entry.names.contains(&candidate.name()) {
            return Err(ConfigurationError::DuplicateCandidate {
                contract: C::NAME,
                candidate: candidate.name(),
            });
        }

        if let Some(first) = entry.candidates::<C>().first() {
            let expected = first.dimensions();
            let found = candidate.dimensions();
            if expected != found {
                return Err(ConfigurationError::MixedDimensions {
                    contract: C::NAME,
                    candidate: candidate.name(),
                    expected: expected.iter().map(ToString::to_string).collect(),
                    found: found.iter().map(ToString::to_string).collect(),
                });
            }
        }

        #[cfg(feature = "tracing")]
        {
            let predicates: Vec<String> =
                candidate.predicates().iter().map(ToString::to_string).collect();
            tracing::debug!(
                contract = C::NAME,
                candidate = candidate.name(),
                ?predicates,
                "registered candidate"
            );
        }

        entry.names.push(candidate.name());
        entry.candidates_mut::<C>().push(candidate);
        Ok(())
    }

    /// Freeze the registrations into an immutable [`Registry`].
    pub fn build(self) -> Registry {
        let contracts: HashMap<TypeId, Entry> = self
            .entries
            .into_iter()
            .map(|(id, pending)| {
                let entry = Entry {
                    name: pending.name,
                    candidates: (pending.freeze)(pending.candidates),
                    names: pending.names,
                };
                (id, entry)
            })
            .collect();

        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                contracts = contracts.len(),
                candidates = contracts.values().map(|e| e.names.len()).sum::<usize>(),
                policy = ?self.policy,
                "registry built"
            );
        }

        Registry {
            contracts,
            resolver: Resolver::new(self.policy),
        }
    }

    /// Get the total number of registered candidates.
    pub fn len(&self) -> usize {
        self.entries.values().map(|e| e.names.len()).sum()
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Registry - immutable, thread-safe contract storage
// ============================================================================

struct Entry {
    name: &'static str,
    /// An `Arc<[Candidate<C>]>`.
    candidates: Erased,
    names: Vec<&'static str>,
}

/// An immutable, thread-safe registry of contracts and candidates.
///
/// Created by calling [`RegistryBuilder::build`].
pub struct Registry {
    contracts: HashMap<TypeId, Entry>,
    resolver: Resolver,
}

impl Registry {
    fn shared<C: Contract + ?Sized>(&self) -> Result<&Arc<[Candidate<C>]>, ResolveError> {
        self.contracts
            .get(&TypeId::of::<C>())
            .and_then(|e| e.candidates.downcast_ref::<Arc<[Candidate<C>]>>())
            .ok_or(ResolveError::NotFound { contract: C::NAME })
    }

    /// The candidates of contract `C`, in registration order.
    pub fn candidates_for<C: Contract + ?Sized>(&self) -> Result<&[Candidate<C>], ResolveError> {
        self.shared::<C>().map(|c| &c[..])
    }

    /// Resolve contract `C` against an explicit context snapshot.
    pub fn resolve<C: Contract + ?Sized>(
        &self,
        context: &ResolutionContext,
    ) -> Result<&Candidate<C>, ResolveError> {
        self.resolver
            .resolve(C::NAME, self.candidates_for::<C>()?, context)
    }

    /// Build the dispatch proxy for contract `C`.
    ///
    /// Fails with [`ResolveError::NotFound`] if `C` has no candidates.
    pub fn dispatcher<C, P>(&self, provider: P) -> Result<Dispatcher<C>, ResolveError>
    where
        C: Contract + ?Sized,
        P: ContextProvider + 'static,
    {
        let candidates = Arc::clone(self.shared::<C>()?);
        Ok(Dispatcher::new(candidates, Arc::new(provider), self.resolver))
    }

    /// Check whether contract `C` has been registered.
    pub fn contains<C: Contract + ?Sized>(&self) -> bool {
        self.contracts.contains_key(&TypeId::of::<C>())
    }

    /// Names of the registered contracts, sorted.
    pub fn contracts(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.contracts.values().map(|e| e.name).collect();
        names.sort_unstable();
        names
    }

    /// The ambiguity policy applied by this registry's resolver.
    pub fn policy(&self) -> AmbiguityPolicy {
        self.resolver.policy()
    }

    /// Get the number of registered contracts.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for entry in self.contracts.values() {
            map.entry(&entry.name, &entry.names);
        }
        map.finish()
    }
}
