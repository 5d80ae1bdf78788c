//! Candidates: one gated implementation of a contract.

use crate::{
    context::{Dimension, ResolutionContext},
    predicate::Predicate,
};
use std::{collections::BTreeSet, fmt, sync::Arc};

/// A service contract callers depend on.
///
/// Implemented for the trait object of a contract trait (`dyn FooService`),
/// usually by the `#[contract]` attribute. The registry keys contracts by the
/// `TypeId` of that trait object; [`NAME`](Contract::NAME) only feeds
/// diagnostics.
///
/// # Example
///
/// ```rust,ignore
/// pub trait Greeter: Send + Sync {
///     fn greet(&self) -> Result<String, BoxError>;
/// }
///
/// impl Contract for dyn Greeter {
///     const NAME: &'static str = "Greeter";
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a registered contract",
    label = "missing `Contract` implementation",
    note = "Annotate the trait with `#[switchyard::contract]` or implement `Contract` for its trait object."
)]
pub trait Contract: Send + Sync + 'static {
    /// Human-readable identity used in errors and logs.
    const NAME: &'static str;
}

/// A concrete implementation of contract `C` together with the predicates
/// that must all hold for it to be selected.
///
/// Since a candidate can only be built from an `Arc<C>`, a candidate that
/// does not implement its contract is rejected by the compiler.
pub struct Candidate<C: ?Sized> {
    name: &'static str,
    implementation: Arc<C>,
    predicates: Vec<Predicate>,
}

impl<C: ?Sized> Candidate<C> {
    /// Create an unconstrained candidate.
    pub fn new(name: &'static str, implementation: Arc<C>) -> Self {
        Self {
            name,
            implementation,
            predicates: Vec::new(),
        }
    }

    /// Add a predicate. All predicates must hold for the candidate to match.
    pub fn when(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// The candidate name, unique within its contract.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The implementation calls are forwarded to.
    pub fn implementation(&self) -> &C {
        &self.implementation
    }

    /// A shared handle on the implementation.
    pub fn shared(&self) -> Arc<C> {
        Arc::clone(&self.implementation)
    }

    /// The predicates, in declaration order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// The set of dimensions this candidate constrains.
    pub fn dimensions(&self) -> BTreeSet<&Dimension> {
        self.predicates.iter().map(Predicate::dimension).collect()
    }

    /// Check whether every predicate holds for the given context.
    pub fn matches(&self, context: &ResolutionContext) -> bool {
        self.predicates.iter().all(|p| p.matches(context))
    }
}

impl<C: ?Sized> Clone for Candidate<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            implementation: Arc::clone(&self.implementation),
            predicates: self.predicates.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Candidate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("predicates", &self.predicates)
            .finish_non_exhaustive()
    }
}
