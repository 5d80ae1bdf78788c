//! # Resolution
//!
//! Picks the single candidate of a contract that applies to a context.
//!
//! Resolution is a pure, synchronous lookup over values that are already in
//! memory. Failures are returned immediately and never retried: without a
//! context change, running it again can only produce the same answer.

use crate::{candidate::Candidate, context::ResolutionContext, error::ResolveError};

/// What to do when more than one candidate matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    /// Fail with [`ResolveError::AmbiguousCandidate`] naming every match.
    ///
    /// Overlapping predicates are a configuration defect and this surfaces
    /// them on the first call that hits the overlap.
    #[default]
    Reject,

    /// Pick the earliest registered match and log a warning naming the
    /// candidates it shadows.
    FirstRegistered,
}

/// The candidate selection algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolver {
    policy: AmbiguityPolicy,
}

impl Resolver {
    /// Create a resolver with the given ambiguity policy.
    pub const fn new(policy: AmbiguityPolicy) -> Self {
        Self { policy }
    }

    /// The ambiguity policy in effect.
    pub const fn policy(&self) -> AmbiguityPolicy {
        self.policy
    }

    /// Select the candidate of `contract` matching `context`.
    ///
    /// Candidates are examined in the given (registration) order. Exactly one
    /// match is returned; zero matches yield [`ResolveError::NoCandidate`],
    /// several are handled according to the [`AmbiguityPolicy`]. An empty
    /// slice yields [`ResolveError::NotFound`].
    pub fn resolve<'a, C: ?Sized>(
        &self,
        contract: &'static str,
        candidates: &'a [Candidate<C>],
        context: &ResolutionContext,
    ) -> Result<&'a Candidate<C>, ResolveError> {
        if candidates.is_empty() {
            return Err(ResolveError::NotFound { contract });
        }

        let mut matched = candidates.iter().filter(|c| c.matches(context));
        let Some(first) = matched.next() else {
            return Err(ResolveError::NoCandidate {
                contract,
                context: context.clone(),
            });
        };

        let shadowed: Vec<&'static str> = matched.map(Candidate::name).collect();
        if shadowed.is_empty() {
            return Ok(first);
        }

        match self.policy {
            AmbiguityPolicy::Reject => Err(ResolveError::AmbiguousCandidate {
                contract,
                context: context.clone(),
                candidates: std::iter::once(first.name()).chain(shadowed).collect(),
            }),
            AmbiguityPolicy::FirstRegistered => {
                #[cfg(feature = "tracing")]
                {
                    tracing::warn!(
                        contract,
                        %context,
                        selected = first.name(),
                        ?shadowed,
                        "ambiguous match, using first registered candidate"
                    );
                }
                Ok(first)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::Dimension, predicate::Predicate};
    use std::sync::Arc;

    trait Foo: Send + Sync {
        fn some(&self) -> String;
    }

    struct Impl(&'static str);

    impl Foo for Impl {
        fn some(&self) -> String {
            format!("a value from {}", self.0)
        }
    }

    fn candidate(name: &'static str, predicate: Predicate) -> Candidate<dyn Foo> {
        Candidate::new(name, Arc::new(Impl(name)) as Arc<dyn Foo>).when(predicate)
    }

    fn billing(value: &str) -> ResolutionContext {
        ResolutionContext::new().with(Dimension::BILLING, value.to_string())
    }

    fn disjoint() -> Vec<Candidate<dyn Foo>> {
        vec![
            candidate("x", Predicate::billing(["BILLING1"])),
            candidate("y", Predicate::billing(["BILLING2"])),
        ]
    }

    fn overlapping() -> Vec<Candidate<dyn Foo>> {
        vec![
            candidate("x", Predicate::billing(["BILLING1", "BILLING2"])),
            candidate("y", Predicate::billing(["BILLING2"])),
        ]
    }

    #[test]
    fn single_match_is_returned() {
        let candidates = disjoint();
        let resolved = Resolver::default()
            .resolve("F", &candidates, &billing("BILLING2"))
            .unwrap();
        assert_eq!(resolved.name(), "y");
        assert_eq!(resolved.implementation().some(), "a value from y");
    }

    #[test]
    fn no_match_carries_contract_and_context() {
        let candidates = disjoint();
        let err = Resolver::default()
            .resolve("F", &candidates, &billing("BILLING3"))
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::NoCandidate {
                contract: "F",
                context: billing("BILLING3"),
            }
        );
    }

    #[test]
    fn missing_dimension_is_no_match() {
        let candidates = disjoint();
        let err = Resolver::default()
            .resolve("F", &candidates, &ResolutionContext::new().with("region", "RU"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoCandidate { .. }));
    }

    #[test]
    fn overlap_is_rejected_by_default() {
        let candidates = overlapping();
        let err = Resolver::default()
            .resolve("F", &candidates, &billing("BILLING2"))
            .unwrap_err();
        match err {
            ResolveError::AmbiguousCandidate { contract, candidates, .. } => {
                assert_eq!(contract, "F");
                assert_eq!(candidates, vec!["x", "y"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn overlap_outside_the_shared_value_still_resolves() {
        let candidates = overlapping();
        let resolved = Resolver::default()
            .resolve("F", &candidates, &billing("BILLING1"))
            .unwrap();
        assert_eq!(resolved.name(), "x");
    }

    #[test]
    fn first_registered_policy_picks_earliest() {
        let candidates = overlapping();
        let resolver = Resolver::new(AmbiguityPolicy::FirstRegistered);
        let resolved = resolver
            .resolve("F", &candidates, &billing("BILLING2"))
            .unwrap();
        assert_eq!(resolved.name(), "x");
        assert_eq!(resolver.policy(), AmbiguityPolicy::FirstRegistered);
    }

    #[test]
    fn values_match_regardless_of_case() {
        let candidates = disjoint();
        let upper = Resolver::default()
            .resolve("F", &candidates, &billing("BILLING2"))
            .unwrap();
        let lower = Resolver::default()
            .resolve("F", &candidates, &billing("billing2"))
            .unwrap();
        assert_eq!(upper.name(), lower.name());
    }

    #[test]
    fn empty_candidate_list_is_not_found() {
        let candidates: Vec<Candidate<dyn Foo>> = Vec::new();
        let err = Resolver::default()
            .resolve("F", &candidates, &billing("BILLING1"))
            .unwrap_err();
        assert_eq!(err, ResolveError::NotFound { contract: "F" });
    }
}
