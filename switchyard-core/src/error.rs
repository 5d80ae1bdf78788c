//! Error types for Switchyard.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`SwitchyardError`] - Top-level error type for all Switchyard operations
//! - [`ConfigurationError`] - Errors raised while building a registry
//! - [`ResolveError`] - Errors raised while resolving a contract at call time

use crate::context::ResolutionContext;
use thiserror::Error;

/// A boxed error type for implementation-side failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Switchyard operations.
#[derive(Error, Debug)]
pub enum SwitchyardError {
    /// The registry could not be built.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A contract could not be resolved to a single candidate.
    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors raised at registration time.
///
/// These are fatal to startup: a registry that failed to build must not be
/// replaced by a partial one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two candidates of the same contract share a name.
    #[error("candidate `{candidate}` is already registered for contract `{contract}`")]
    DuplicateCandidate {
        /// The contract name.
        contract: &'static str,
        /// The duplicated candidate name.
        candidate: &'static str,
    },

    /// A predicate accepts no value at all and could never match.
    #[error("candidate `{candidate}` of contract `{contract}` has a predicate on `{dimension}` that accepts no values")]
    EmptyPredicate {
        /// The contract name.
        contract: &'static str,
        /// The offending candidate.
        candidate: &'static str,
        /// The dimension of the empty predicate.
        dimension: String,
    },

    /// A candidate constrains other dimensions than the candidates already
    /// registered for the same contract.
    #[error(
        "candidate `{candidate}` of contract `{contract}` constrains [{}] but earlier candidates constrain [{}]",
        .found.join(", "),
        .expected.join(", ")
    )]
    MixedDimensions {
        /// The contract name.
        contract: &'static str,
        /// The rejected candidate.
        candidate: &'static str,
        /// Dimensions used by the candidates already registered.
        expected: Vec<String>,
        /// Dimensions used by the rejected candidate.
        found: Vec<String>,
    },
}

/// Errors raised while resolving a contract.
///
/// None of these are transient: resolving again with the same context always
/// yields the same outcome, so they are surfaced to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The contract has no registered candidates at all.
    #[error("no candidates registered for contract `{contract}`")]
    NotFound {
        /// The contract name.
        contract: &'static str,
    },

    /// No candidate accepts the current context.
    #[error("no candidate of contract `{contract}` matches context {context}")]
    NoCandidate {
        /// The contract name.
        contract: &'static str,
        /// The snapshot the resolution ran against.
        context: ResolutionContext,
    },

    /// More than one candidate accepts the current context.
    #[error(
        "context {context} matches {} candidates of contract `{contract}`: {}",
        .candidates.len(),
        .candidates.join(", ")
    )]
    AmbiguousCandidate {
        /// The contract name.
        contract: &'static str,
        /// The snapshot the resolution ran against.
        context: ResolutionContext,
        /// Every matching candidate, in registration order.
        candidates: Vec<&'static str>,
    },
}

impl ResolveError {
    /// The name of the contract that failed to resolve.
    pub fn contract(&self) -> &'static str {
        match self {
            ResolveError::NotFound { contract }
            | ResolveError::NoCandidate { contract, .. }
            | ResolveError::AmbiguousCandidate { contract, .. } => contract,
        }
    }

    /// The context snapshot, if the failure depended on one.
    pub fn context(&self) -> Option<&ResolutionContext> {
        match self {
            ResolveError::NotFound { .. } => None,
            ResolveError::NoCandidate { context, .. }
            | ResolveError::AmbiguousCandidate { context, .. } => Some(context),
        }
    }
}
