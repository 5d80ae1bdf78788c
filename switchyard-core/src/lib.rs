//! # switchyard-core
//!
//! Core model for the Switchyard contract resolution engine.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that declares contracts and candidates without needing the registry or
//! dispatch machinery of `switchyard-std`.
//!
//! # Model
//!
//! - A **contract** is a trait callers depend on. Its trait object
//!   implements [`Contract`].
//! - A **candidate** ([`Candidate`]) is one implementation of a contract,
//!   gated by one or more [`Predicate`]s over context [`Dimension`]s.
//! - A [`ContextProvider`] hands out the current [`ResolutionContext`].
//! - The [`Resolver`] selects exactly one matching candidate, or fails.
//!
//! # Error Types
//!
//! - [`SwitchyardError`] - Top-level error type
//! - [`ConfigurationError`] - Registration-time errors
//! - [`ResolveError`] - Resolution-time errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod candidate;
mod context;
mod error;
mod predicate;
mod resolver;

// Re-exports
pub use candidate::{Candidate, Contract};
pub use context::{ContextProvider, Dimension, ResolutionContext};
pub use error::{BoxError, ConfigurationError, ResolveError, SwitchyardError};
pub use predicate::Predicate;
pub use resolver::{AmbiguityPolicy, Resolver};
