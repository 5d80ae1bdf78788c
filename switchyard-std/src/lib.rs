//! # switchyard-std
//!
//! Standard implementations for the Switchyard contract resolution engine.
//!
//! This crate provides:
//! - **Registry**: [`RegistryBuilder`] and the frozen [`Registry`]
//! - **Dispatch proxy**: [`Dispatcher`]
//! - **Context providers**: Fixed, Shared, closure-backed
//! - **Collected registration**: `inventory`-based candidate declarations
//! - **Testing utilities**: scripted and recording providers
//!
//! [`RegistryBuilder`]: registry::RegistryBuilder
//! [`Registry`]: registry::Registry
//! [`Dispatcher`]: dispatch::Dispatcher

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use switchyard_core;

// Modules
#[cfg(feature = "inventory")]
pub mod collected;
pub mod dispatch;
pub mod providers;
pub mod registry;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;
