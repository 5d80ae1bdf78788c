//! Testing utilities for Switchyard.
//!
//! This module provides context providers that make routing decisions
//! observable in tests.
//!
//! # Features
//!
//! - [`ScriptedContext`]: Returns a scripted sequence of snapshots
//! - [`RecordingProvider`]: Wraps a provider and records every snapshot it hands out

use switchyard_core::{ContextProvider, ResolutionContext};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Scripted Context
// ============================================================================

/// A provider that walks through a fixed list of snapshots.
///
/// Each call returns the next snapshot; once the script is exhausted the
/// last one is repeated. An empty script yields empty contexts.
///
/// # Example
///
/// ```rust,ignore
/// let script = ScriptedContext::new([
///     ResolutionContext::new().with(Dimension::BILLING, "BILLING1"),
///     ResolutionContext::new().with(Dimension::BILLING, "BILLING2"),
/// ]);
/// let proxy = registry.dispatcher::<dyn FooService, _>(script.clone())?;
///
/// proxy.get_some()?; // BILLING1
/// proxy.get_some()?; // BILLING2
/// assert_eq!(script.reads(), 2);
/// ```
#[derive(Clone)]
pub struct ScriptedContext {
    script: Arc<[ResolutionContext]>,
    reads: Arc<AtomicUsize>,
}

impl ScriptedContext {
    /// Create a provider replaying `script`.
    pub fn new(script: impl IntoIterator<Item = ResolutionContext>) -> Self {
        Self {
            script: script.into_iter().collect(),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of snapshots taken so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ContextProvider for ScriptedContext {
    fn current_context(&self) -> ResolutionContext {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        match self.script.get(n).or_else(|| self.script.last()) {
            Some(context) => context.clone(),
            None => ResolutionContext::new(),
        }
    }
}

// ============================================================================
// Recording Provider
// ============================================================================

/// A provider wrapper that records every snapshot it returns.
///
/// Useful for verifying that a dispatcher reads the context on each call
/// rather than reusing an earlier decision.
pub struct RecordingProvider<P> {
    inner: P,
    seen: Arc<Mutex<Vec<ResolutionContext>>>,
}

impl<P: ContextProvider> RecordingProvider<P> {
    /// Wrap `inner`.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded snapshots.
    pub fn snapshots(&self) -> Vec<ResolutionContext> {
        self.seen.lock().unwrap().clone()
    }

    /// Get the number of recorded snapshots.
    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Clear all recorded snapshots.
    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}

impl<P: Clone> Clone for RecordingProvider<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            seen: self.seen.clone(),
        }
    }
}

impl<P: ContextProvider> ContextProvider for RecordingProvider<P> {
    fn current_context(&self) -> ResolutionContext {
        let context = self.inner.current_context();
        self.seen.lock().unwrap().push(context.clone());
        context
    }
}
