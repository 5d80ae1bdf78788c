//! A provider whose snapshot can be replaced at runtime.

use switchyard_core::{ContextProvider, Dimension, ResolutionContext};
use std::sync::{Arc, PoisonError, RwLock};

/// A cloneable handle on a swappable context snapshot.
///
/// Writers build a complete new snapshot and swap it in; readers clone the
/// current one. A reader therefore always sees every dimension from the same
/// version, even while another thread is updating.
///
/// # Example
///
/// ```rust,ignore
/// let context = SharedContext::new();
/// let proxy = registry.dispatcher::<dyn FooService, _>(context.clone())?;
///
/// context.set(Dimension::BILLING, "BILLING2");
/// proxy.get_some()?; // routed by BILLING2
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedContext {
    current: Arc<RwLock<Arc<ResolutionContext>>>,
}

impl SharedContext {
    /// Create a handle on an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle starting from `context`.
    pub fn with_context(context: ResolutionContext) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(context))),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<ResolutionContext> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the whole snapshot.
    pub fn replace(&self, context: ResolutionContext) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(context);
    }

    /// Set one dimension, keeping the others.
    pub fn set(&self, dimension: impl Into<Dimension>, value: impl Into<String>) {
        self.update(|context| {
            context.insert(dimension, value);
        });
    }

    /// Unset one dimension.
    pub fn remove(&self, dimension: &str) {
        self.update(|context| {
            context.remove(dimension);
        });
    }

    /// Apply several changes as a single swap.
    pub fn update(&self, change: impl FnOnce(&mut ResolutionContext)) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = ResolutionContext::clone(&guard);
        change(&mut next);
        *guard = Arc::new(next);
    }
}

impl ContextProvider for SharedContext {
    fn current_context(&self) -> ResolutionContext {
        ResolutionContext::clone(&self.snapshot())
    }
}
