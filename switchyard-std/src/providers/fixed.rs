//! A provider that always returns the same snapshot.

use switchyard_core::{ContextProvider, Dimension, ResolutionContext};

/// A context fixed for the lifetime of the provider.
///
/// Suited to processes whose billing plan or region is decided once at
/// startup, and to tests.
#[derive(Debug, Clone, Default)]
pub struct FixedContext {
    context: ResolutionContext,
}

impl FixedContext {
    /// Wrap a snapshot.
    pub fn new(context: ResolutionContext) -> Self {
        Self { context }
    }

    /// A context with a single dimension set.
    pub fn single(dimension: impl Into<Dimension>, value: impl Into<String>) -> Self {
        Self::new(ResolutionContext::new().with(dimension, value))
    }
}

impl From<ResolutionContext> for FixedContext {
    fn from(context: ResolutionContext) -> Self {
        Self::new(context)
    }
}

impl ContextProvider for FixedContext {
    fn current_context(&self) -> ResolutionContext {
        self.context.clone()
    }
}
