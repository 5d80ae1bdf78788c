//! A provider backed by a closure.

use switchyard_core::{ContextProvider, ResolutionContext};

/// Adapts a closure into a [`ContextProvider`].
///
/// # Example
///
/// ```rust,ignore
/// let provider = FnContext::new(|| {
///     ResolutionContext::new().with(Dimension::BILLING, current_plan())
/// });
/// ```
pub struct FnContext<F> {
    func: F,
}

impl<F> FnContext<F>
where
    F: Fn() -> ResolutionContext + Send + Sync,
{
    /// Create a provider that calls `func` for every snapshot.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> ContextProvider for FnContext<F>
where
    F: Fn() -> ResolutionContext + Send + Sync,
{
    fn current_context(&self) -> ResolutionContext {
        (self.func)()
    }
}
